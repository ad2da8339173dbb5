use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{
    renumber, sort_by_display_order, MenuCategory, MenuCategoryCreate, MenuCategoryPatch, MenuItem,
    MenuItemCreate, MenuItemPatch,
};
use crate::error::MenuError;
use crate::resources::{MenuCategoryCommand, MenuCategoryQuery, MenuItemQuery};

/// Client for a restaurant's menu items.
#[derive(Clone)]
pub struct MenuItemClient {
    inner: ResourceClient<MenuItem>,
}

impl_basic_client!(MenuItemClient, MenuItem, MenuError, menu_item);

impl MenuItemClient {
    #[instrument(skip(self))]
    pub async fn items_for_restaurant(&self, restaurant_id: String) -> Result<Vec<MenuItem>, MenuError> {
        debug!("Sending request");
        Ok(self.inner.list(MenuItemQuery::ForRestaurant(restaurant_id)).await?)
    }

    #[instrument(skip(self))]
    pub async fn items_for_category(&self, category_id: String) -> Result<Vec<MenuItem>, MenuError> {
        debug!("Sending request");
        Ok(self.inner.list(MenuItemQuery::ForCategory(category_id)).await?)
    }

    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn create_menu_item(&self, item: MenuItemCreate) -> Result<MenuItem, MenuError> {
        validate_name(&item.name)?;
        validate_price(item.price)?;
        debug!("Sending request");
        Ok(self.inner.create(item).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_menu_item(&self, id: String, patch: MenuItemPatch) -> Result<MenuItem, MenuError> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }
}

fn validate_name(name: &str) -> Result<(), MenuError> {
    if name.trim().is_empty() {
        return Err(MenuError::ValidationError("name is required".to_string()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), MenuError> {
    if !price.is_finite() || price < 0.0 {
        return Err(MenuError::ValidationError(format!("invalid price: {}", price)));
    }
    Ok(())
}

/// Client for menu categories and their ordering.
#[derive(Clone)]
pub struct MenuCategoryClient {
    inner: ResourceClient<MenuCategory>,
}

impl_basic_client!(MenuCategoryClient, MenuCategory, MenuError, menu_category);

impl MenuCategoryClient {
    /// Categories in menu order.
    #[instrument(skip(self))]
    pub async fn categories_for_restaurant(&self, restaurant_id: String) -> Result<Vec<MenuCategory>, MenuError> {
        debug!("Sending request");
        let mut categories = self.inner.list(MenuCategoryQuery::ForRestaurant(restaurant_id)).await?;
        sort_by_display_order(&mut categories);
        Ok(categories)
    }

    #[instrument(skip(self, category), fields(name = %category.name))]
    pub async fn create_category(&self, category: MenuCategoryCreate) -> Result<MenuCategory, MenuError> {
        validate_name(&category.name)?;
        debug!("Sending request");
        Ok(self.inner.create(category).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_category(&self, id: String, patch: MenuCategoryPatch) -> Result<MenuCategory, MenuError> {
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    /// Persists `categories` in their current slice order.
    ///
    /// On success `displayOrder` is renumbered from 1; on failure the slice is
    /// left as it was.
    #[instrument(skip(self, categories), fields(count = categories.len()))]
    pub async fn reorder_categories(
        &self,
        restaurant_id: String,
        categories: &mut [MenuCategory],
    ) -> Result<(), MenuError> {
        let mut reordered = categories.to_vec();
        let category_ids = renumber(&mut reordered);
        info!("Saving category order");
        self.inner
            .run_command(MenuCategoryCommand::Reorder { restaurant_id, category_ids })
            .await?;
        categories.clone_from_slice(&reordered);
        Ok(())
    }
}
