use serde::{Deserialize, Serialize};

use crate::error::MenuError;

/// A dish or drink offered by a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub restaurant_id: String,
    pub category_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub available: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

/// A menu section ("Starters", "Drinks") with its position on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub display_order: u32,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategoryCreate {
    pub restaurant_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            category_id: None,
            restaurant_id: None,
            image_url: None,
            available: true,
        }
    }
}

impl MenuCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, display_order: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            restaurant_id: None,
            display_order,
            active: true,
        }
    }
}

/// Sorts categories by `displayOrder`, the order the menu shows them in.
pub fn sort_by_display_order(categories: &mut [MenuCategory]) {
    categories.sort_by_key(|category| category.display_order);
}

/// Renumbers `displayOrder` from 1 following the slice order, returning the ids
/// in that order (the body of the reorder request).
pub fn renumber(categories: &mut [MenuCategory]) -> Vec<String> {
    categories
        .iter_mut()
        .enumerate()
        .map(|(index, category)| {
            category.display_order = index as u32 + 1;
            category.id.clone()
        })
        .collect()
}

/// Puts `categories` in the order given by `ids`, which must name each of
/// them exactly once. Pass the result to [`renumber`] before saving.
pub fn arrange(categories: &[MenuCategory], ids: &[String]) -> Result<Vec<MenuCategory>, MenuError> {
    if ids.len() != categories.len() {
        return Err(MenuError::ValidationError(format!(
            "new order must list all {} categories",
            categories.len()
        )));
    }
    let mut arranged: Vec<MenuCategory> = Vec::with_capacity(ids.len());
    for id in ids {
        if arranged.iter().any(|placed| placed.id == *id) {
            return Err(MenuError::ValidationError(format!("category {} listed twice", id)));
        }
        let category = categories
            .iter()
            .find(|category| category.id == *id)
            .ok_or_else(|| MenuError::NotFound(id.clone()))?;
        arranged.push(category.clone());
    }
    Ok(arranged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_categories() -> Vec<MenuCategory> {
        vec![
            MenuCategory::new("mains", "Mains", 1),
            MenuCategory::new("sides", "Sides", 2),
            MenuCategory::new("drinks", "Drinks", 3),
        ]
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn arrange_then_renumber() {
        let mut arranged = arrange(&three_categories(), &ids(&["drinks", "mains", "sides"])).unwrap();
        assert_eq!(renumber(&mut arranged), vec!["drinks", "mains", "sides"]);
        assert_eq!(arranged[0].name, "Drinks");
        assert_eq!(arranged[0].display_order, 1);
    }

    #[test]
    fn arrange_needs_every_category_once() {
        let categories = three_categories();
        assert!(matches!(
            arrange(&categories, &ids(&["drinks", "mains"])),
            Err(MenuError::ValidationError(_))
        ));
        assert_eq!(
            arrange(&categories, &ids(&["drinks", "drinks", "mains"])),
            Err(MenuError::ValidationError("category drinks listed twice".into()))
        );
        assert_eq!(
            arrange(&categories, &ids(&["drinks", "desserts", "mains"])),
            Err(MenuError::NotFound("desserts".into()))
        );
    }

    #[test]
    fn renumber_follows_slice_order() {
        let mut categories = vec![
            MenuCategory::new("drinks", "Drinks", 3),
            MenuCategory::new("mains", "Mains", 1),
        ];
        let ids = renumber(&mut categories);
        assert_eq!(ids, vec!["drinks", "mains"]);
        assert_eq!(categories[0].display_order, 1);
        assert_eq!(categories[1].display_order, 2);
    }

    #[test]
    fn sorts_by_display_order() {
        let mut categories = vec![
            MenuCategory::new("b", "B", 2),
            MenuCategory::new("a", "A", 1),
        ];
        sort_by_display_order(&mut categories);
        assert_eq!(categories[0].id, "a");
    }
}
