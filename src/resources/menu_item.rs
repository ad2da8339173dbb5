use crate::actor_framework::Entity;
use crate::api::ApiCall;
use crate::domain::{MenuItem, MenuItemCreate, MenuItemPatch};
use crate::error::ApiError;

const BASE: [&str; 3] = ["api", "restaurants", "menu-items"];

#[derive(Debug, Clone, PartialEq)]
pub enum MenuItemQuery {
    ForRestaurant(String),
    ForCategory(String),
}

fn at(tail: &[&str]) -> Vec<String> {
    BASE.iter().chain(tail).map(|s| s.to_string()).collect()
}

impl Entity for MenuItem {
    type Id = String;
    type CreateParams = MenuItemCreate;
    type Patch = MenuItemPatch;
    type Query = MenuItemQuery;
    type Action = ();
    type Command = ();

    const KIND: &'static str = "menu item";

    fn id(&self) -> &String {
        &self.id
    }

    fn list_call(query: &MenuItemQuery) -> Result<ApiCall, ApiError> {
        Ok(match query {
            MenuItemQuery::ForRestaurant(id) => ApiCall::get(at(&["by-restaurant", id.as_str()])),
            MenuItemQuery::ForCategory(id) => ApiCall::get(at(&["by-category", id.as_str()])),
        })
    }

    fn get_call(id: &String) -> Result<ApiCall, ApiError> {
        Ok(ApiCall::get(at(&[id.as_str()])))
    }

    fn create_call(params: &MenuItemCreate) -> Result<ApiCall, ApiError> {
        ApiCall::post(BASE).json(params)
    }

    fn update_call(id: &String, patch: &MenuItemPatch) -> Result<ApiCall, ApiError> {
        ApiCall::put(at(&[id.as_str()])).json(patch)
    }

    fn delete_call(id: &String) -> Result<ApiCall, ApiError> {
        Ok(ApiCall::delete(at(&[id.as_str()])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_paths() {
        let call = MenuItem::list_call(&MenuItemQuery::ForCategory("c-3".into())).unwrap();
        assert_eq!(call.path(), "/api/restaurants/menu-items/by-category/c-3");
        let call = MenuItem::list_call(&MenuItemQuery::ForRestaurant("r-1".into())).unwrap();
        assert_eq!(call.path(), "/api/restaurants/menu-items/by-restaurant/r-1");
    }
}
