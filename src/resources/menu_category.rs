use serde_json::json;

use crate::actor_framework::Entity;
use crate::api::ApiCall;
use crate::domain::{MenuCategory, MenuCategoryCreate, MenuCategoryPatch};
use crate::error::ApiError;

const BASE: [&str; 3] = ["api", "restaurants", "menu-categories"];

#[derive(Debug, Clone, PartialEq)]
pub enum MenuCategoryQuery {
    ForRestaurant(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuCategoryCommand {
    /// Persist a new menu order; `category_ids` is first-to-last.
    Reorder {
        restaurant_id: String,
        category_ids: Vec<String>,
    },
}

fn at(tail: &[&str]) -> Vec<String> {
    BASE.iter().chain(tail).map(|s| s.to_string()).collect()
}

impl Entity for MenuCategory {
    type Id = String;
    type CreateParams = MenuCategoryCreate;
    type Patch = MenuCategoryPatch;
    type Query = MenuCategoryQuery;
    type Action = ();
    type Command = MenuCategoryCommand;

    const KIND: &'static str = "menu category";

    fn id(&self) -> &String {
        &self.id
    }

    fn list_call(query: &MenuCategoryQuery) -> Result<ApiCall, ApiError> {
        match query {
            MenuCategoryQuery::ForRestaurant(id) => Ok(ApiCall::get(at(&["by-restaurant", id.as_str()]))),
        }
    }

    fn get_call(id: &String) -> Result<ApiCall, ApiError> {
        Ok(ApiCall::get(at(&[id.as_str()])).anonymous())
    }

    fn create_call(params: &MenuCategoryCreate) -> Result<ApiCall, ApiError> {
        ApiCall::post(BASE).json(params)
    }

    fn update_call(id: &String, patch: &MenuCategoryPatch) -> Result<ApiCall, ApiError> {
        ApiCall::put(at(&[id.as_str()])).json(patch)
    }

    fn delete_call(id: &String) -> Result<ApiCall, ApiError> {
        Ok(ApiCall::delete(at(&[id.as_str()])))
    }

    fn command_call(command: &MenuCategoryCommand) -> Result<ApiCall, ApiError> {
        match command {
            MenuCategoryCommand::Reorder { restaurant_id, category_ids } => {
                ApiCall::put(at(&["reorder", restaurant_id.as_str()])).json(&json!({ "categoryIds": category_ids }))
            }
        }
    }
}
