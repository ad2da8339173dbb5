use crate::actor_framework::Entity;
use crate::api::ApiCall;
use crate::domain::{User, UserCreate, UserPatch};
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum UserQuery {
    All,
    /// Role name as the backend stores it, e.g. `ROLE_RESTAURANT_ADMIN`.
    ByRole(String),
}

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Query = UserQuery;
    type Action = ();
    type Command = ();

    const KIND: &'static str = "user";

    fn id(&self) -> &String {
        &self.id
    }

    fn list_call(query: &UserQuery) -> Result<ApiCall, ApiError> {
        Ok(match query {
            UserQuery::All => ApiCall::get(["api", "users", "all-users"]),
            UserQuery::ByRole(role) => {
                ApiCall::get(["api", "users", "by-role"]).query("roleName", role.as_str())
            }
        })
    }

    fn create_call(params: &UserCreate) -> Result<ApiCall, ApiError> {
        ApiCall::post(["api", "users", "create-user"]).json(params)
    }

    fn update_call(id: &String, patch: &UserPatch) -> Result<ApiCall, ApiError> {
        ApiCall::put(["api", "users", "update-user", id.as_str()]).json(patch)
    }
}
