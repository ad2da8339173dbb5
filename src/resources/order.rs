use crate::actor_framework::Entity;
use crate::api::ApiCall;
use crate::domain::{Order, OrderCreate, OrderStatus};
use crate::error::ApiError;

/// Which orders a listing returns.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderQuery {
    ForUser(String),
    ForRestaurant(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// `PUT /api/orders/{id}/status?status=<NEW>`
    UpdateStatus(OrderStatus),
}

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = ();
    type Query = OrderQuery;
    type Action = OrderAction;
    type Command = ();

    const KIND: &'static str = "order";

    fn id(&self) -> &String {
        &self.id
    }

    fn list_call(query: &OrderQuery) -> Result<ApiCall, ApiError> {
        Ok(match query {
            OrderQuery::ForUser(user_id) => ApiCall::get(["api", "orders", "user", user_id.as_str()]),
            OrderQuery::ForRestaurant(restaurant_id) => {
                ApiCall::get(["api", "orders", "restaurant", restaurant_id.as_str()])
            }
        })
    }

    fn get_call(id: &String) -> Result<ApiCall, ApiError> {
        Ok(ApiCall::get(["api", "orders", id.as_str()]))
    }

    fn create_call(params: &OrderCreate) -> Result<ApiCall, ApiError> {
        ApiCall::post(["api", "orders"]).json(params)
    }

    fn delete_call(id: &String) -> Result<ApiCall, ApiError> {
        Ok(ApiCall::delete(["api", "orders", id.as_str()]))
    }

    fn action_call(id: &String, action: &OrderAction) -> Result<ApiCall, ApiError> {
        match action {
            OrderAction::UpdateStatus(status) => {
                Ok(ApiCall::put(["api", "orders", id.as_str(), "status"]).query("status", status.as_str()))
            }
        }
    }
}
