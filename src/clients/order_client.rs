use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderCreate, OrderStatus};
use crate::error::OrderError;
use crate::resources::{OrderAction, OrderQuery};

/// Client for the orders resource.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_basic_client!(OrderClient, Order, OrderError, order);

impl OrderClient {
    #[instrument(skip(self))]
    pub async fn orders_for_restaurant(&self, restaurant_id: String) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.list(OrderQuery::ForRestaurant(restaurant_id)).await?)
    }

    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: String) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.list(OrderQuery::ForUser(user_id)).await?)
    }

    #[instrument(skip(self, order), fields(restaurant_id = %order.restaurant_id))]
    pub async fn place_order(&self, order: OrderCreate) -> Result<Order, OrderError> {
        if order.items.is_empty() {
            return Err(OrderError::ValidationError("an order needs at least one item".to_string()));
        }
        if order.items.iter().any(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError("item quantities must be positive".to_string()));
        }
        info!(items = order.items.len(), "Placing order");
        Ok(self.inner.create(order).await?)
    }

    /// Asks the backend to move an order to `status`.
    ///
    /// The backend is the authority on transitions; a rejection comes back as
    /// the server's message.
    #[instrument(skip_all, fields(order_id = %order_id, status = %status))]
    pub async fn update_status(&self, order_id: String, status: OrderStatus) -> Result<(), OrderError> {
        info!("Updating order status");
        self.inner
            .perform_action(order_id, OrderAction::UpdateStatus(status))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactInfo, DeliveryAddress};
    use crate::error::ApiError;
    use crate::mock_framework::{create_mock_client, expect_action, expect_delete, expect_get, expect_list};

    #[tokio::test]
    async fn test_update_status_sends_action() {
        let (inner, mut receiver) = create_mock_client::<Order>(4);
        let client = OrderClient::new(inner);

        let task = tokio::spawn(async move { client.update_status("o-1".into(), OrderStatus::Confirmed).await });

        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action");
        assert_eq!(id, "o-1");
        assert_eq!(action, OrderAction::UpdateStatus(OrderStatus::Confirmed));
        responder.send(Ok(crate::api::ApiBody::Empty)).unwrap();

        assert_eq!(task.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_fetch_missing_order() {
        let (inner, mut receiver) = create_mock_client::<Order>(4);
        let client = OrderClient::new(inner);

        let task = tokio::spawn(async move { client.fetch_order("nope".into()).await });
        let (_, responder) = expect_get(&mut receiver).await.expect("Expected Get");
        responder.send(Ok(None)).unwrap();

        assert_eq!(task.await.unwrap(), Err(OrderError::NotFound("nope".into())));
    }

    #[tokio::test]
    async fn test_delete_order() {
        let (inner, mut receiver) = create_mock_client::<Order>(4);
        let client = OrderClient::new(inner);

        let task = tokio::spawn(async move { client.delete_order("o-9".into()).await });
        let (id, responder) = expect_delete(&mut receiver).await.expect("Expected Delete");
        assert_eq!(id, "o-9");
        responder.send(Ok(())).unwrap();

        assert_eq!(task.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_list_error_is_wrapped() {
        let (inner, mut receiver) = create_mock_client::<Order>(4);
        let client = OrderClient::new(inner);

        let task = tokio::spawn(async move { client.orders_for_restaurant("r-1".into()).await });
        let (query, responder) = expect_list(&mut receiver).await.expect("Expected List");
        assert_eq!(query, OrderQuery::ForRestaurant("r-1".into()));
        responder.send(Err(ApiError::Forbidden("Access denied".into()))).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Access denied");
    }

    #[tokio::test]
    async fn test_empty_order_rejected_locally() {
        let (inner, _receiver) = create_mock_client::<Order>(4);
        let client = OrderClient::new(inner);
        let order = OrderCreate {
            user_id: "u-1".into(),
            restaurant_id: "r-1".into(),
            items: vec![],
            contact_info: ContactInfo { name: "Nimal".into(), phone: "077".into(), email: None },
            delivery_address: DeliveryAddress {
                street: "1 Main St".into(),
                city: "Kandy".into(),
                postal_code: None,
                country: None,
            },
            total: 0.0,
            payment_id: None,
        };

        assert!(matches!(client.place_order(order).await, Err(OrderError::ValidationError(_))));
    }
}
