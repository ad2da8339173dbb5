use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::api::{ApiCall, Transport};
use crate::domain::{latest_position, Coordinates, DeliveryDriver, DriverAssignment, LocationPoint};
use crate::error::DeliveryError;

/// Driver registration, assignments and customer location lookups.
#[derive(Clone)]
pub struct DeliveryClient {
    transport: Arc<dyn Transport>,
}

impl DeliveryClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Every order replicated to the delivery service.
    #[instrument(skip(self))]
    pub async fn replication(&self) -> Result<Vec<DriverAssignment>, DeliveryError> {
        debug!("Sending request");
        let body = self.transport.execute(ApiCall::get(["api", "deliveryReplication"])).await?;
        Ok(body.json::<Option<Vec<DriverAssignment>>>()?.unwrap_or_default())
    }

    #[instrument(skip(self))]
    pub async fn driver_orders(&self, driver_id: String) -> Result<Vec<DriverAssignment>, DeliveryError> {
        debug!("Sending request");
        let call = ApiCall::get(["api", "driver-orders", "orders", driver_id.as_str()]);
        let body = self.transport.execute(call).await?;
        Ok(body.json::<Option<Vec<DriverAssignment>>>()?.unwrap_or_default())
    }

    /// Registers a driver, returning the service's acknowledgement text.
    #[instrument(skip(self, driver), fields(driver_id = %driver.driver_id))]
    pub async fn register_driver(&self, driver: &DeliveryDriver) -> Result<Option<String>, DeliveryError> {
        let call = ApiCall::post(["api", "deliveryDriver"]).json(driver)?;
        let body = self.transport.execute(call).await?;
        info!("Driver registered");
        Ok(body.message())
    }

    #[instrument(skip(self))]
    pub async fn list_drivers(&self) -> Result<Vec<DeliveryDriver>, DeliveryError> {
        debug!("Sending request");
        let body = self.transport.execute(ApiCall::get(["api", "deliveryDriver"])).await?;
        Ok(body.json::<Option<Vec<DeliveryDriver>>>()?.unwrap_or_default())
    }

    /// Deletes a driver, returning the service's acknowledgement text.
    #[instrument(skip(self))]
    pub async fn remove_driver(&self, driver_id: String) -> Result<Option<String>, DeliveryError> {
        let call = ApiCall::delete(["api", "deliveryDriver", driver_id.as_str()]);
        let body = self.transport.execute(call).await?;
        info!("Driver removed");
        Ok(body.message())
    }

    #[instrument(skip(self))]
    pub async fn location_history(&self, user_id: String, order_id: String) -> Result<Vec<LocationPoint>, DeliveryError> {
        let call = ApiCall::get(["api", "location", "user", user_id.as_str(), "order", order_id.as_str()]);
        let body = self.transport.execute(call).await?;
        Ok(body.json::<Option<Vec<LocationPoint>>>()?.unwrap_or_default())
    }

    /// Where the customer was last seen for this order.
    #[instrument(skip(self))]
    pub async fn latest_location(&self, user_id: String, order_id: String) -> Result<Coordinates, DeliveryError> {
        let history = self.location_history(user_id, order_id).await?;
        latest_position(&history).ok_or(DeliveryError::NoLocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::mock_framework::StubTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_latest_location_uses_last_point() {
        let transport = Arc::new(StubTransport::new());
        transport.push_json(json!([
            {"latitude": "6.90", "longitude": "79.80"},
            {"latitude": "6.95", "longitude": "79.86"}
        ]));
        let client = DeliveryClient::new(transport.clone());

        let position = client.latest_location("u-1".into(), "o-1".into()).await.unwrap();
        assert_eq!(position, Coordinates { lat: 6.95, lng: 79.86 });
        assert_eq!(transport.calls()[0].path(), "/api/location/user/u-1/order/o-1");
    }

    #[tokio::test]
    async fn test_empty_history_has_no_location() {
        let transport = Arc::new(StubTransport::new());
        transport.push_json(json!([]));
        let client = DeliveryClient::new(transport);

        let err = client.latest_location("u-1".into(), "o-1".into()).await.unwrap_err();
        assert_eq!(err, DeliveryError::NoLocation);
    }

    #[tokio::test]
    async fn test_list_then_remove_driver() {
        let transport = Arc::new(StubTransport::new());
        transport.push_json(json!([
            {"driverId": "d-1", "driverName": "Sunil", "vehicleType": "car", "workingCity": "Kandy"},
            {"driverId": "d-2", "driverName": "Nimal"}
        ]));
        transport.push_empty();
        let client = DeliveryClient::new(transport.clone());

        let drivers = client.list_drivers().await.unwrap();
        assert_eq!(drivers.len(), 2);
        assert_eq!(drivers[0].working_city.as_deref(), Some("Kandy"));
        assert_eq!(drivers[1].vehicle_type, "bike");

        assert_eq!(client.remove_driver("d-2".into()).await.unwrap(), None);
        let calls = transport.calls();
        assert_eq!(calls[0].path(), "/api/deliveryDriver");
        assert_eq!(calls[1].method, Method::Delete);
        assert_eq!(calls[1].path(), "/api/deliveryDriver/d-2");
    }

    #[tokio::test]
    async fn test_register_driver_posts_json() {
        let transport = Arc::new(StubTransport::new());
        transport.push_text("Driver registered");
        let client = DeliveryClient::new(transport.clone());
        let driver: DeliveryDriver = serde_json::from_value(json!({"driverId": "d-1", "driverName": "Sunil"})).unwrap();

        let message = client.register_driver(&driver).await.unwrap();
        assert_eq!(message.as_deref(), Some("Driver registered"));
        let body = transport.calls()[0].body.clone().unwrap();
        assert_eq!(body["vehicleType"], "bike");
    }
}
