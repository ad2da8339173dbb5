use std::sync::Arc;
use tracing::{debug, instrument};

use crate::api::{ApiCall, Transport};
use crate::domain::Restaurant;
use crate::error::RestaurantError;

/// Restaurant listings for the admin and restaurant-owner dashboards.
#[derive(Clone)]
pub struct RestaurantClient {
    transport: Arc<dyn Transport>,
}

impl RestaurantClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    #[instrument(skip(self))]
    pub async fn all_restaurants(&self) -> Result<Vec<Restaurant>, RestaurantError> {
        self.list(ApiCall::get(["api", "restaurants"])).await
    }

    /// Restaurants the signed-in user owns or administers.
    #[instrument(skip(self))]
    pub async fn my_restaurants(&self) -> Result<Vec<Restaurant>, RestaurantError> {
        self.list(ApiCall::get(["api", "restaurants", "my-restaurants"])).await
    }

    async fn list(&self, call: ApiCall) -> Result<Vec<Restaurant>, RestaurantError> {
        debug!("Sending request");
        let body = self.transport.execute(call).await?;
        Ok(body.json::<Option<Vec<Restaurant>>>()?.unwrap_or_default())
    }
}
