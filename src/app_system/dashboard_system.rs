use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::config::ApiConfig;
use crate::actor_framework::{Entity, ResourceClient, ResourceGateway};
use crate::api::{HttpTransport, Session, Transport};
use crate::clients::{
    AccountClient, DeliveryClient, MenuCategoryClient, MenuItemClient, OrderClient, PaymentClient, ReportClient,
    RestaurantClient, UserClient,
};
use crate::error::ApiError;

const GATEWAY_BUFFER: usize = 32;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Gateway task failed: {0}")]
    GatewayTask(String),
}

/// Every client the dashboard needs, wired to one transport.
///
/// Responsible for starting the resource gateways and stopping them again.
pub struct DashboardSystem {
    pub order_client: OrderClient,
    pub user_client: UserClient,
    pub menu_item_client: MenuItemClient,
    pub menu_category_client: MenuCategoryClient,
    pub payment_client: PaymentClient,
    pub account_client: AccountClient,
    pub report_client: ReportClient,
    pub restaurant_client: RestaurantClient,
    pub delivery_client: DeliveryClient,
    handles: Vec<JoinHandle<()>>,
}

fn spawn_gateway<T: Entity>(transport: &Arc<dyn Transport>, handles: &mut Vec<JoinHandle<()>>) -> ResourceClient<T> {
    let (gateway, client) = ResourceGateway::<T>::new(GATEWAY_BUFFER, transport.clone());
    handles.push(tokio::spawn(gateway.run()));
    client
}

impl DashboardSystem {
    /// Connects to the configured backend as `session`.
    pub fn connect(config: &ApiConfig, session: &Session) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(config)?.with_session(session);
        info!(core = %config.core_url, payments = %config.payments_url, "Connecting dashboard");
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Starts the gateways over an arbitrary transport. Must run inside a
    /// Tokio runtime.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        let mut handles = Vec::new();

        let order_client = OrderClient::new(spawn_gateway(&transport, &mut handles));
        let user_client = UserClient::new(spawn_gateway(&transport, &mut handles));
        let menu_item_client = MenuItemClient::new(spawn_gateway(&transport, &mut handles));
        let menu_category_client = MenuCategoryClient::new(spawn_gateway(&transport, &mut handles));
        let payment_client = PaymentClient::new(spawn_gateway(&transport, &mut handles));

        Self {
            order_client,
            user_client,
            menu_item_client,
            menu_category_client,
            payment_client,
            account_client: AccountClient::new(transport.clone()),
            report_client: ReportClient::new(transport.clone()),
            restaurant_client: RestaurantClient::new(transport.clone()),
            delivery_client: DeliveryClient::new(transport),
            handles,
        }
    }

    /// Closes the gateways and waits for in-flight calls to finish.
    ///
    /// Clones of the resource clients held elsewhere (e.g. by a status
    /// control) keep their gateway alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down dashboard...");

        drop(self.order_client);
        drop(self.user_client);
        drop(self.menu_item_client);
        drop(self.menu_category_client);
        drop(self.payment_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Gateway task failed: {:?}", e);
                return Err(SystemError::GatewayTask(e.to_string()));
            }
        }

        info!("Dashboard shutdown complete.");
        Ok(())
    }
}
