//! Typed clients for the dashboard's backend calls.
//!
//! Resource clients talk to a [`ResourceGateway`](crate::actor_framework::ResourceGateway);
//! the account, report, restaurant and delivery clients call the transport
//! directly.

#[macro_use]
mod macros;

pub mod account_client;
pub mod delivery_client;
pub mod menu_client;
pub mod order_client;
pub mod payment_client;
pub mod report_client;
pub mod restaurant_client;
pub mod user_client;

pub use account_client::*;
pub use delivery_client::*;
pub use menu_client::*;
pub use order_client::*;
pub use payment_client::*;
pub use report_client::*;
pub use restaurant_client::*;
pub use user_client::*;
