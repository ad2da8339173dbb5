//! How each backend resource maps onto REST calls.

pub mod menu_category;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod user;

pub use menu_category::*;
pub use menu_item::*;
pub use order::*;
pub use payment::*;
pub use user::*;
