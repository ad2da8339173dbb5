//! Plain records mirroring the backend's JSON. No transport concerns live here.

pub mod account;
pub mod delivery;
pub mod menu;
pub mod order;
pub mod payment;
pub mod restaurant;
pub mod status;
pub mod timestamp;
pub mod user;

pub use account::*;
pub use delivery::*;
pub use menu::*;
pub use order::*;
pub use payment::*;
pub use restaurant::*;
pub use status::*;
pub use user::*;
