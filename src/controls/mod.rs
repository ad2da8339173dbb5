//! Interactive dashboard controls and the notices they raise.

pub mod notify;
pub mod status_control;

pub use notify::*;
pub use status_control::*;
