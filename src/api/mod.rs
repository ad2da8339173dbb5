//! REST plumbing: call descriptions, the session token and the HTTP transport.

pub mod call;
pub mod session;
pub mod transport;

pub use call::*;
pub use session::*;
pub use transport::*;
