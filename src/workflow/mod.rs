//! Order status workflow: the allowed-transition table and the progress timeline.

pub mod timeline;
pub mod transitions;

pub use timeline::*;
pub use transitions::*;
