//! Client-side list views: filtering, sorting, pagination and counts over
//! already-fetched records.

pub mod criteria;
pub mod list_view;
pub mod order_board;
pub mod pagination;

pub use criteria::*;
pub use list_view::*;
pub use order_board::*;
pub use pagination::*;
