pub mod pagination;
pub mod response;

pub use pagination::{PaginationInfo, PaginationQuery};
pub use response::{ApiResponse, RedirectHint};
