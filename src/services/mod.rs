pub mod paging;

pub use paging::{PagingService, read_request};
