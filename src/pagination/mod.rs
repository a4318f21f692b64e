mod config;
mod paginator;
mod request;
mod summary;
mod window;

pub use config::{DEFAULT_PAGE, PageSettings};
pub use paginator::Paginator;
pub use request::PageRequest;
pub use summary::PageSummary;
pub use window::PageWindow;
