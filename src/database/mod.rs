pub mod connection;
pub mod source;
pub mod sqlite;
pub mod values;

pub use connection::{DbConn, DbPool, create_pool, get_connection};
pub use source::{DataSource, Row};
pub use sqlite::SqliteSource;
