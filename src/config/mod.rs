pub mod settings;

pub use settings::{AppConfig, DatabaseSettings, OutputSettings};
