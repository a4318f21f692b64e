use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "sql_paginator.db".to_string(),
            pool_size: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub output: OutputSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            database: DatabaseSettings::default(),
            output: OutputSettings::default(),
        }
    }

    /// Defaults overridden by `DATABASE_PATH` and `DATABASE_POOL_SIZE`
    pub fn from_env() -> Result<Self> {
        Self::new().with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("DATABASE_PATH") {
            self.database.path = path;
        }

        if let Some(size) = lookup("DATABASE_POOL_SIZE") {
            self.database.pool_size = size
                .trim()
                .parse()
                .with_context(|| format!("Invalid DATABASE_POOL_SIZE: {}", size))?;
        }

        Ok(self)
    }

    pub fn with_database_path(mut self, path: Option<&str>) -> Self {
        if let Some(path) = path {
            self.database.path = path.to_string();
        }
        self
    }

    pub fn with_compact_output(mut self, compact: bool) -> Self {
        self.output.pretty = !compact;
        self
    }
}
