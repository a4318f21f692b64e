use anyhow::{Context, Result};
use log::info;
use std::io::Read;
use std::path::Path;

use crate::config::settings::AppConfig;
use crate::database::SqliteSource;
use crate::pagination::{PageRequest, PageSummary, Paginator};

/// Runs one page request against the configured SQLite database
pub struct PagingService {
    config: AppConfig,
}

impl PagingService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self, request: PageRequest) -> Result<String> {
        let summary = self.fetch_summary(request).await?;
        self.render(&summary)
    }

    /// Rejected requests fail before the database is touched
    pub async fn fetch_summary(&self, request: PageRequest) -> Result<PageSummary> {
        let settings = request.settings()?;
        let source = self.open_source().await?;
        let paginator =
            Paginator::with_settings(source, request.query, request.parameters, settings);

        info!(
            "Fetching page {} ({} per page) from {}",
            paginator.current_page(),
            paginator.per_page(),
            self.config.database.path
        );

        let summary = paginator.to_summary().await?;
        info!("  → {} rows, next page: {:?}", summary.count, summary.next_page);
        Ok(summary)
    }

    /// Opening the pool connects eagerly, so it runs on the blocking pool
    async fn open_source(&self) -> Result<SqliteSource> {
        let database = self.config.database.clone();
        tokio::task::spawn_blocking(move || SqliteSource::open(&database.path, database.pool_size))
            .await
            .context("Database open task did not complete")?
    }

    fn render(&self, summary: &PageSummary) -> Result<String> {
        let json = if self.config.output.pretty {
            serde_json::to_string_pretty(summary)
        } else {
            serde_json::to_string(summary)
        };
        json.context("Failed to serialize page summary")
    }
}

/// Load a request document from a file, or standard input for `-`
pub fn read_request(path: &Path) -> Result<PageRequest> {
    let json = read_source(path)?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse page request from {}", path.display()))
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read page request from stdin")?;
        return Ok(json);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read page request file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::get_connection;
    use crate::errors::{ConfigurationError, FailureTag};
    use serde_json::{Value, json};
    use std::path::PathBuf;

    fn temp_path(name: &str, extension: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("sql_paginator_service_{}_{}.{}", name, std::process::id(), extension));
        let _ = std::fs::remove_file(&path);
        path
    }

    /// Seeded players database, removed when dropped
    struct TestDatabase {
        path: PathBuf,
        config: AppConfig,
    }

    impl TestDatabase {
        fn seeded(name: &str, rows: usize) -> Self {
            let path = temp_path(name, "db");
            let config = AppConfig::new().with_database_path(path.to_str());

            let source = SqliteSource::open(&config.database.path, 1).unwrap();
            let mut conn = get_connection(source.pool()).unwrap();
            conn.execute_batch("CREATE TABLE players (id INTEGER PRIMARY KEY, name TEXT NOT NULL)")
                .unwrap();
            let tx = conn.transaction().unwrap();
            for id in 1..=rows {
                tx.execute(
                    "INSERT INTO players (id, name) VALUES (?1, ?2)",
                    rusqlite::params![id as i64, format!("player {}", id)],
                )
                .unwrap();
            }
            tx.commit().unwrap();

            Self { path, config }
        }

        fn service(&self) -> PagingService {
            PagingService::new(self.config.clone())
        }
    }

    impl Drop for TestDatabase {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn players_request() -> PageRequest {
        PageRequest::new("SELECT id, name FROM players ORDER BY id", vec![]).with_per_page(10)
    }

    #[tokio::test]
    async fn test_middle_page() {
        let database = TestDatabase::seeded("middle", 25);

        let summary = database
            .service()
            .fetch_summary(players_request().with_current_page(2))
            .await
            .unwrap();

        assert_eq!(summary.count, 10);
        assert_eq!(summary.previous_page, Some(1));
        assert_eq!(summary.next_page, Some(3));
        assert_eq!(summary.items[0]["id"], json!(11));
        assert_eq!(summary.items[9]["name"], json!("player 20"));
    }

    #[tokio::test]
    async fn test_last_page() {
        let database = TestDatabase::seeded("last", 25);

        let summary = database
            .service()
            .fetch_summary(players_request().with_current_page(3))
            .await
            .unwrap();

        assert_eq!(summary.count, 5);
        assert_eq!(summary.next_page, None);
        assert_eq!(summary.items.last().unwrap()["id"], json!(25));
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let database = TestDatabase::seeded("past_end", 25);

        let summary = database
            .service()
            .fetch_summary(players_request().with_current_page(50))
            .await
            .unwrap();

        assert_eq!(summary.count, 0);
        assert_eq!(summary.previous_page, Some(49));
        assert_eq!(summary.next_page, None);
    }

    #[tokio::test]
    async fn test_query_ending_in_line_comment() {
        let database = TestDatabase::seeded("line_comment", 25);
        let request = PageRequest::new("SELECT id FROM players ORDER BY id -- newest last", vec![])
            .with_per_page(10)
            .with_current_page(2);

        let summary = database.service().fetch_summary(request).await.unwrap();

        assert_eq!(summary.count, 10);
        assert_eq!(summary.items[0]["id"], json!(11));
        assert_eq!(summary.items[9]["id"], json!(20));
        assert_eq!(summary.next_page, Some(3));
    }

    #[tokio::test]
    async fn test_bound_parameters_filter_rows() {
        let database = TestDatabase::seeded("params", 25);
        let request = PageRequest::new(
            "SELECT id FROM players WHERE id > ?1 ORDER BY id",
            vec![json!(20)],
        )
        .with_per_page(3);

        let summary = database.service().fetch_summary(request).await.unwrap();

        let ids: Vec<Value> = summary.items.iter().map(|row| row["id"].clone()).collect();
        assert_eq!(ids, vec![json!(21), json!(22), json!(23)]);
        assert_eq!(summary.next_page, Some(2));
    }

    #[tokio::test]
    async fn test_configuration_error_is_preserved() {
        let config =
            AppConfig::new().with_database_path(Some("/nonexistent_sql_paginator_dir/x.db"));
        let service = PagingService::new(config);
        let request = PageRequest::new("SELECT 1", vec![]);

        let error = service.run(request).await.unwrap_err();

        let config_error = error.downcast_ref::<ConfigurationError>().unwrap();
        assert_eq!(config_error.tag(), FailureTag::MissingRequiredPerPage);
    }

    #[tokio::test]
    async fn test_rejected_request_does_not_create_database() {
        let path = temp_path("rejected", "db");
        let config = AppConfig::new().with_database_path(path.to_str());
        let service = PagingService::new(config);
        let request = PageRequest::new("SELECT 1", vec![]).with_per_page("ten");

        let error = service.run(request).await.unwrap_err();

        let config_error = error.downcast_ref::<ConfigurationError>().unwrap();
        assert_eq!(config_error.tag(), FailureTag::InvalidTypePerPage);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_compact_rendering() {
        let database = TestDatabase::seeded("compact", 1);
        let service = PagingService::new(database.config.clone().with_compact_output(true));

        let json = service.run(players_request()).await.unwrap();

        assert_eq!(
            json,
            r#"{"count":1,"previous_page":false,"current_page":1,"next_page":false,"per_page":10,"items":[{"id":1,"name":"player 1"}]}"#
        );
    }

    #[test]
    fn test_read_request_file() {
        let path = temp_path("request", "json");
        std::fs::write(&path, r#"{"query": "SELECT 1", "perPage": 5, "page": 2}"#).unwrap();

        let request = read_request(&path).unwrap();

        assert_eq!(request.query, "SELECT 1");
        assert_eq!(request.per_page, Some(json!(5)));
        assert_eq!(request.current_page, Some(json!(2)));
        std::fs::remove_file(&path).unwrap();
    }
}
