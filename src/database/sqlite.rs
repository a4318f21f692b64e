use anyhow::{Context, Result};
use log::debug;
use rusqlite::params_from_iter;
use rusqlite::types::Value as SqlValue;
use serde_json::Value;
use std::future::Future;

use super::connection::{DbConn, DbPool, create_pool, get_connection};
use super::source::{DataSource, Row};
use super::values::{from_sql_value, to_sql_value};

/// Data source backed by a pool of SQLite connections.
///
/// Statements run on tokio's blocking pool so the calling task can be
/// suspended while SQLite works.
#[derive(Clone)]
pub struct SqliteSource {
    pool: DbPool,
}

impl SqliteSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn open(database_path: &str, pool_size: u32) -> Result<Self> {
        Ok(Self::new(create_pool(database_path, pool_size)?))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl DataSource for SqliteSource {
    type Error = anyhow::Error;

    fn execute(
        &self,
        query: &str,
        parameters: &[Value],
    ) -> impl Future<Output = Result<Vec<Row>>> + Send {
        let pool = self.pool.clone();
        let query = query.to_string();
        let parameters: Vec<SqlValue> = parameters.iter().map(to_sql_value).collect();

        async move {
            tokio::task::spawn_blocking(move || {
                let mut conn = get_connection(&pool)?;
                query_rows(&mut conn, &query, &parameters)
            })
            .await
            .context("SQLite query task did not complete")?
        }
    }
}

fn query_rows(conn: &mut DbConn, sql: &str, parameters: &[SqlValue]) -> Result<Vec<Row>> {
    debug!("Executing: {} with {} parameter(s)", sql, parameters.len());

    let mut stmt = conn
        .prepare(sql)
        .with_context(|| format!("Failed to prepare query: {}", sql))?;
    let columns = column_names(&stmt);

    let rows = stmt
        .query_map(params_from_iter(parameters.iter()), |row| parse_row(row, &columns))
        .context("Failed to execute query")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read query rows")?;

    Ok(rows)
}

fn column_names(stmt: &rusqlite::Statement<'_>) -> Vec<String> {
    stmt.column_names()
        .into_iter()
        .map(String::from)
        .collect()
}

fn parse_row(row: &rusqlite::Row<'_>, columns: &[String]) -> rusqlite::Result<Row> {
    let mut record = Row::with_capacity(columns.len());
    for (idx, name) in columns.iter().enumerate() {
        record.insert(name.clone(), from_sql_value(row.get_ref(idx)?));
    }
    Ok(record)
}
