use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

pub fn create_pool(database_path: &str, pool_size: u32) -> Result<DbPool> {
    let manager = build_manager(database_path);
    build_pool(manager, pool_size)
        .with_context(|| format!("Failed to open database: {}", database_path))
}

fn build_manager(path: &str) -> SqliteConnectionManager {
    SqliteConnectionManager::file(path)
}

fn build_pool(manager: SqliteConnectionManager, pool_size: u32) -> Result<DbPool> {
    r2d2::Pool::builder()
        .max_size(pool_size.max(1))
        .build(manager)
        .context("Failed to create database connection pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}
