/// SQLite (and most SQL engines) store LIMIT/OFFSET as signed 64-bit integers
const MAX_SQL_INTEGER: u64 = i64::MAX as u64;

/// Offset/limit pair selecting one page of an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: u64,
    limit: u64,
}

impl PageWindow {
    /// Window for a 1-based page number
    pub fn new(current_page: u64, per_page: u64) -> Self {
        let offset = current_page
            .saturating_mul(per_page)
            .saturating_sub(per_page);

        Self {
            offset: offset.min(MAX_SQL_INTEGER),
            limit: per_page,
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Rows requested from the source: one past the page to detect a next page
    pub fn fetch_limit(&self) -> u64 {
        self.limit.saturating_add(1).min(MAX_SQL_INTEGER)
    }

    /// Append the window clause to a caller-supplied statement.
    ///
    /// The clause starts on its own line so a trailing `--` comment in the
    /// base query cannot swallow it.
    pub fn apply(&self, base_query: &str) -> String {
        format!(
            "{}\nLIMIT {} OFFSET {}",
            strip_terminator(base_query),
            self.fetch_limit(),
            self.offset
        )
    }

    /// Whether a fetch returning `fetched` rows saw past the end of this page
    pub fn has_more(&self, fetched: usize) -> bool {
        fetched as u64 > self.limit
    }

    /// Number of fetched rows that belong to this page
    pub fn visible(&self, fetched: usize) -> usize {
        usize::try_from(self.limit).map_or(fetched, |limit| fetched.min(limit))
    }
}

fn strip_terminator(sql: &str) -> &str {
    let trimmed = sql.trim_end();
    trimmed
        .strip_suffix(';')
        .map_or(trimmed, str::trim_end)
}
