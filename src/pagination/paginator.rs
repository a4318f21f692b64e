use log::debug;
use serde_json::Value;
use tokio::sync::OnceCell;

use super::config::PageSettings;
use super::request::PageRequest;
use super::summary::PageSummary;
use super::window::PageWindow;
use crate::database::{DataSource, Row};
use crate::errors::ConfigurationError;

/// Rows of the current page plus what the over-fetch revealed
#[derive(Debug)]
struct FetchedPage {
    rows: Vec<Row>,
    has_more: bool,
}

/// Lazy view of one page of a parameterized query.
///
/// Nothing runs at construction. The first result-dependent accessor executes
/// the base query with a `LIMIT per_page + 1 OFFSET ...` clause appended; the
/// extra row only tells whether a next page exists and is never exposed.
/// A successful fetch is cached for the life of the instance, a failed one is
/// not, so the next accessor call tries again.
pub struct Paginator<S> {
    source: S,
    base_query: String,
    parameters: Vec<Value>,
    settings: PageSettings,
    page: OnceCell<FetchedPage>,
}

impl<S: DataSource> Paginator<S> {
    pub fn new(
        source: S,
        query: impl Into<String>,
        parameters: Vec<Value>,
        per_page: u64,
        current_page: Option<u64>,
    ) -> Result<Self, ConfigurationError> {
        let settings = PageSettings::new(per_page, current_page)?;
        Ok(Self::with_settings(source, query, parameters, settings))
    }

    pub fn from_request(source: S, request: PageRequest) -> Result<Self, ConfigurationError> {
        let settings = request.settings()?;
        Ok(Self::with_settings(source, request.query, request.parameters, settings))
    }

    pub fn with_settings(
        source: S,
        query: impl Into<String>,
        parameters: Vec<Value>,
        settings: PageSettings,
    ) -> Self {
        Self {
            source,
            base_query: query.into(),
            parameters,
            settings,
            page: OnceCell::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.base_query
    }

    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.settings.current_page, self.settings.per_page)
    }

    pub fn per_page(&self) -> u64 {
        self.settings.per_page
    }

    pub fn current_page(&self) -> u64 {
        self.settings.current_page
    }

    /// Page before this one. Not checked against the data.
    pub fn previous_page(&self) -> Option<u64> {
        if self.settings.is_first_page() {
            None
        } else {
            Some(self.settings.current_page - 1)
        }
    }

    pub fn is_fetched(&self) -> bool {
        self.page.initialized()
    }

    /// Rows on this page, not a total across pages
    pub async fn count(&self) -> Result<usize, S::Error> {
        Ok(self.ensure_fetched().await?.rows.len())
    }

    pub async fn next_page(&self) -> Result<Option<u64>, S::Error> {
        let page = self.ensure_fetched().await?;
        Ok(page
            .has_more
            .then(|| self.settings.current_page.saturating_add(1)))
    }

    pub async fn first_item(&self) -> Result<Option<&Row>, S::Error> {
        Ok(self.ensure_fetched().await?.rows.first())
    }

    pub async fn last_item(&self) -> Result<Option<&Row>, S::Error> {
        Ok(self.ensure_fetched().await?.rows.last())
    }

    pub async fn items(&self) -> Result<&[Row], S::Error> {
        Ok(&self.ensure_fetched().await?.rows)
    }

    pub async fn to_summary(&self) -> Result<PageSummary, S::Error> {
        let items = self.items().await?.to_vec();
        Ok(PageSummary {
            count: items.len(),
            previous_page: self.previous_page(),
            current_page: self.current_page(),
            next_page: self.next_page().await?,
            per_page: self.per_page(),
            items,
        })
    }

    /// Concurrent callers wait on the same fetch; an error leaves the cell empty
    async fn ensure_fetched(&self) -> Result<&FetchedPage, S::Error> {
        self.page.get_or_try_init(|| self.fetch()).await
    }

    async fn fetch(&self) -> Result<FetchedPage, S::Error> {
        let window = self.window();
        let sql = window.apply(&self.base_query);

        debug!(
            "Fetching page {} (offset {}, requesting {} rows)",
            self.settings.current_page,
            window.offset(),
            window.fetch_limit()
        );

        let mut rows = self.source.execute(&sql, &self.parameters).await?;
        let has_more = window.has_more(rows.len());
        rows.truncate(window.visible(rows.len()));

        debug!(
            "  → Page {} holds {} rows, more: {}",
            self.settings.current_page,
            rows.len(),
            has_more
        );
        Ok(FetchedPage { rows, has_more })
    }
}
