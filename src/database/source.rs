use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;

/// One result row: column name to value, in the order the query returned them
pub type Row = Map<String, Value>;

/// Anything that can execute a parameterized statement and return ordered rows.
///
/// Cancellation and timeouts are the implementor's concern. Errors are
/// surfaced to paginator callers unchanged.
pub trait DataSource {
    type Error;

    fn execute(
        &self,
        query: &str,
        parameters: &[Value],
    ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send;
}

impl<T: DataSource + Sync> DataSource for &T {
    type Error = T::Error;

    fn execute(
        &self,
        query: &str,
        parameters: &[Value],
    ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send {
        (**self).execute(query, parameters)
    }
}

impl<T: DataSource + Send + Sync> DataSource for Arc<T> {
    type Error = T::Error;

    fn execute(
        &self,
        query: &str,
        parameters: &[Value],
    ) -> impl Future<Output = Result<Vec<Row>, Self::Error>> + Send {
        self.as_ref().execute(query, parameters)
    }
}
