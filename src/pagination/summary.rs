use serde::{Serialize, Serializer};

use crate::database::Row;

/// Everything known about one page, in a single serializable value.
///
/// Missing neighbour pages serialize as `false` rather than `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    pub count: usize,
    #[serde(serialize_with = "page_or_false")]
    pub previous_page: Option<u64>,
    pub current_page: u64,
    #[serde(serialize_with = "page_or_false")]
    pub next_page: Option<u64>,
    pub per_page: u64,
    pub items: Vec<Row>,
}

fn page_or_false<S: Serializer>(page: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
    match page {
        Some(page) => serializer.serialize_u64(*page),
        None => serializer.serialize_bool(false),
    }
}
