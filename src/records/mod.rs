use serde::{Deserialize, Serialize};

pub mod view;

pub use view::{
    derive_view, parse_bound, FilterCriteria, SortDirection, SortField, SortSpec, ViewSummary,
};

/// One transaction row as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub address: String,
}

impl Transaction {
    /// Shortest decimal form of the amount, the text the free-text search matches against.
    pub fn amount_text(&self) -> String {
        self.amount.to_string()
    }
}

/// A single page of transactions together with the server's paging totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}
