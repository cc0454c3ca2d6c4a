use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;
use super::forest::TaskForest;
use super::summary::Summary;

/// Which shape the source text had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// First row names the columns; any column order.
    Named,
    /// Columns addressed by position.
    Fixed,
}

/// A field that could not be parsed and was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWarning {
    /// 1-based line number in the source text.
    pub row: usize,
    pub field: String,
    pub raw: String,
}

/// The complete output of one import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: Uuid,
    pub source_file: Option<String>,
    pub imported_at: DateTime<Utc>,
    pub reference_date: NaiveDate,
    pub format: InputFormat,
    pub forest: TaskForest,
    pub categories: Vec<Category>,
    pub summary: Summary,
    #[serde(default)]
    pub skipped_rows: usize,
    #[serde(default)]
    pub warnings: Vec<RowWarning>,
}

impl Schedule {
    /// Attach the name of the file the text came from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_file = Some(source.into());
        self
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }
}
