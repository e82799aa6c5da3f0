use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One source row, reduced to the two resolved columns.
///
/// Cells are kept exactly as read; `None` marks an empty or unreadable cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line in the source, header included.
    pub line: usize,
    pub lab: Option<String>,
    pub product: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub lab_column: String,
    pub product_column: String,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Raw laboratory key to the set of raw product strings seen with it.
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    pub groups: BTreeMap<String, BTreeSet<String>>,
    pub skipped_rows: usize,
}

/// Output element: `{ "lab": ..., "products": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabRecord {
    pub lab: String,
    pub products: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<LabRecord>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: String,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub groups: usize,
    pub products: usize,
    pub dry_run: bool,
}

/// Whether products are deduplicated on raw or trimmed text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DedupMode {
    /// Dedupe on raw cell text, then trim. Whitespace variants survive as duplicates.
    #[default]
    Raw,
    /// Trim first, so whitespace variants collapse into one lab and one product.
    Trimmed,
}

/// What to do with a row whose laboratory or product cell is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum MissingValuePolicy {
    #[default]
    Skip,
    Fail,
}
