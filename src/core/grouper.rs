use crate::domain::model::{DedupMode, Grouping, MissingValuePolicy, Table};
use crate::utils::error::{EtlError, Result};

/// Partitions rows by laboratory and collects the distinct products of each.
///
/// In [`DedupMode::Raw`] keys and products are compared as read, so `"Aspirin"` and
/// `" Aspirin"` are two entries; trimming happens later in the normalizer.
pub fn group_rows(
    table: &Table,
    dedup: DedupMode,
    missing: MissingValuePolicy,
) -> Result<Grouping> {
    let mut grouping = Grouping::default();

    for row in &table.rows {
        let (lab, product) = match (&row.lab, &row.product) {
            (Some(lab), Some(product)) => (lab, product),
            (lab, _) => {
                let column = if lab.is_none() {
                    &table.lab_column
                } else {
                    &table.product_column
                };
                match missing {
                    MissingValuePolicy::Fail => {
                        return Err(EtlError::MissingValueError {
                            line: row.line,
                            column: column.clone(),
                        });
                    }
                    MissingValuePolicy::Skip => {
                        tracing::warn!("Skipping line {}: no value for '{}'", row.line, column);
                        grouping.skipped_rows += 1;
                        continue;
                    }
                }
            }
        };

        let (lab, product) = match dedup {
            DedupMode::Raw => (lab.as_str(), product.as_str()),
            DedupMode::Trimmed => (lab.trim(), product.trim()),
        };

        grouping
            .groups
            .entry(lab.to_string())
            .or_default()
            .insert(product.to_string());
    }

    tracing::debug!(
        "Grouped {} rows into {} laboratories ({} skipped)",
        table.len(),
        grouping.groups.len(),
        grouping.skipped_rows
    );
    Ok(grouping)
}
