use crate::core::grouper::group_rows;
use crate::core::loader::{load_table, Columns, SourceFormat};
use crate::core::normalizer::normalize_all;
use crate::core::serializer::to_json;
use crate::core::{ConfigProvider, Pipeline, Result, Storage, Table, TransformResult};

/// Spreadsheet → grouped laboratories → JSON file.
pub struct LabPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> LabPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for LabPipeline<S, C> {
    fn extract(&self) -> Result<Table> {
        let path = self.config.input_path();
        let format = SourceFormat::from_path(path)?;

        tracing::debug!("Reading input file: {}", path);
        let bytes = self.storage.read_file(path)?;

        load_table(
            path,
            bytes,
            format,
            self.config.sheet(),
            Columns {
                lab: self.config.lab_column(),
                product: self.config.product_column(),
            },
        )
    }

    fn transform(&self, table: Table) -> Result<TransformResult> {
        let grouping = group_rows(
            &table,
            self.config.dedup_mode(),
            self.config.missing_values(),
        )?;

        Ok(TransformResult {
            records: normalize_all(&grouping),
            rows_read: table.len(),
            rows_skipped: grouping.skipped_rows,
        })
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path();
        let json = to_json(&result.records)?;

        tracing::debug!(
            "Writing {} records ({} bytes) to {}",
            result.records.len(),
            json.len(),
            output_path
        );
        self.storage.write_file(output_path, &json)?;

        Ok(output_path.to_string())
    }
}
