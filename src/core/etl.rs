use crate::core::{Pipeline, Result, TransformResult};
use crate::domain::model::RunSummary;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load. Any stage error aborts the run.
    pub fn run(&self) -> Result<RunSummary> {
        let result = self.extract_and_transform()?;
        let mut summary = summarize(&result, false);

        tracing::info!("Loading {} laboratories...", result.records.len());
        summary.output_path = self.pipeline.load(result)?;
        tracing::info!("Output saved to: {}", summary.output_path);

        Ok(summary)
    }

    /// Same as [`run`](Self::run) without the load stage.
    pub fn preview(&self) -> Result<RunSummary> {
        let result = self.extract_and_transform()?;
        Ok(summarize(&result, true))
    }

    fn extract_and_transform(&self) -> Result<TransformResult> {
        tracing::info!("Extracting data...");
        let table = self.pipeline.extract()?;
        tracing::info!("Extracted {} rows", table.len());

        tracing::info!("Transforming data...");
        let result = self.pipeline.transform(table)?;
        tracing::info!(
            "Grouped into {} laboratories ({} rows skipped)",
            result.records.len(),
            result.rows_skipped
        );

        Ok(result)
    }
}

fn summarize(result: &TransformResult, dry_run: bool) -> RunSummary {
    RunSummary {
        output_path: String::new(),
        rows_read: result.rows_read,
        rows_skipped: result.rows_skipped,
        groups: result.records.len(),
        products: result.records.iter().map(|r| r.products.len()).sum(),
        dry_run,
    }
}
