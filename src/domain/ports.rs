use crate::domain::model::{DedupMode, MissingValuePolicy, Table, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// Replaces `path` with `data`, or leaves it untouched on failure.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn sheet(&self) -> Option<&str>;
    fn lab_column(&self) -> &str;
    fn product_column(&self) -> &str;
    fn dedup_mode(&self) -> DedupMode;
    fn missing_values(&self) -> MissingValuePolicy;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Table>;
    fn transform(&self, table: Table) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<String>;
}
