#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::loader::SourceFormat;
use crate::core::ConfigProvider;
use crate::domain::model::{DedupMode, MissingValuePolicy};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, Validate,
};

pub const DEFAULT_INPUT_PATH: &str = "cccc.xlsx";
pub const DEFAULT_OUTPUT_PATH: &str = "labs.json";
pub const DEFAULT_LAB_COLUMN: &str = "LABORATOIRE";
pub const DEFAULT_PRODUCT_COLUMN: &str = "PRODUIT";

/// Fully resolved settings for one run. `Default` reproduces the fixed file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input_path: String,
    pub output_path: String,
    pub sheet: Option<String>,
    pub lab_column: String,
    pub product_column: String,
    pub dedup: DedupMode,
    pub missing_values: MissingValuePolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_path: DEFAULT_INPUT_PATH.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            sheet: None,
            lab_column: DEFAULT_LAB_COLUMN.to_string(),
            product_column: DEFAULT_PRODUCT_COLUMN.to_string(),
            dedup: DedupMode::default(),
            missing_values: MissingValuePolicy::default(),
        }
    }
}

impl RunConfig {
    pub fn new(input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }
}

impl ConfigProvider for RunConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    fn lab_column(&self) -> &str {
        &self.lab_column
    }

    fn product_column(&self) -> &str {
        &self.product_column
    }

    fn dedup_mode(&self) -> DedupMode {
        self.dedup
    }

    fn missing_values(&self) -> MissingValuePolicy {
        self.missing_values
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_path", &self.input_path)?;
        validate_file_extension("input_path", &self.input_path, &SourceFormat::EXTENSIONS)?;

        validate_path("output_path", &self.output_path)?;
        validate_file_extension("output_path", &self.output_path, &["json"])?;

        if let Some(sheet) = &self.sheet {
            validate_non_empty_string("sheet", sheet)?;
        }
        validate_non_empty_string("lab_column", &self.lab_column)?;
        validate_non_empty_string("product_column", &self.product_column)?;

        if self.lab_column == self.product_column {
            return Err(EtlError::ConfigValidationError {
                field: "product_column".to_string(),
                message: format!(
                    "laboratory and product columns must differ (both are '{}')",
                    self.lab_column
                ),
            });
        }

        Ok(())
    }
}
