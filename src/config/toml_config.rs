use crate::config::RunConfig;
use crate::domain::model::{DedupMode, MissingValuePolicy};
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Optional TOML file. Every key is optional and only overrides what it names.
///
/// ```toml
/// [source]
/// path = "exports/${MONTH}.xlsx"
/// sheet = "Produits"
/// lab_column = "LABORATOIRE"
/// product_column = "PRODUIT"
///
/// [transform]
/// dedup = "raw"            # or "trimmed"
/// missing_values = "skip"  # or "fail"
///
/// [output]
/// path = "labs.json"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    pub path: Option<String>,
    pub sheet: Option<String>,
    pub lab_column: Option<String>,
    pub product_column: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransformConfig {
    pub dedup: Option<DedupMode>,
    pub missing_values: Option<MissingValuePolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| EtlError::ConfigError {
            message: format!(
                "cannot read config file '{}': {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn apply_to(&self, config: &mut RunConfig) {
        if let Some(path) = &self.source.path {
            config.input_path = path.clone();
        }
        if let Some(sheet) = &self.source.sheet {
            config.sheet = Some(sheet.clone());
        }
        if let Some(column) = &self.source.lab_column {
            config.lab_column = column.clone();
        }
        if let Some(column) = &self.source.product_column {
            config.product_column = column.clone();
        }
        if let Some(dedup) = self.transform.dedup {
            config.dedup = dedup;
        }
        if let Some(missing) = self.transform.missing_values {
            config.missing_values = missing;
        }
        if let Some(path) = &self.output.path {
            config.output_path = path.clone();
        }
    }

    pub fn into_run_config(self) -> RunConfig {
        let mut config = RunConfig::default();
        self.apply_to(&mut config);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
path = "exports/march.csv"
sheet = "Produits"
lab_column = "LAB"
product_column = "NOM"

[transform]
dedup = "trimmed"
missing_values = "fail"

[output]
path = "out/labs.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .into_run_config();

        assert_eq!(config.input_path, "exports/march.csv");
        assert_eq!(config.sheet.as_deref(), Some("Produits"));
        assert_eq!(config.lab_column, "LAB");
        assert_eq!(config.product_column, "NOM");
        assert_eq!(config.dedup, DedupMode::Trimmed);
        assert_eq!(config.missing_values, MissingValuePolicy::Fail);
        assert_eq!(config.output_path, "out/labs.json");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = TomlConfig::from_toml_str("[output]\npath = \"catalogue.json\"\n")
            .unwrap()
            .into_run_config();

        assert_eq!(config.input_path, "cccc.xlsx");
        assert_eq!(config.output_path, "catalogue.json");
        assert_eq!(config.dedup, DedupMode::Raw);
    }

    #[test]
    fn test_empty_config() {
        let config = TomlConfig::from_toml_str("").unwrap().into_run_config();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LAB_CATALOG_TEST_INPUT", "monthly.xlsx");

        let config = TomlConfig::from_toml_str(
            "[source]\npath = \"${LAB_CATALOG_TEST_INPUT}\"\nsheet = \"${LAB_CATALOG_UNSET_VAR}\"\n",
        )
        .unwrap();

        assert_eq!(config.source.path.as_deref(), Some("monthly.xlsx"));
        assert_eq!(
            config.source.sheet.as_deref(),
            Some("${LAB_CATALOG_UNSET_VAR}")
        );

        std::env::remove_var("LAB_CATALOG_TEST_INPUT");
    }

    #[test]
    fn test_invalid_enum_value() {
        let err = TomlConfig::from_toml_str("[transform]\ndedup = \"sorted\"\n").unwrap_err();
        assert!(matches!(err, EtlError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\npath = \"file.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.source.path.as_deref(), Some("file.csv"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = TomlConfig::from_file("/nonexistent/lab-catalog.toml").unwrap_err();
        assert!(matches!(err, EtlError::ConfigError { .. }));
    }
}
