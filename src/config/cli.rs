use crate::config::toml_config::TomlConfig;
use crate::config::RunConfig;
use crate::domain::model::{DedupMode, MissingValuePolicy};
use crate::utils::error::Result;
use clap::Parser;

/// Command-line flags. With no flags the run uses `cccc.xlsx` and `labs.json`.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "lab-catalog")]
#[command(about = "Group laboratory/product spreadsheet rows into a JSON catalogue")]
pub struct CliConfig {
    /// Input spreadsheet (.xlsx, .xlsm, .xlsb, .xls, .ods) or .csv file
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output JSON file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Worksheet name (defaults to the first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Header of the laboratory column
    #[arg(long)]
    pub lab_column: Option<String>,

    /// Header of the product column
    #[arg(long)]
    pub product_column: Option<String>,

    /// Deduplicate products on raw or trimmed text
    #[arg(long, value_enum)]
    pub dedup: Option<DedupMode>,

    /// Skip or fail on rows with an empty laboratory or product
    #[arg(long, value_enum)]
    pub missing: Option<MissingValuePolicy>,

    /// TOML configuration file; flags take precedence over it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Load and group the input, report the result, write nothing
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Defaults, then the TOML file, then the flags.
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from: {}", path);
                TomlConfig::from_file(path)?.into_run_config()
            }
            None => RunConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(sheet) = &self.sheet {
            config.sheet = Some(sheet.clone());
        }
        if let Some(column) = &self.lab_column {
            config.lab_column = column.clone();
        }
        if let Some(column) = &self.product_column {
            config.product_column = column.clone();
        }
        if let Some(dedup) = self.dedup {
            config.dedup = dedup;
        }
        if let Some(missing) = self.missing {
            config.missing_values = missing;
        }

        Ok(config)
    }
}
