use clap::Parser;
use lab_catalog::utils::{logger, validation::Validate};
use lab_catalog::{CliConfig, EtlEngine, LabPipeline, LocalStorage, Result, RunSummary};

fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    match run(&cli) {
        Ok(summary) if summary.dry_run => {
            println!(
                "Dry run: {} rows read, {} skipped, {} laboratories, {} products (nothing written)",
                summary.rows_read, summary.rows_skipped, summary.groups, summary.products
            );
        }
        Ok(summary) => {
            println!("JSON file created: {}", summary.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed in {} stage: {} (Category: {:?}, Severity: {:?})",
                e.stage(),
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: &CliConfig) -> Result<RunSummary> {
    let config = cli.resolve()?;
    config.validate()?;

    let engine = EtlEngine::new(LabPipeline::new(LocalStorage::default(), config));
    if cli.dry_run {
        tracing::info!("🔍 Dry run, no output will be written");
        engine.preview()
    } else {
        engine.run()
    }
}
