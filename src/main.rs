use anyhow::Context;
use clap::Parser;
use realty_query::config::CliConfig;
use realty_query::utils::error::{ErrorSeverity, RealtyError};
use realty_query::utils::{logger, validation::Validate};
use realty_query::{load_snapshot, run_query, TomlConfig};

fn execute(cli: &CliConfig, config: &TomlConfig) -> Result<(), RealtyError> {
    let provider = config.provider()?;
    let snapshot = load_snapshot(provider.as_ref())?;

    let report = run_query(&snapshot, &cli.query(), config)?;
    println!("{}", report.render(config.output_format())?);

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path.display()))?,
        None => TomlConfig::default(),
    };
    cli.apply_overrides(&mut config);

    if config.json_logging() {
        logger::init_json_logger(config.log_level(), cli.verbose);
    } else {
        logger::init_cli_logger(config.log_level(), cli.verbose);
    }

    tracing::info!("Starting realty-query");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = execute(&cli, &config) {
        tracing::error!(
            "Query failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
