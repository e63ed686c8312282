use crate::app::report::OutputFormat;
use crate::app::runner::Query;
use crate::config::toml_config::{DataSource, TomlConfig};
use crate::domain::model::{RealEstateType, RequestType};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "realty-query")]
#[command(about = "Analytical queries over a real-estate agency's clients, estates and requests")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON dataset to query instead of the built-in seed
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Clients with sell requests in a period (inclusive, YYYY-MM-DD)
    Sellers {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Clients ranked by number of requests of one type
    TopClients {
        #[arg(long = "type", default_value = "buy")]
        request_type: RequestType,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Request count per estate type
    CountsByType,
    /// Clients whose requests carry the lowest price
    MinPrice,
    /// Buyers looking for a given estate type
    Seekers {
        #[arg(long)]
        estate_type: RealEstateType,
    },
    /// Collection sizes of the loaded snapshot
    Summary,
}

impl CliConfig {
    /// Applies command-line flags on top of file configuration.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(path) = &self.data {
            config.data.source = DataSource::Json;
            config.data.path = Some(path.to_string_lossy().into_owned());
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }

    pub fn query(&self) -> Query {
        match &self.command {
            Command::Sellers { from, to } => Query::Sellers {
                from: *from,
                to: *to,
            },
            Command::TopClients {
                request_type,
                limit,
            } => Query::TopClients {
                request_type: *request_type,
                limit: *limit,
            },
            Command::CountsByType => Query::CountsByType,
            Command::MinPrice => Query::MinPrice,
            Command::Seekers { estate_type } => Query::Seekers {
                estate_type: *estate_type,
            },
            Command::Summary => Query::Summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_top_clients() {
        let cli = CliConfig::parse_from([
            "realty-query",
            "top-clients",
            "--type",
            "sell",
            "--limit",
            "3",
            "--format",
            "json",
        ]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(
            cli.query(),
            Query::TopClients {
                request_type: RequestType::Sell,
                limit: Some(3)
            }
        );
    }

    #[test]
    fn test_parse_sellers_dates() {
        let cli = CliConfig::parse_from([
            "realty-query",
            "sellers",
            "--from",
            "2024-01-01",
            "--to",
            "2024-12-31",
        ]);
        assert_eq!(
            cli.query(),
            Query::Sellers {
                from: NaiveDate::from_ymd_opt(2024, 1, 1),
                to: NaiveDate::from_ymd_opt(2024, 12, 31),
            }
        );
    }

    #[test]
    fn test_unknown_estate_type_rejected() {
        let result = CliConfig::try_parse_from(["realty-query", "seekers", "--estate-type", "castle"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_data_flag_switches_source() {
        let cli = CliConfig::parse_from(["realty-query", "--data", "agency.json", "min-price"]);
        let mut config = TomlConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.data.source, DataSource::Json);
        assert_eq!(config.data.path.as_deref(), Some("agency.json"));
        assert_eq!(cli.query(), Query::MinPrice);
    }

    #[test]
    fn test_export_subcommand_does_not_exist() {
        let result = CliConfig::try_parse_from(["realty-query", "export", "--out", "dump.json"]);
        assert!(result.is_err());
    }
}
