pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{JsonFileProvider, SeedProvider};
pub use app::{run_query, OutputFormat, Query, QueryReport};
pub use config::TomlConfig;
pub use crate::core::queries::{ClientRequestCount, MinPriceClients, QueryEngine, DEFAULT_TOP_LIMIT};
pub use crate::core::snapshot::{load_snapshot, Snapshot, SnapshotStore, SnapshotSummary};
pub use domain::model::{
    Counterparty, Dataset, RealEstateObject, RealEstatePurpose, RealEstateType, Request,
    RequestType,
};
pub use domain::ports::{DataProvider, QueryDefaults};
pub use utils::error::{RealtyError, Result};
