pub mod report;
pub mod runner;

pub use report::{OutputFormat, QueryReport};
pub use runner::{run_query, Query};
