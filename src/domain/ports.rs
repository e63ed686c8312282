use crate::domain::model::Dataset;
use crate::utils::error::Result;

/// Source of the agency's collections.
pub trait DataProvider: Send + Sync {
    fn name(&self) -> &str;
    fn load(&self) -> Result<Dataset>;
}

pub trait QueryDefaults: Send + Sync {
    fn top_limit(&self) -> usize;
    fn period(&self) -> Option<(chrono::NaiveDate, chrono::NaiveDate)>;
}
