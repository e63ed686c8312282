use crate::domain::model::Dataset;
use crate::domain::ports::DataProvider;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a [`Dataset`] from a JSON document with `counterparties`,
/// `estates` and `requests` arrays.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
    label: String,
}

impl JsonFileProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let label = format!("json:{}", path.display());
        Self { path, label }
    }
}

impl DataProvider for JsonFileProvider {
    fn name(&self) -> &str {
        &self.label
    }

    fn load(&self) -> Result<Dataset> {
        tracing::debug!("Reading dataset from {}", self.path.display());
        let content = fs::read_to_string(&self.path)?;
        let dataset: Dataset = serde_json::from_str(&content)?;
        Ok(dataset)
    }
}
