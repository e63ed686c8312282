use thiserror::Error;

#[derive(Error, Debug)]
pub enum RealtyError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Query '{query}' requires at least one request")]
    EmptyInput { query: String },

    #[error("Request {request_id} references missing {target} {target_id}")]
    BrokenReference {
        request_id: u32,
        target: ReferenceTarget,
        target_id: u32,
    },

    #[error("Duplicate id {id} in {collection}")]
    DuplicateId { collection: String, id: u32 },

    #[error("Invalid {entity} {id}: {reason}")]
    InvalidEntity {
        entity: String,
        id: u32,
        reason: String,
    },

    #[error("Invalid argument '{field}' = '{value}': {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: String, value: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}' = '{value}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },
}

/// Collection a request points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceTarget {
    Counterparty,
    Estate,
}

impl std::fmt::Display for ReferenceTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceTarget::Counterparty => write!(f, "counterparty"),
            ReferenceTarget::Estate => write!(f, "estate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Query,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RealtyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RealtyError::IoError(_) | RealtyError::SerializationError(_) | RealtyError::CsvError(_) => {
                ErrorCategory::Io
            }
            RealtyError::BrokenReference { .. }
            | RealtyError::DuplicateId { .. }
            | RealtyError::InvalidEntity { .. } => ErrorCategory::Data,
            RealtyError::EmptyInput { .. }
            | RealtyError::InvalidArgument { .. }
            | RealtyError::UnknownVariant { .. } => ErrorCategory::Query,
            RealtyError::ConfigValidationError { .. }
            | RealtyError::InvalidConfigValueError { .. }
            | RealtyError::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Query => match self {
                RealtyError::EmptyInput { .. } => ErrorSeverity::Medium,
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::Critical,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RealtyError::IoError(_) => "Check that the file exists and is readable",
            RealtyError::SerializationError(_) => "Check that the dataset file is valid JSON",
            RealtyError::CsvError(_) => "Try a different output format",
            RealtyError::EmptyInput { .. } => "Load a dataset that contains at least one request",
            RealtyError::BrokenReference { .. } => {
                "Fix the request so it points at an existing counterparty and estate"
            }
            RealtyError::DuplicateId { .. } => "Make entity ids unique within each collection",
            RealtyError::InvalidEntity { .. } => "Correct the entity fields listed in the message",
            RealtyError::InvalidArgument { .. } => "Check the command arguments",
            RealtyError::UnknownVariant { .. } => "Use one of the documented values",
            RealtyError::ConfigValidationError { .. }
            | RealtyError::InvalidConfigValueError { .. }
            | RealtyError::MissingConfigError { .. } => "Review the configuration file",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read or write data: {}", self),
            ErrorCategory::Data => format!("Dataset is inconsistent: {}", self),
            ErrorCategory::Query => format!("Query failed: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, RealtyError>;
