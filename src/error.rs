use std::path::PathBuf;
use thiserror::Error;

// Error types for fare response processing
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Missing required field: <{tag}>")]
    MissingField { tag: &'static str },

    #[error("Malformed timestamp in <{tag}>: {value:?}")]
    MalformedTimestamp {
        tag: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("XML parse error: {0}")]
    DocumentParse(String),

    #[error("Itinerary #{itinerary} has no onward flights")]
    EmptyOnwardLegs { itinerary: usize },

    #[error("Invalid extractor configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<ProcessingError>,
    },
}

impl ProcessingError {
    /// Stable name of the error kind, looking through the per-file wrapper.
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessingError::MissingField { .. } => "MissingFieldError",
            ProcessingError::MalformedTimestamp { .. } => "MalformedTimestampError",
            ProcessingError::DocumentParse(_) => "DocumentParseError",
            ProcessingError::EmptyOnwardLegs { .. } => "EmptyOnwardLegsError",
            ProcessingError::InvalidConfig(_) => "InvalidConfigError",
            ProcessingError::IoError(_) => "IoError",
            ProcessingError::JsonError(_) => "JsonError",
            ProcessingError::File { source, .. } => source.kind(),
        }
    }

    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            ProcessingError::File { .. } => self,
            other => ProcessingError::File {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessingError>;
