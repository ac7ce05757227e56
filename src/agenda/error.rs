use thiserror::Error;

/// Input that the store refuses to persist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Invalid date/time '{0}': use DD/MM/YYYY HH:MM")]
    InvalidDateTime(String),
}

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Appointment not found: {0}")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Could not open appointment store at {path}: {source}")]
    Startup {
        path: String,
        #[source]
        source: Box<AgendaError>,
    },
}

impl AgendaError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AgendaError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AgendaError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, AgendaError>;
