use thiserror::Error;

/// Convenient result alias for the fuel estimation library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an estimation precondition or a record field is violated.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Raised when a configuration value (such as the fuel price) is rejected.
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    /// Raised when a vehicle id could not be found in the store.
    #[error("unknown vehicle id: {id}{}", format_suggestions(.suggestions))]
    UnknownVehicle {
        id: String,
        suggestions: Vec<String>,
    },

    /// Raised when adding a vehicle whose id is already registered.
    #[error("vehicle {id} already exists")]
    DuplicateVehicle { id: String },

    /// Raised when a mission preset name could not be found in the store.
    #[error("unknown preset: {name}{}", format_suggestions(.suggestions))]
    UnknownPreset {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a history entry does not exist.
    #[error("calculation {id} not found")]
    CalculationNotFound { id: i64 },

    /// Raised when a user attempts to delete another user's history entry.
    #[error("calculation {id} does not belong to {user}")]
    NotOwner { id: i64, user: String },

    /// Raised when an export is requested for an empty record set.
    #[error("no calculations to export")]
    NothingToExport,

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the database")]
    ProjectDirsUnavailable,

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV writer errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
