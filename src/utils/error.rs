use thiserror::Error;

#[derive(Error, Debug)]
pub enum FantasyError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown scoring entry: {key}")]
    UnknownStat { key: String },

    #[error("Invalid roster schema: {message}")]
    InvalidSchema { message: String },

    #[error("Unknown roster position: {position}")]
    UnknownPosition { position: String },

    #[error("Player {player} cannot be moved to {destination}")]
    IllegalMove { player: String, destination: String },

    #[error("No open slot at {position}")]
    SlotFull { position: String },

    #[error("Player {player} is not on the roster")]
    PlayerNotOnRoster { player: String },

    #[error("Draft error: {message}")]
    DraftError { message: String },

    #[error("Research error: {message}")]
    ResearchError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Data,
    Configuration,
    League,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FantasyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FantasyError::HttpError(_) | FantasyError::ResearchError { .. } => ErrorCategory::Network,
            FantasyError::IoError(_) => ErrorCategory::Io,
            FantasyError::CsvError(_)
            | FantasyError::SerializationError(_)
            | FantasyError::UnknownStat { .. } => ErrorCategory::Data,
            FantasyError::ConfigValidationError { .. }
            | FantasyError::InvalidConfigValueError { .. }
            | FantasyError::MissingConfigError { .. }
            | FantasyError::InvalidSchema { .. } => ErrorCategory::Configuration,
            FantasyError::UnknownPosition { .. }
            | FantasyError::IllegalMove { .. }
            | FantasyError::SlotFull { .. }
            | FantasyError::PlayerNotOnRoster { .. }
            | FantasyError::DraftError { .. } => ErrorCategory::League,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::League | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and retry; NFL.com may be rate limiting",
            ErrorCategory::Io => "Check that the file exists and that the output directory is writable",
            ErrorCategory::Data => "Check that the JSON/CSV input file is well formed",
            ErrorCategory::Configuration => "Review the league file and command-line arguments",
            ErrorCategory::League => "Review the roster slots and players involved in the operation",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FantasyError::HttpError(e) if e.is_timeout() => {
                "The request to NFL.com timed out".to_string()
            }
            FantasyError::HttpError(_) => "Could not reach NFL.com".to_string(),
            FantasyError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

impl From<toml::de::Error> for FantasyError {
    fn from(e: toml::de::Error) -> Self {
        FantasyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, FantasyError>;
