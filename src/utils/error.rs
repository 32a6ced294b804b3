use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported file format: '{extension}' (supported: {supported})")]
    UnsupportedFormat { extension: String, supported: String },

    #[error("Format '{extension}' can only be used for saving")]
    LoadNotSupported { extension: String },

    #[error("File is not valid UTF-8 text: {path}")]
    EncodingError { path: String },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("{message}")]
    NoSelection { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ShopError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Format,
    Io,
    UserInput,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ShopError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn no_selection(message: impl Into<String>) -> Self {
        Self::NoSelection {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CsvError(_)
            | Self::JsonError(_)
            | Self::UnsupportedFormat { .. }
            | Self::LoadNotSupported { .. } => ErrorCategory::Format,
            Self::IoError(_) | Self::EncodingError { .. } => ErrorCategory::Io,
            Self::InvalidInput { .. } | Self::NoSelection { .. } => ErrorCategory::UserInput,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    /// Nothing in an editing session is fatal; only a broken configuration
    /// stops the binary before the session starts.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::UserInput => ErrorSeverity::Low,
            ErrorCategory::Format => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not access the file: {}", e),
            Self::CsvError(e) => format!("The CSV file could not be read: {}", e),
            Self::JsonError(e) => format!("The JSON document is malformed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => "Use a .csv, .txt or .json file (or .pdf when saving)",
            Self::LoadNotSupported { .. } => "PDF is export-only; load a .csv, .txt or .json file",
            Self::IoError(_) => "Check that the path exists and that you have permission to use it",
            Self::EncodingError { .. } => "Re-save the file as UTF-8 text",
            Self::CsvError(_) | Self::JsonError(_) => "Check the file contents against the expected layout",
            Self::InvalidInput { .. } => "Enter a number for price and a whole number for quantity",
            Self::NoSelection { .. } => "Use 'select <row>' first",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the settings file or run without --config"
            }
        }
    }
}
