use thiserror::Error;

#[derive(Error, Debug)]
pub enum BooklogError {
    #[error("Unknown field path: {0}")]
    UnknownField(String),

    #[error("Field '{path}' expects {expected}")]
    TypeMismatch { path: String, expected: &'static str },

    #[error("Invalid value '{value}' for field '{path}'")]
    InvalidValue { path: String, value: String },

    #[error("Quote index {index} out of range ({len} quotes)")]
    QuoteOutOfRange { index: usize, len: usize },

    #[error("Cannot remove the last quote")]
    LastQuote,

    #[error("Invalid step: {0}. Expected a number from 1 to 5")]
    InvalidStep(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Step {step} has {count} invalid field(s)")]
    StepIncomplete { step: u8, count: usize },

    #[error("Unknown command: {0}. Type 'help' for a list of commands")]
    UnknownCommand(String),

    #[error("Invalid option catalog: {0}. Expected 'titles' or 'authors'")]
    InvalidCatalog(String),

    #[error("No option matches '{0}'")]
    NoMatchingOption(String),

    #[error("The preview projector must be created inside a Tokio runtime")]
    MissingRuntime,

    #[error("Storage keys '{first}' and '{second}' both map to {file}")]
    KeyCollision {
        first: String,
        second: String,
        file: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, BooklogError>;
