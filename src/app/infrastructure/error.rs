use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structured text that isn't valid JSON, or whose `fields` entry isn't a field list
    #[error("Error parsing JSON: {0}")]
    DocumentParse(String),

    /// Valid JSON with no `fields` list
    #[error("Invalid JSON format! Please check your JSON content.")]
    MissingFields,

    #[error("Image error: {0}")]
    Image(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;
