use thiserror::Error;

#[derive(Error, Debug)]
pub enum UispectError {
    /// A batch was rejected because one record lacks a string `class` or locator.
    #[error("missing class or locator: record {index} needs string 'class' and '{field}'")]
    Validation { index: usize, field: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, UispectError>;
