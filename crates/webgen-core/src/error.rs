use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebgenError {
    #[error("{0}")]
    Validation(String),

    #[error("A project is already being generated")]
    Busy,

    #[error("Invalid API key: {0}")]
    Auth(String),

    #[error("AI returned an unexpected response: {0}")]
    Parse(String),

    #[error("Failed to generate project files: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WebgenError>;
