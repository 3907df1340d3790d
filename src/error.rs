use thiserror::Error;

#[derive(Error, Debug)]
pub enum KarteError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("nothing to convert: input text is empty")]
    EmptyInput,

    #[error("unknown output format: {name} (expected pretty, minified or jsonl)")]
    UnknownFormat { name: String },

    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KarteError>;
