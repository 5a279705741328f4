use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrantError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("No grant records in input: {0}")]
    EmptyInput(String),
}

pub type Result<T> = std::result::Result<T, GrantError>;
