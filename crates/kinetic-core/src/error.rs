use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Gesture trace error: {0}")]
    Trace(String),
}

pub type Result<T> = std::result::Result<T, Error>;
