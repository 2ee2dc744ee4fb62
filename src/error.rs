use thiserror::Error;

#[derive(Error, Debug)]
pub enum WikiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Merge conflict at \"{path}\": cannot combine {left} with {right}")]
    MergeConflict {
        path: String,
        left: String,
        right: String,
    },
}

pub type WikiResult<T> = Result<T, WikiError>;
