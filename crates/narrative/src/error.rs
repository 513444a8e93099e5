use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarrativeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Narrative service returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Invalid narrative response: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, NarrativeError>;
