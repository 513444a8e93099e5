use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Workbook decode failed: {0}")]
    Workbook(String),

    #[error("Worksheet '{name}' not found (available: {available})")]
    MissingSheet { name: String, available: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Status file error: {0}")]
    StatusFile(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;

impl IngestError {
    pub fn workbook(msg: impl Into<String>) -> Self {
        Self::Workbook(msg.into())
    }

    pub fn missing_sheet(name: impl Into<String>, available: &[String]) -> Self {
        Self::MissingSheet {
            name: name.into(),
            available: available.join(", "),
        }
    }
}
