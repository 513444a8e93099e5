use renewal_ingest::IngestError;
use renewal_narrative::NarrativeError;
use renewal_records::RecordKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Ingest failed: {0}")]
    Ingest(#[from] IngestError),

    #[error("Narrative generation failed: {0}")]
    Narrative(#[from] NarrativeError),

    #[error("No {kind} row {row} in the loaded dataset")]
    UnknownRow { kind: RecordKind, row: usize },

    #[error("No records for customer '{0}'")]
    UnknownCustomer(String),

    #[error("Report sink failed: {0}")]
    Sink(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
