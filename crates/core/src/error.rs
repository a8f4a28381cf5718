#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no symptoms provided")]
    EmptyTranscript,
    #[error("unknown condition: {0}")]
    UnknownCondition(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] medvoice_catalog::CatalogError),

    #[error("failed to read transcript: {0}")]
    TranscriptRead(std::io::Error),
    #[error("failed to write document (path: {path}): {source}", path = path.display())]
    FileWrite {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize consultation: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to build PDF: {0}")]
    Pdf(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
