#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown symptom: {0}")]
    UnknownSymptom(String),
    #[error("invalid rule table: {0}")]
    InvalidRuleTable(String),
    #[error(
        "failed to open diagnosis log (path: {path}): {source}",
        path = path.display()
    )]
    LogOpen {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read diagnosis log: {0}")]
    LogRead(csv::Error),
    #[error("failed to write diagnosis log: {0}")]
    LogWrite(csv::Error),
    #[error("failed to flush diagnosis log: {0}")]
    LogFlush(std::io::Error),
}

pub type CheckerResult<T> = std::result::Result<T, CheckerError>;
