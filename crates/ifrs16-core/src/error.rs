use thiserror::Error;

#[derive(Debug, Error)]
pub enum Ifrs16Error {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Arithmetic overflow: {0} exceeds the supported decimal range")]
    ArithmeticOverflow(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Ifrs16Error {
    fn from(e: serde_json::Error) -> Self {
        Ifrs16Error::SerializationError(e.to_string())
    }
}
