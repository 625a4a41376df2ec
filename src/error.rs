#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Carries the number as the caller wrote it. Integer queries wider than `i64` are clamped
    /// before the lookup, so their number is reported clamped.
    #[error("invalid status code: {0}")]
    UnknownStatusCode(String),

    #[error("invalid status message: \"{0}\"")]
    UnknownStatusMessage(String),

    #[error("code must be a number or string")]
    InvalidArgumentType,

    #[error("Status code '{0}' has an empty reason phrase")]
    EmptyReasonPhrase(u16),

    #[error("Reason phrase '{phrase}' is used by both '{first}' and '{second}'")]
    DuplicateReasonPhrase {
        phrase: String,
        first: u16,
        second: u16,
    },
}
