use thiserror::Error;

/// Result of sniffing a subscription body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionContent {
    /// A Clash configuration dump carrying its own node list
    NativeConfig,
    /// Base64 payload, holding the decoded newline separated links
    Base64LinkList(String),
    Unrecognized,
}

/// Why a single proxy link could not be decoded
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unsupported link scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid base64 in {0}")]
    InvalidBase64(&'static str),

    #[error("missing '{delimiter}' in {field}")]
    MissingDelimiter {
        field: &'static str,
        delimiter: char,
    },

    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid port: {0:?}")]
    InvalidPort(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid link: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// Subscription level failure
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unsupported subscription format")]
    UnsupportedFormat,
}
