use thiserror::Error;

/// Validation errors for domain inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter or '^': '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid period '{value}', expected one of 1d, 1w, 3mo, 1y")]
    InvalidPeriod { value: String },
    #[error("invalid sentiment '{value}', expected one of bullish, bearish, neutral")]
    InvalidSentiment { value: String },
    #[error("invalid impact tier '{value}', expected one of high, medium, low")]
    InvalidImpact { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("price point high must be >= low")]
    InvalidPointRange,
    #[error("price point open/close must be within high/low range")]
    InvalidPointBounds,

    #[error("look-back window must be at least one day")]
    InvalidLookback,
}

/// Errors surfaced by [`crate::MarketDataClient`] operations.
///
/// Cache read/write problems never appear here: they are soft failures that
/// degrade to a cache miss.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Non-2xx backend response. `message` is the server's `error` field when
    /// the body carried one, otherwise `HTTP {status}`.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request itself failed: connect, timeout, or read error.
    #[error("transport error: {0}")]
    Transport(String),

    /// A 2xx body that does not decode into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Status code for API errors, `None` for everything else.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_server_message_only() {
        let error = ClientError::Api {
            status: 429,
            message: String::from("rate limited"),
        };
        assert_eq!(error.to_string(), "rate limited");
        assert_eq!(error.status(), Some(429));
    }

    #[test]
    fn transport_error_has_no_status() {
        let error = ClientError::Transport(String::from("connection refused"));
        assert_eq!(error.status(), None);
    }
}
