use thiserror::Error;

use marketdeck_core::{ClientError, ValidationError, WatchlistError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] ClientError),

    #[error(transparent)]
    Watchlist(#[from] WatchlistError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_)
            | Self::Fetch(ClientError::Validation(_))
            | Self::Watchlist(WatchlistError::Validation(_)) => 2,
            Self::Fetch(_) => 4,
            Self::Watchlist(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_exits_with_two_through_any_wrapper() {
        let direct = CliError::Validation(ValidationError::EmptySymbol);
        let wrapped = CliError::Fetch(ClientError::Validation(ValidationError::EmptySymbol));
        assert_eq!(direct.exit_code(), 2);
        assert_eq!(wrapped.exit_code(), 2);
    }

    #[test]
    fn fetch_failures_exit_with_four() {
        let error = CliError::Fetch(ClientError::Api {
            status: 502,
            message: String::from("HTTP 502"),
        });
        assert_eq!(error.exit_code(), 4);
    }
}
