//! Error handling for `discord_structs`, mainly through the [`Error`](Error) enum.

use thiserror::Error;

use crate::http::{ApiErrorMessage, TooManyRequests};
use crate::serde_utils;

/// Anything that can go wrong turning Discord's responses (or your configuration) into the
/// structures in this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("bad json: {0}")]
    Json(#[from] serde_utils::Error),
    #[error("Discord error: {0}")]
    Discord(#[from] ApiErrorMessage),
    #[error("rate limited: {0}")]
    RateLimited(#[from] TooManyRequests),
    #[error("status code `{status}`: {body}")]
    Http { status: u16, body: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Header(#[from] HeaderError),
}

impl Error {
    /// Classify the body of an unsuccessful REST response.
    ///
    /// A `429` with a rate limit body is [`RateLimited`](Self::RateLimited), a JSON error object is
    /// [`Discord`](Self::Discord), and anything else (including a body that fails to parse) is kept
    /// as [`Http`](Self::Http) along with the raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        const TOO_MANY_REQUESTS: u16 = 429;

        if status == TOO_MANY_REQUESTS {
            if let Ok(rate_limit) = serde_utils::nice_from_str::<TooManyRequests>(body) {
                return Self::RateLimited(rate_limit);
            }
        }
        match serde_utils::nice_from_str::<ApiErrorMessage>(body) {
            Ok(error) => Self::Discord(error),
            Err(e) => {
                log::debug!("unrecognized error body for status {}: {}", status, e);
                Self::Http { status, body: body.to_string() }
            }
        }
    }
}

/// Invalid settings in a [`SessionConfig`](crate::gateway::session::SessionConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("shard id {id} is out of range for a shard count of {count}")]
    ShardOutOfRange { id: u32, count: u32 },
    #[error("shard count must be at least 1")]
    NoShards,
    #[error("a token is required")]
    MissingToken,
}

/// A rate limit header that was present but couldn't be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed `{name}` header: {value:?}")]
pub struct HeaderError {
    pub name: &'static str,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::http::ErrorCode;

    use super::*;

    #[test]
    fn rate_limited() {
        let error = Error::from_response(429, r#"{
            "message": "You are being rate limited.",
            "retry_after": 64.375,
            "global": false
        }"#);
        match error {
            Error::RateLimited(rl) => {
                assert_eq!(rl.retry_after, Duration::from_secs(64) + Duration::from_millis(375));
                assert!(!rl.global);
            }
            other => panic!("expected rate limit, got {other:?}"),
        }
    }

    #[test]
    fn discord_error() {
        let error = Error::from_response(404, r#"{"message": "Unknown Channel", "code": 10003}"#);
        match error {
            Error::Discord(e) => {
                assert_eq!(e.code, ErrorCode::UnknownChannel);
                assert_eq!(e.message, "Unknown Channel");
            }
            other => panic!("expected discord error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_code_kept() {
        let error = Error::from_response(400, r#"{"message": "something new", "code": 99999}"#);
        assert!(matches!(error, Error::Discord(e) if e.code == ErrorCode::Unknown(99999)));
    }

    #[test]
    fn plain_body() {
        let error = Error::from_response(502, "<html>Bad Gateway</html>");
        match error {
            Error::Http { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "<html>Bad Gateway</html>");
            }
            other => panic!("expected http error, got {other:?}"),
        }
    }
}
