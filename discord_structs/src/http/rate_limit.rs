use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::HeaderError;
use crate::lossy::{retry_after_from_secs, retry_after_to_secs};

/// The body of a `429 Too Many Requests` response.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "RawTooManyRequests", into = "RawTooManyRequests")]
pub struct TooManyRequests {
    pub bucket: Option<String>,
    /// a message saying you are being rate limited
    pub message: String,
    /// how long to wait before making another request
    pub retry_after: Duration,
    /// whether every request is limited, not just ones in this bucket
    pub global: bool,
}

impl fmt::Display for TooManyRequests {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (retry after {:?}", self.message, self.retry_after)?;
        if self.global {
            f.write_str(", global")?;
        }
        if let Some(bucket) = &self.bucket {
            write!(f, ", bucket {}", bucket)?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for TooManyRequests {}

// the wire shape of `TooManyRequests`, with `retry_after` in (fractional) seconds
#[derive(Deserialize, Serialize)]
struct RawTooManyRequests {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bucket: Option<String>,
    message: String,
    retry_after: f64,
    #[serde(default)]
    global: bool,
}

impl From<RawTooManyRequests> for TooManyRequests {
    fn from(RawTooManyRequests { bucket, message, retry_after, global }: RawTooManyRequests) -> Self {
        Self {
            bucket,
            message,
            retry_after: retry_after_from_secs(retry_after),
            global,
        }
    }
}

impl From<TooManyRequests> for RawTooManyRequests {
    fn from(TooManyRequests { bucket, message, retry_after, global }: TooManyRequests) -> Self {
        Self {
            bucket,
            message,
            retry_after: retry_after_to_secs(retry_after),
            global,
        }
    }
}

/// The `X-RateLimit-*` headers on a REST response. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitHeaders {
    /// the number of requests that can be made
    pub limit: Option<u32>,
    /// the number of remaining requests that can be made
    pub remaining: Option<u32>,
    /// how long until the rate limit resets
    pub reset_after: Option<Duration>,
    /// a unique string denoting the rate limit being encountered
    pub bucket: Option<String>,
    /// whether this is a global rate limit
    pub global: bool,
    /// `user`, `global`, or `shared`
    pub scope: Option<String>,
}

impl RateLimitHeaders {
    const LIMIT: &'static str = "X-RateLimit-Limit";
    const REMAINING: &'static str = "X-RateLimit-Remaining";
    const RESET_AFTER: &'static str = "X-RateLimit-Reset-After";
    const BUCKET: &'static str = "X-RateLimit-Bucket";
    const GLOBAL: &'static str = "X-RateLimit-Global";
    const SCOPE: &'static str = "X-RateLimit-Scope";

    /// Read the rate limit headers out of a response's headers. Header names are matched
    /// case-insensitively and headers that aren't about rate limits are ignored.
    pub fn from_headers<'a, I>(headers: I) -> Result<Self, HeaderError>
        where I: IntoIterator<Item=(&'a str, &'a str)>,
    {
        let mut rate_limit = Self::default();
        for (name, value) in headers {
            let value = value.trim();
            if name.eq_ignore_ascii_case(Self::LIMIT) {
                rate_limit.limit = Some(parse(Self::LIMIT, value)?);
            } else if name.eq_ignore_ascii_case(Self::REMAINING) {
                rate_limit.remaining = Some(parse(Self::REMAINING, value)?);
            } else if name.eq_ignore_ascii_case(Self::RESET_AFTER) {
                let secs: f64 = parse(Self::RESET_AFTER, value)?;
                if !secs.is_finite() || secs < 0.0 {
                    return Err(error(Self::RESET_AFTER, value));
                }
                rate_limit.reset_after = Some(retry_after_from_secs(secs));
            } else if name.eq_ignore_ascii_case(Self::BUCKET) {
                rate_limit.bucket = Some(value.to_string());
            } else if name.eq_ignore_ascii_case(Self::GLOBAL) {
                rate_limit.global = parse(Self::GLOBAL, value)?;
            } else if name.eq_ignore_ascii_case(Self::SCOPE) {
                rate_limit.scope = Some(value.to_string());
            }
        }
        Ok(rate_limit)
    }

    /// How long to wait before the next request in this bucket, if there are no requests left.
    pub fn limit(&self) -> Option<Duration> {
        match self.remaining {
            Some(0) => Some(self.reset_after.unwrap_or(Duration::ZERO)),
            _ => None,
        }
    }
}

fn parse<T: FromStr>(name: &'static str, value: &str) -> Result<T, HeaderError> {
    value.parse().map_err(|_| error(name, value))
}

fn error(name: &'static str, value: &str) -> HeaderError {
    HeaderError { name, value: value.to_string() }
}
