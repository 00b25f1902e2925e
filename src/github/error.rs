// src/github/error.rs
// =============================================================================
// Typed errors for the GitHub client.
//
// Why not just anyhow everywhere? Because two failures need to be told apart
// by code, not by humans reading a message:
// - A rate limit means "stop and tell the user when to come back / to set a
//   token" - retrying is pointless for up to an hour
// - Anything else is a transport failure the extraction engine may react to
//   by switching strategy
//
// Neither is ever retried automatically.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Any non-2xx response that is not a rate limit
    #[error("GitHub API returned HTTP {status}")]
    Transport { status: u16 },

    /// The 403 variant where X-RateLimit-Remaining has hit zero.
    /// `reset` is the unix timestamp (seconds) when the quota refills.
    #[error("GitHub API rate limit exceeded ({remaining} requests remaining)")]
    RateLimited { remaining: u64, reset: Option<i64> },

    /// The request never produced a usable response (DNS, TLS, timeout, or
    /// a body that would not parse)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}
