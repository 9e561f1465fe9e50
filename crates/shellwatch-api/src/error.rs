use thiserror::Error;

/// Top-level error type for the `shellwatch-api` crate.
///
/// Covers every failure mode of a status fetch: transport, upstream HTTP
/// status, envelope rejection, and deserialization. `shellwatch-core` maps
/// these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The cloud rejected the auth token (HTTP 401/403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Upstream ────────────────────────────────────────────────────
    /// Non-200 HTTP response from the cloud endpoint.
    #[error("Cloud API returned HTTP {status}")]
    Status { status: u16 },

    /// The cloud answered with `isok: false` in an otherwise well-formed
    /// envelope. Kept distinct from [`Error::Deserialization`] so callers
    /// can alarm on it separately.
    #[error("Cloud API rejected the request: {message}")]
    Rejected { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
