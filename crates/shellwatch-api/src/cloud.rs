// Shelly Cloud HTTP client
//
// Wraps `reqwest::Client` with cloud-shard URL construction and envelope
// unwrapping. One account token maps to one cloud shard
// (`https://{server}.shelly.cloud`); the token travels as the `auth_key`
// query parameter on every request.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::{DEFAULT_TIMEOUT, TransportConfig};
use crate::types::DeviceStatusMap;

/// Response envelope: `{ "isok": bool, "errors": {...}?, "data": {...}? }`.
#[derive(serde::Deserialize)]
struct StatusEnvelope {
    isok: bool,
    #[serde(default)]
    errors: Option<serde_json::Value>,
    #[serde(default)]
    data: Option<StatusData>,
}

#[derive(serde::Deserialize)]
struct StatusData {
    devices_status: DeviceStatusMap,
}

/// Async client for a single Shelly Cloud account.
///
/// Holds the shard base URL and the account auth token. Cheap to construct;
/// the underlying `reqwest::Client` pools connections per request scope.
pub struct CloudClient {
    http: reqwest::Client,
    base_url: Url,
    auth_key: SecretString,
    /// Configured fetch timeout, reported in [`Error::Timeout`].
    timeout: Duration,
}

impl CloudClient {
    /// Build a client for a cloud shard (e.g. `"shelly-32-eu"`).
    pub fn new(
        server: &str,
        auth_key: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("https://{server}.shelly.cloud"))?;
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            auth_key,
            timeout: transport.timeout,
        })
    }

    /// Build a client against an explicit base URL with a pre-built
    /// `reqwest::Client`. The seam used by tests to point at a mock server.
    pub fn with_base_url(http: reqwest::Client, base_url: Url, auth_key: SecretString) -> Self {
        Self {
            http,
            base_url,
            auth_key,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The shard base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the status of every device on the account.
    ///
    /// `POST {base}/device/all_status?auth_key={token}`. Returns the ordered
    /// device map from `data.devices_status` on success. A non-200 status,
    /// a garbled body, or `isok: false` each map to their own [`Error`]
    /// variant -- the caller decides whether any of them is fatal.
    pub async fn all_status(&self) -> Result<DeviceStatusMap, Error> {
        let url = self
            .base_url
            .join("device/all_status")
            .map_err(Error::InvalidUrl)?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .query(&[("auth_key", self.auth_key.expose_secret())])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: format!("cloud rejected auth token (HTTP {})", status.as_u16()),
            });
        }
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;
        let envelope: StatusEnvelope = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        if !envelope.isok {
            let message = envelope
                .errors
                .map_or_else(|| "isok=false".to_owned(), |errs| errs.to_string());
            return Err(Error::Rejected { message });
        }

        let data = envelope.data.ok_or_else(|| Error::Deserialization {
            message: "isok=true but `data.devices_status` is missing".into(),
            body,
        })?;

        Ok(data.devices_status)
    }

    /// Classify a `reqwest` failure, attributing timeouts to the
    /// configured fetch bound.
    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}
