//! One-shot JSON-RPC calls over HTTP with basic authentication.
//!
//! `try_call` performs exactly one POST and classifies the outcome;
//! `call` is the absorb-and-report wrapper the session loop uses, turning
//! every failure into a printed diagnostic plus a `None` sentinel. There
//! are no retries and no connection state between calls.

use kodictl_common::config::DeviceTarget;
use kodictl_common::constants::{JSONRPC_PATH, JSONRPC_VERSION, REQUEST_ID, RPC_TIMEOUT};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::command::RemoteCommand;

/// Classified failure of a single RPC call.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client initialization failed: {message}")]
    Init {
        /// Description from the underlying builder.
        message: String,
    },

    /// The device could not be reached (unreachable host, refused
    /// connection, or timeout). Usually an invalid host or port.
    #[error("cannot reach {url}: {message}")]
    Transport {
        /// Endpoint URL that was attempted.
        url: String,
        /// Description of the transport failure.
        message: String,
    },

    /// The device rejected the configured credentials (HTTP 401).
    #[error("invalid user/password")]
    Unauthorized,

    /// The device answered with an unexpected HTTP status.
    #[error("device answered with HTTP {code}")]
    Status {
        /// The HTTP status code.
        code: u16,
    },

    /// The response body was not valid JSON.
    #[error("unreadable reply from device: {message}")]
    BadReply {
        /// Description of the decode failure.
        message: String,
    },
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    id: &'static str,
    jsonrpc: &'static str,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

impl<'a> RpcRequest<'a> {
    /// Builds the envelope for one method invocation.
    #[must_use]
    pub const fn new(method: &'a str, params: Option<Value>) -> Self {
        Self {
            id: REQUEST_ID,
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
        }
    }
}

/// Synchronous client bound to a single device for the session.
#[derive(Debug)]
pub struct RemoteClient {
    device: DeviceTarget,
    http: reqwest::blocking::Client,
}

impl RemoteClient {
    /// Creates a client for the given device target.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Init`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(device: DeviceTarget) -> Result<Self, RpcError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(RPC_TIMEOUT)
            .build()
            .map_err(|e| RpcError::Init {
                message: e.to_string(),
            })?;
        Ok(Self { device, http })
    }

    /// Returns the JSON-RPC endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "http://{}:{}{}",
            self.device.host, self.device.port, JSONRPC_PATH
        )
    }

    /// Performs exactly one POST of the request envelope and classifies
    /// the outcome. No retries.
    ///
    /// # Errors
    ///
    /// [`RpcError::Transport`] when the device cannot be reached,
    /// [`RpcError::Unauthorized`] on HTTP 401, [`RpcError::Status`] on any
    /// other non-success status, [`RpcError::BadReply`] when the body is
    /// not JSON.
    pub fn try_call(&self, method: &str, params: Option<Value>) -> Result<Value, RpcError> {
        let url = self.endpoint();
        let request = RpcRequest::new(method, params);
        tracing::debug!(%url, method, "sending rpc call");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.device.username, Some(&self.device.password))
            .json(&request)
            .send()
            .map_err(|e| RpcError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RpcError::Unauthorized);
        }
        if !status.is_success() {
            return Err(RpcError::Status {
                code: status.as_u16(),
            });
        }
        response.json().map_err(|e| RpcError::BadReply {
            message: e.to_string(),
        })
    }

    /// Absorb-and-report wrapper around [`Self::try_call`].
    ///
    /// On success returns the decoded reply; on any failure prints a
    /// human-readable diagnostic (authentication failures get their own
    /// message) and returns `None`. Never propagates an error, so a dead
    /// or misconfigured device cannot break the session loop. Diagnostics
    /// use explicit `\r\n` because the terminal is in raw mode while the
    /// session runs.
    pub fn call(&self, method: &str, params: Option<Value>) -> Option<Value> {
        match self.try_call(method, params) {
            Ok(reply) => {
                tracing::trace!(method, "rpc call succeeded");
                Some(reply)
            }
            Err(RpcError::Unauthorized) => {
                tracing::warn!(host = %self.device.host, "device rejected credentials");
                eprint!("invalid user/password for {}\r\n", self.device.host);
                None
            }
            Err(err) => {
                tracing::warn!(method, error = %err, "rpc call failed");
                eprint!("{err}\r\n");
                None
            }
        }
    }

    /// Sends one navigation command, discarding the reply payload.
    /// Returns `None` when the call failed (already reported).
    pub fn dispatch(&self, command: RemoteCommand) -> Option<Value> {
        self.call(command.method(), None)
    }
}
