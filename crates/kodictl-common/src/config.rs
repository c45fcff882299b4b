//! Configuration model for controllable devices.
//!
//! The config file is a TOML document with one table per device, mirroring
//! the classic INI layout:
//!
//! ```toml
//! [livingroom]
//! ip = "192.168.1.50"
//! port = "8080"
//! user = "kodi"
//! pass = "secret"
//! ```
//!
//! All four keys are required strings. Validation happens entirely at load
//! time: a section missing a key or carrying a non-numeric port fails
//! [`Config::load`], never a later lookup.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{KodictlError, Result};

/// Raw on-disk shape of one device section. All values are strings, as in
/// the INI-style files this format descends from.
#[derive(Debug, Clone, Deserialize)]
pub struct HostEntry {
    /// Host address (IP or hostname).
    pub ip: String,
    /// TCP port of the JSON-RPC endpoint, as a string.
    pub port: String,
    /// Basic-auth username.
    pub user: String,
    /// Basic-auth password.
    pub pass: String,
}

/// A validated device endpoint, immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTarget {
    /// Host address (IP or hostname).
    pub host: String,
    /// TCP port of the JSON-RPC endpoint.
    pub port: u16,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
}

/// Parsed and validated configuration: a map from host name to its target.
#[derive(Debug, Clone, Default)]
pub struct Config {
    devices: BTreeMap<String, DeviceTarget>,
}

impl Config {
    /// Loads and validates the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, a
    /// section is missing one of `ip`/`port`/`user`/`pass`, or a port does
    /// not parse as a TCP port number.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KodictlError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from an in-memory TOML string.
    ///
    /// # Errors
    ///
    /// Same validation as [`Config::load`], minus the file read.
    pub fn parse(content: &str) -> Result<Self> {
        let sections: BTreeMap<String, HostEntry> = toml::from_str(content)?;
        let mut devices = BTreeMap::new();
        for (name, entry) in sections {
            let port = entry.port.parse::<u16>().map_err(|_| KodictlError::Config {
                message: format!("host {name}: port {:?} is not a TCP port", entry.port),
            })?;
            let target = DeviceTarget {
                host: entry.ip,
                port,
                username: entry.user,
                password: entry.pass,
            };
            let _ = devices.insert(name, target);
        }
        tracing::debug!(hosts = devices.len(), "configuration loaded");
        Ok(Self { devices })
    }

    /// Returns the configured host names in sorted order.
    pub fn host_names(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }

    /// Looks up the device target for a named host.
    #[must_use]
    pub fn device(&self, name: &str) -> Option<&DeviceTarget> {
        self.devices.get(name)
    }

    /// Returns `true` when no hosts are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
