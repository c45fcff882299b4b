//! System-wide constants and default paths.

use std::path::PathBuf;
use std::time::Duration;

/// Application name used in CLI output and the config path.
pub const APP_NAME: &str = "kodictl";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "kodictl";

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "KODICTL_CONFIG";

/// HTTP path of the JSON-RPC endpoint on the device.
pub const JSONRPC_PATH: &str = "/jsonrpc";

/// JSON-RPC protocol version tag sent in every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Fixed request identifier; responses are never correlated, so a constant
/// id matches the one-shot call model.
pub const REQUEST_ID: &str = "1";

/// How long a single RPC call may block before the transport gives up.
/// This is also the only cancellation mechanism for an in-flight call.
pub const RPC_TIMEOUT: Duration = Duration::from_secs(5);

/// Returns the configuration file path for this session.
///
/// Prefers `$KODICTL_CONFIG`, then `$HOME/.config/kodictl/config.toml`
/// (or `%USERPROFILE%` on Windows), falling back to a relative
/// `config.toml` when no home directory can be determined.
pub fn config_path() -> PathBuf {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(explicit);
    }
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_NAME)
            .join("config.toml");
    }
    PathBuf::from("config.toml")
}
