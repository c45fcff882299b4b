//! # kodictl-rpc
//!
//! Remote Control Client for JSON-RPC media players (Kodi and compatible).
//!
//! Provides the closed set of navigation commands, the request envelope,
//! and a strictly synchronous one-shot HTTP client. A failed call is
//! classified, reported, and absorbed; it never escapes as a hard error,
//! so the interactive session above this crate cannot be broken by one
//! unreachable device.

pub mod client;
pub mod command;

pub use client::{RemoteClient, RpcError};
pub use command::RemoteCommand;
