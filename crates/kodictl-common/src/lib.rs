//! # kodictl-common
//!
//! Shared error definitions, configuration model, and constants used across
//! the kodictl workspace.
//!
//! This crate is the leaf of the dependency graph — it depends on no other
//! internal crate and provides the foundational primitives that the RPC
//! client and CLI build upon.

pub mod config;
pub mod constants;
pub mod error;
