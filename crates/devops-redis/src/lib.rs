#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for client-related operations.
///
/// Use this target for logging client construction and configuration events.
pub const TRACING_TARGET_CLIENT: &str = "devops_redis::client";

/// Tracing target for command execution.
pub const TRACING_TARGET_COMMAND: &str = "devops_redis::command";

mod client;
mod error;

pub use crate::client::{RedisClient, RedisConfig};
pub use crate::error::{RedisError, RedisResult};
