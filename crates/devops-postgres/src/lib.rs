#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Target for `SELECT 1` failures.
pub const TRACING_TARGET_QUERY: &str = "devops_postgres::queries";

/// Target for pool construction and checkout.
pub const TRACING_TARGET_CONNECTION: &str = "devops_postgres::connection";

mod client;
mod error;

pub use crate::client::{PgClient, PgConfig, PgPoolStatus};
pub use crate::error::{PgError, PgResult};
