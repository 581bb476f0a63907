//! Request extractors with JSON error envelopes.
//!
//! - [`Json`]: body deserialization, rejections become `400` envelopes
//! - [`Path`]: path parameter extraction with the same treatment

pub mod reject;

pub use crate::extract::reject::{Json, Path};
