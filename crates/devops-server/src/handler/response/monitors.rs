//! Liveness and readiness response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Liveness status, always healthy when the process answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Response body of the liveness check.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Health {
    /// Always `healthy`.
    pub status: HealthStatus,
    /// Time the response was produced (RFC 3339, UTC).
    pub timestamp: Timestamp,
    /// Configured application version.
    pub version: String,
}

impl Health {
    /// Creates a healthy status stamped with the current time.
    pub fn now(version: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp: Timestamp::now(),
            version: version.into(),
        }
    }
}

/// Readiness status of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ReadinessStatus {
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "not ready")]
    NotReady,
}

/// Response body of the readiness check.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Readiness {
    /// Either `ready` or `not ready`.
    pub status: ReadinessStatus,
    /// Message of the first failing check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Readiness {
    /// All collaborators answered their checks.
    pub fn ready() -> Self {
        Self {
            status: ReadinessStatus::Ready,
            error: None,
        }
    }

    /// A check failed with the given message.
    pub fn not_ready(error: impl Into<String>) -> Self {
        Self {
            status: ReadinessStatus::NotReady,
            error: Some(error.into()),
        }
    }
}
