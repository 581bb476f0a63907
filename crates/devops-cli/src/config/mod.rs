//! Command line and environment settings.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig         # Host, port, shutdown
//! ├── middleware: MiddlewareConfig # OpenAPI, recovery/timeouts
//! └── service: ServiceConfig       # App version, Redis, PostgreSQL
//! ```
//!
//! Every flag has an environment variable fallback, listed by `--help`.

mod middleware;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use devops_server::service::ServiceConfig;
pub use middleware::MiddlewareConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Everything the binary reads at startup.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "devops-app")]
#[command(about = "Health-checked demo microservice backed by Redis and PostgreSQL")]
#[command(version)]
pub struct Cli {
    /// Listener address and shutdown drain.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// Docs routes and request timeout.
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// App version and the Redis and PostgreSQL clients.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Parses the arguments after loading `.env`, so its values feed clap's
    /// `env` fallbacks.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        // Tracing is not installed yet.
        match dotenvy::dotenv() {
            Err(error) if !error.not_found() => {
                eprintln!("Warning: ignoring unreadable .env file: {error}");
            }
            _ => {}
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Installs the fmt subscriber, filtered by `RUST_LOG` (default `info`).
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates the settings the server cannot start without.
    ///
    /// Invalid collaborator settings only produce a warning: the affected
    /// client is left out of the state and `/ready` reports it.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;

        if let Err(error) = self.service.validate() {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                error = %error,
                service = ?error.service(),
                "Invalid service configuration, serving without the affected collaborator"
            );
        }

        Ok(())
    }

    /// Logs every setting; passwords only appear masked.
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            app_version = %self.service.app_version,
            redis = %self.service.redis_config,
            postgres = %self.service.postgres_config,
            "Service configuration"
        );
    }

    fn log_build_info() {
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            "Starting devops-app"
        );

        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
