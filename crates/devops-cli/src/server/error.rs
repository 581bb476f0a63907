//! Why the server failed to start or stopped.

use std::io;

use thiserror::Error;

pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Fatal server failure, logged with a code and a hint before the process exits.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("Server error: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    pub fn invalid_config(error: &anyhow::Error) -> Self {
        Self::InvalidConfig(format!("{error:#}"))
    }

    pub fn bind_error(address: impl Into<String>, source: io::Error) -> Self {
        Self::BindError {
            address: address.into(),
            source,
        }
    }

    /// Stable identifier attached to the error log line.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "invalid_config",
            Self::BindError { .. } => "bind_failed",
            Self::Runtime(_) => "serve_failed",
        }
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::InvalidConfig(_) => None,
            Self::BindError { source, .. } | Self::Runtime(source) => Some(source.kind()),
        }
    }

    /// Whether restarting with the same configuration could succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.io_kind(),
            Some(
                io::ErrorKind::AddrInUse
                    | io::ErrorKind::AddrNotAvailable
                    | io::ErrorKind::Interrupted
                    | io::ErrorKind::TimedOut
            )
        )
    }

    pub fn suggestion(&self) -> Option<&'static str> {
        if let Self::InvalidConfig(_) = self {
            return Some("Check the flags and environment variables listed by --help");
        }

        match self.io_kind()? {
            io::ErrorKind::AddrInUse => Some("Another process holds the port, set PORT to a free one"),
            io::ErrorKind::AddrNotAvailable => Some("HOST is not an address of this machine"),
            io::ErrorKind::PermissionDenied => Some("Bind to a port above 1024 or grant the privilege"),
            io::ErrorKind::TimedOut => Some("The network timed out, retry once it is reachable"),
            _ if matches!(self, Self::BindError { .. }) => {
                Some("Check the network configuration and firewall rules")
            }
            _ => None,
        }
    }
}
