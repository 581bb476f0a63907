//! Pooled PostgreSQL client and its settings.

mod pg_client;
mod pg_config;

use deadpool::managed::{Object, Pool};
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
pub use pg_client::{PgClient, PgPoolStatus};
pub use pg_config::PgConfig;

/// Pool of lazily opened diesel-async connections.
pub(crate) type ConnectionPool = Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// A connection checked out of [`ConnectionPool`].
pub(crate) type PooledConnection = Object<AsyncDieselConnectionManager<AsyncPgConnection>>;
