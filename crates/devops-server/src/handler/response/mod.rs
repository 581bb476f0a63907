//! Response types for HTTP handlers.

mod cache;
mod errors;
mod monitors;
mod users;

pub use cache::CacheEntry;
pub use errors::ErrorResponse;
pub use monitors::{Health, HealthStatus, Readiness, ReadinessStatus};
pub use users::{User, UserCreated, UserList};
