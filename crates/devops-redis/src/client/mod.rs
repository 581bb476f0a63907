//! Redis client with lazy connection handling and bounded command execution.

mod redis_client;
mod redis_config;

pub use redis_client::RedisClient;
pub use redis_config::RedisConfig;
