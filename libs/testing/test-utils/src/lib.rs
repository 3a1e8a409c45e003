//! Shared test infrastructure.
//!
//! Container-backed dependencies for integration tests. Tests using
//! these helpers need a local Docker daemon.

mod redis;

pub use redis::TestRedis;
