//! Remote gateway for the backlog service.
//!
//! One operation per remote resource, no retries and no caching. The
//! [`Gateway`] trait is the seam the session core is generic over;
//! [`HttpGateway`] is the reqwest-backed implementation.

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod types;

pub use client::HttpGateway;
pub use config::{
    ClientConfig, ConfigSource, ConfigSources, config_path, config_sources, save_to_file,
};
pub use error::ClientError;
pub use gateway::Gateway;
pub use types::{Deleted, GameChildAdded, HealthStatus};
