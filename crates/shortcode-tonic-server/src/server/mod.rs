//! Server wiring: configuration, telemetry, the store snapshot source, and
//! the gRPC service implementation.

pub mod config;
pub mod service;
pub mod store;
pub mod telemetry;
