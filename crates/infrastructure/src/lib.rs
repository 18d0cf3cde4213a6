//! Assay Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus environment-based
//! configuration and tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use config::{config_from_env, config_from_lookup};
pub use telemetry::init_tracing;
