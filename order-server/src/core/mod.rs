//! Core module - configuration, shared state and the HTTP server
//!
//! - [`Config`] - environment configuration
//! - [`ServerState`] - shared handles (database, cache, JWT)
//! - [`Server`] - HTTP listener with graceful shutdown

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
