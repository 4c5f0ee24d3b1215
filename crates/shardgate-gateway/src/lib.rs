//! # Shardgate Gateway
//!
//! HTTP gateway that exposes a bucket/object API and shards every
//! request across a fleet of independent object-storage backends.
//!
//! This crate provides:
//! - **Gateway handlers**: create/delete bucket, put/get/delete object,
//!   health check
//! - **Admission gate**: one shared token-bucket rate limiter in front
//!   of all handlers
//! - **Error translation**: backend error codes mapped to gateway HTTP
//!   outcomes at the handler boundary
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   HTTP Clients                      │
//! └─────────────────────────┬───────────────────────────┘
//!                           │
//! ┌─────────────────────────▼───────────────────────────┐
//! │                 Shardgate Gateway                   │
//! ├─────────────────────────────────────────────────────┤
//! │  Request Log │ Admission Gate │ Gateway Handlers    │
//! ├─────────────────────────────────────────────────────┤
//! │                  shardgate-store                    │
//! │     (registry, shard selection, backend clients)    │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use server::{run_server, run_server_with_shutdown};
pub use state::AppState;
