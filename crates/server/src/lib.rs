//! Pantry Server - HTTP REST API for ingredient-to-inventory matching
//!
//! Exposes the [`pantry_match`] engine over JSON:
//!
//! - **Ingredient Matching**: rank inventory products for one recipe ingredient
//! - **Recipe Availability**: classify a whole recipe and report coverage
//! - **Health & Metrics**: liveness/readiness probes and Prometheus metrics
//!
//! Configuration comes from an optional `server` file and `PANTRY_SERVER__*`
//! environment variables. The engine itself (normalizer and taxonomy source)
//! is configured by the YAML file named in `engine_config_path`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe with taxonomy statistics
//! - `GET /metrics` - Prometheus metrics
//! - `POST /api/v1/ingredients/match` - Match one ingredient
//! - `POST /api/v1/recipes/availability` - Check recipe availability
//!
//! Errors share one body shape: `{"error": "...", "code": "..."}`.

pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
