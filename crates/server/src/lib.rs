//! Review sentiment server - HTTP front end for the sentiment classifier
//!
//! This crate serves a pre-trained TF-IDF + logistic regression model over
//! HTTP. Both artifacts are loaded once at startup and shared read-only by
//! every request.
//!
//! # Features
//!
//! - **HTML form**: submit a review and see `Positive` or `Negative`
//! - **JSON API**: `POST /predict` with `review_text`, answers `positive`/`negative`
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: Environment variable and file-based configuration
//! - **Graceful Shutdown**: Ctrl+C and SIGTERM
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
//! # Endpoints
//!
//! - `GET /` - Review form
//! - `POST /` - Classify a form-encoded `review_text`, render the result
//! - `POST /predict` - Classify `review_text` (JSON or form), JSON response
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe with artifact digests
//! - `GET /metrics` - Prometheus metrics

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod view;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
