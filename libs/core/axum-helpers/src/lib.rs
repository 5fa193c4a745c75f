//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web
//! applications.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, server startup, graceful shutdown
//! - **[`errors`]**: Wire-level error responses (`{message, code}`)
//! - **[`middleware`]**: Request middleware (usage accounting, security headers)
//! - **[`extractors`]**: Custom extractors (UUID path)
//! - **[`health`]**: Health and readiness check helpers
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod health;
pub mod middleware;
pub mod server;
pub mod shutdown;

// Re-export error types
pub use errors::{error_response, not_found, ErrorResponse};

// Re-export extractors
pub use extractors::UuidPath;

// Re-export health helpers
pub use health::{health_handler, run_health_checks, HealthCheckFuture, HealthResponse};

// Re-export middleware
pub use middleware::rate_usage::{track_usage, RateUsage, RateUsageTracker};
pub use middleware::security::security_headers;

// Re-export server types
pub use server::{create_app, create_production_app, create_router};
pub use shutdown::{shutdown_signal, ShutdownCoordinator};
