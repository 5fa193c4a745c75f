//! Application state management.
//!
//! The state is cloned for each handler (inexpensive Arc clones inside the
//! MongoDB client) and carries everything route builders need.

use database::mongodb::{Client, Database};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client, kept for readiness pings and shutdown cleanup
    pub client: Client,
    /// Handle to the registry database
    pub db: Database,
}
