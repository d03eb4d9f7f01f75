//! Core types and traits for envgate.
//!
//! This crate holds the environment data model, the catalog state machine,
//! the local selection store and the handoff dispatcher. Remote collaborators
//! (identity backend, environment directory) and page navigation sit behind
//! the traits declared here so the state machine never touches the network
//! directly.

use async_trait::async_trait;
use url::Url;

pub mod catalog;
pub mod config;
pub mod environment;
pub mod error;
pub mod handoff;
pub mod logging;
pub mod selection;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use crate::catalog::{Catalog, CatalogSession, DialogMode, DialogState, Draft, Effect, Event, ListPhase};
pub use crate::config::EnvgateConfig;
pub use crate::environment::{Component, ComponentCategory, Environment};
pub use crate::error::{EnvgateError, EnvgateResult};
pub use crate::handoff::HandoffDispatcher;
pub use crate::selection::{FileSelectionStore, MemorySelectionStore};
pub use crate::session::{GuardDecision, SessionGuard};
pub use crate::user::{AuthStatus, User};

/// Identity backend ("who am I")
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Fetch the current session. Any failure reads as unauthenticated.
    async fn current_user(&self) -> AuthStatus;

    /// End the current session. Returns whether the backend acknowledged it.
    async fn logout(&self) -> bool;
}

/// Remote CRUD over the environments owned by the current user
#[async_trait]
pub trait EnvironmentDirectory: Send + Sync {
    /// List active environments. Non-success responses yield an empty list.
    async fn list(&self) -> EnvgateResult<Vec<Environment>>;

    /// Create an environment and return its system-assigned name
    async fn create(&self, display_name: &str, description: &str) -> EnvgateResult<String>;

    /// Update the label and description of an environment
    async fn update(&self, name: &str, display_name: &str, description: &str) -> EnvgateResult<()>;

    /// Delete an environment
    async fn delete(&self, name: &str) -> EnvgateResult<()>;
}

/// Durable storage for the currently selected environment name
pub trait SelectionStore: Send + Sync {
    fn get(&self) -> EnvgateResult<Option<String>>;

    fn set(&self, name: &str) -> EnvgateResult<()>;

    fn clear(&self) -> EnvgateResult<()>;

    fn has(&self) -> EnvgateResult<bool> {
        Ok(self.get()?.is_some())
    }
}

/// Full navigation away from the current view
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &Url) -> EnvgateResult<()>;
}
