//! HTTP clients for the envgate backends.
//!
//! [`IdentityClient`] answers the session guard, [`DirectoryClient`] performs
//! environment CRUD. Both share one [`BackendHttp`] so the session cookie and
//! timeouts are configured in a single place.

use envgate_core::{EnvgateConfig, EnvgateResult};

mod directory;
mod http;
mod identity;
pub mod normalize;

pub use directory::{DirectoryClient, CREATE_FAILED, DELETE_FAILED, LIST_FAILED, UPDATE_FAILED};
pub use http::BackendHttp;
pub use identity::IdentityClient;

/// Both backend clients, sharing one connection pool
#[derive(Clone, Debug)]
pub struct Backends {
    pub identity: IdentityClient,
    pub directory: DirectoryClient,
}

/// Create the backend clients for the given configuration
pub fn connect(config: &EnvgateConfig) -> EnvgateResult<Backends> {
    let http = BackendHttp::new(config)?;
    Ok(Backends {
        identity: IdentityClient::new(http.clone()),
        directory: DirectoryClient::new(http),
    })
}
