//! Session guard run before any environment operation.

use tracing::{debug, info, warn};
use url::Url;

use crate::error::EnvgateResult;
use crate::user::User;
use crate::{IdentityBackend, Navigator, SelectionStore};

/// What the caller may do after the guard ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session is valid. `selection` is the persisted environment used to
    /// pre-highlight the catalog.
    Proceed {
        user: User,
        selection: Option<String>,
    },
    /// Not signed in; navigation to the login page has been issued
    RedirectToLogin { login_url: Url },
}

pub struct SessionGuard<'a> {
    identity: &'a dyn IdentityBackend,
    store: &'a dyn SelectionStore,
    navigator: &'a dyn Navigator,
    login_url: Url,
}

impl<'a> SessionGuard<'a> {
    pub fn new(
        identity: &'a dyn IdentityBackend,
        store: &'a dyn SelectionStore,
        navigator: &'a dyn Navigator,
        login_url: Url,
    ) -> Self {
        Self {
            identity,
            store,
            navigator,
            login_url,
        }
    }

    /// Check the session. Fails closed: anything but a positive answer from
    /// the identity backend redirects to login. Only a failed redirect is an
    /// error.
    pub async fn enter(&self) -> EnvgateResult<GuardDecision> {
        debug!("Verifying session");
        let status = self.identity.current_user().await;

        if !status.authenticated {
            info!("Not authenticated, redirecting to {}", self.login_url);
            self.navigator.navigate(&self.login_url)?;
            return Ok(GuardDecision::RedirectToLogin {
                login_url: self.login_url.clone(),
            });
        }

        let selection = match self.store.get() {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Ignoring unreadable environment selection: {}", e);
                None
            }
        };
        debug!("Session verified, stored selection: {:?}", selection);

        Ok(GuardDecision::Proceed {
            user: status.user.unwrap_or_default(),
            selection,
        })
    }
}
