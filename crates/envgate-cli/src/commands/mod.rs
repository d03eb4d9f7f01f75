//! CLI command implementations

use std::sync::Arc;

use tracing::debug;

use envgate_client::Backends;
use envgate_core::{
    Catalog, CatalogSession, EnvgateConfig, EnvgateError, EnvgateResult, Event, FileSelectionStore,
    GuardDecision, HandoffDispatcher, ListPhase, Navigator, SelectionStore, SessionGuard, User,
};

use crate::opener::{PrintNavigator, SystemNavigator};
use crate::progress::with_spinner;

pub mod browse;
pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod logout;
pub mod select;
pub mod selection;
pub mod whoami;

pub use browse::execute as execute_browse;
pub use create::execute as execute_create;
pub use delete::execute as execute_delete;
pub use edit::execute as execute_edit;
pub use list::execute as execute_list;
pub use logout::execute as execute_logout;
pub use select::execute as execute_select;
pub use selection::{clear as execute_clear, current as execute_current};
pub use whoami::execute as execute_whoami;

/// Collaborators shared by the guarded commands
pub struct Context {
    pub config: EnvgateConfig,
    pub backends: Backends,
    pub store: Arc<FileSelectionStore>,
    pub navigator: Arc<dyn Navigator>,
}

/// A verified session
pub struct SignedIn {
    pub user: User,
    pub selection: Option<String>,
}

impl Context {
    /// `open_urls` picks between the desktop opener and printing URLs
    pub fn new(config: EnvgateConfig, open_urls: bool) -> EnvgateResult<Self> {
        let backends = envgate_client::connect(&config)?;
        let store = Arc::new(FileSelectionStore::new(config.selection_file.clone()));
        let navigator: Arc<dyn Navigator> = if open_urls {
            Arc::new(SystemNavigator::new()?)
        } else {
            Arc::new(PrintNavigator)
        };

        Ok(Self {
            config,
            backends,
            store,
            navigator,
        })
    }

    pub fn handoff(&self) -> HandoffDispatcher {
        let store: Arc<dyn SelectionStore> = self.store.clone();
        HandoffDispatcher::from_config(&self.config, store, self.navigator.clone())
    }

    /// Run the session guard. A missing session has already been sent to
    /// the login page and surfaces as an auth error.
    pub async fn sign_in(&self) -> EnvgateResult<SignedIn> {
        let guard = SessionGuard::new(
            &self.backends.identity,
            self.store.as_ref(),
            self.navigator.as_ref(),
            self.config.login_url.clone(),
        );

        match with_spinner("Checking session...", guard.enter()).await? {
            GuardDecision::Proceed { user, selection } => {
                debug!("Signed in as {}", user.email);
                Ok(SignedIn { user, selection })
            }
            GuardDecision::RedirectToLogin { login_url } => Err(EnvgateError::auth(format!(
                "Not signed in. Sign in at {} and retry",
                login_url
            ))),
        }
    }
}

/// Feed one event through the catalog, with a spinner when it reaches the
/// backend
pub async fn drive(
    session: &CatalogSession<'_>,
    catalog: &mut Catalog,
    event: Event,
) -> EnvgateResult<Option<url::Url>> {
    let message = match event {
        Event::Mount | Event::Retry => Some("Loading environments..."),
        Event::Submit => Some("Saving environment..."),
        Event::Delete => Some("Deleting environment..."),
        Event::Select(_) => Some("Opening environment..."),
        _ => None,
    };

    match message {
        Some(message) => with_spinner(message, session.dispatch(catalog, event)).await,
        None => session.dispatch(catalog, event).await,
    }
}

/// Mount a catalog and wait for the first load
pub async fn load_catalog(
    session: &CatalogSession<'_>,
    selection: Option<String>,
) -> EnvgateResult<Catalog> {
    let mut catalog = Catalog::new(selection);
    drive(session, &mut catalog, Event::Mount).await?;
    if let ListPhase::Failed(message) = catalog.phase() {
        return Err(EnvgateError::network(message.clone()));
    }
    Ok(catalog)
}

/// Error left on the open dialog: a local rejection is a validation error,
/// anything the backend reported keeps the backend category
pub fn dialog_error(catalog: &Catalog) -> Option<EnvgateError> {
    let dialog = catalog.dialog().as_open()?;
    let message = dialog.validation_error.clone()?;
    Some(if dialog.remote_failure {
        EnvgateError::backend(message)
    } else {
        EnvgateError::validation(message)
    })
}

pub fn require_environment(catalog: &Catalog, name: &str) -> EnvgateResult<()> {
    if catalog.find(name).is_none() {
        return Err(EnvgateError::validation(format!(
            "Environment not found: {}",
            name
        )));
    }
    Ok(())
}
