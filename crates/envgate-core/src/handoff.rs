//! Persist the chosen environment and hand control to the external builder.

use std::sync::Arc;

use tracing::info;
use url::Url;

use crate::config::EnvgateConfig;
use crate::error::{EnvgateError, EnvgateResult};
use crate::{Navigator, SelectionStore};

/// Query parameter the external application reads the environment from
pub const ENV_QUERY_PARAM: &str = "env";

/// Build `<base>/<builder_path>?env=<name>`
pub fn handoff_url(base: &Url, builder_path: &str, environment: &str) -> EnvgateResult<Url> {
    if environment.is_empty() {
        return Err(EnvgateError::validation("Environment name must not be empty"));
    }

    // Url::join drops the last segment of a base without a trailing slash.
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    // Percent-encoded (space as %20), so decodeURIComponent reads it back
    let mut url = base.join(builder_path.trim_start_matches('/'))?;
    url.set_fragment(None);
    url.set_query(Some(&format!(
        "{}={}",
        ENV_QUERY_PARAM,
        urlencoding::encode(environment)
    )));
    Ok(url)
}

/// One-way handoff: store the selection, then navigate away
#[derive(Clone)]
pub struct HandoffDispatcher {
    store: Arc<dyn SelectionStore>,
    navigator: Arc<dyn Navigator>,
    base: Url,
    builder_path: String,
}

impl HandoffDispatcher {
    pub fn new(
        store: Arc<dyn SelectionStore>,
        navigator: Arc<dyn Navigator>,
        base: Url,
        builder_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            navigator,
            base,
            builder_path: builder_path.into(),
        }
    }

    pub fn from_config(
        config: &EnvgateConfig,
        store: Arc<dyn SelectionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::new(
            store,
            navigator,
            config.handoff_url.clone(),
            config.builder_path.clone(),
        )
    }

    pub fn url_for(&self, environment: &str) -> EnvgateResult<Url> {
        handoff_url(&self.base, &self.builder_path, environment)
    }

    /// Overwrite the stored selection and navigate. The URL is built first so
    /// a bad name never reaches the store.
    pub fn dispatch(&self, environment: &str) -> EnvgateResult<Url> {
        let url = self.url_for(environment)?;
        self.store.set(environment)?;
        info!("Handing off environment {} to {}", environment, url);
        self.navigator.navigate(&url)?;
        Ok(url)
    }
}
