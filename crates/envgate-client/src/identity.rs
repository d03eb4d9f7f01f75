use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use envgate_core::{AuthStatus, EnvgateResult, IdentityBackend};

use crate::http::{read_json, BackendHttp};
use crate::normalize;

const CURRENT_USER_METHOD: &str = "crm.api.user_auth.get_current_user";
const LOGOUT_METHOD: &str = "crm.api.user_auth.logout";

/// Identity backend client
#[derive(Clone, Debug)]
pub struct IdentityClient {
    http: BackendHttp,
}

impl IdentityClient {
    pub fn new(http: BackendHttp) -> Self {
        Self { http }
    }

    async fn fetch_current_user(&self) -> EnvgateResult<AuthStatus> {
        let response = self.http.get(CURRENT_USER_METHOD).await?;
        debug!("Session check status: {}", response.status());

        if !response.status().is_success() {
            return Ok(AuthStatus::anonymous());
        }

        let body = read_json(response).await?;
        Ok(normalize::auth_status(&body))
    }
}

#[async_trait]
impl IdentityBackend for IdentityClient {
    async fn current_user(&self) -> AuthStatus {
        match self.fetch_current_user().await {
            Ok(status) => status,
            Err(e) => {
                warn!("Session check failed: {}", e);
                AuthStatus::anonymous()
            }
        }
    }

    async fn logout(&self) -> bool {
        match self.http.post(LOGOUT_METHOD, &json!({})).await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Logout failed: {}", e);
                false
            }
        }
    }
}
