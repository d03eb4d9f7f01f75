use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use envgate_core::{Environment, EnvironmentDirectory, EnvgateError, EnvgateResult};

use crate::http::{read_json, BackendHttp};
use crate::normalize;

const ENVIRONMENT_API: &str = "sentra_core.sentra_core.doctype.erp_environment.erp_environment";

pub const LIST_FAILED: &str = "Failed to load environments";
pub const CREATE_FAILED: &str = "Failed to create environment";
pub const UPDATE_FAILED: &str = "Failed to update environment";
pub const DELETE_FAILED: &str = "Failed to delete environment";

fn method(name: &str) -> String {
    format!("{}.{}", ENVIRONMENT_API, name)
}

/// Environment directory backend client
#[derive(Clone, Debug)]
pub struct DirectoryClient {
    http: BackendHttp,
}

impl DirectoryClient {
    pub fn new(http: BackendHttp) -> Self {
        Self { http }
    }

    /// POST a method call and insist on a success payload. Non-OK statuses
    /// are transport failures; a payload without the success flag is a
    /// backend failure carrying the backend's message when it sent one.
    async fn call(&self, name: &str, body: Value, fallback: &str) -> EnvgateResult<Value> {
        let response = self.http.post(&method(name), &body).await?;
        let status = response.status();
        if !status.is_success() {
            warn!("{} returned {}", name, status);
            return Err(EnvgateError::network(fallback));
        }

        let payload = read_json(response).await.map_err(|e| {
            warn!("{} returned an unreadable body: {}", name, e);
            EnvgateError::backend(fallback)
        })?;

        if !normalize::is_success(&payload) {
            let message = normalize::failure_message(&payload).unwrap_or_else(|| fallback.to_string());
            return Err(EnvgateError::backend(message));
        }

        Ok(payload)
    }
}

#[async_trait]
impl EnvironmentDirectory for DirectoryClient {
    async fn list(&self) -> EnvgateResult<Vec<Environment>> {
        let response = self.http.get(&method("get_active_environments")).await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Environment list returned {}, treating as empty", status);
            return Ok(Vec::new());
        }

        let payload = match read_json(response).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("{}: {}", LIST_FAILED, e);
                return Ok(Vec::new());
            }
        };

        let environments = normalize::environment_list(&payload);
        debug!("Loaded {} environment(s)", environments.len());
        Ok(environments)
    }

    async fn create(&self, display_name: &str, description: &str) -> EnvgateResult<String> {
        let payload = self
            .call(
                "create_environment",
                json!({
                    "display_name": display_name,
                    "description": description,
                }),
                CREATE_FAILED,
            )
            .await?;

        let name = normalize::created_environment_name(&payload)
            .ok_or_else(|| EnvgateError::backend(CREATE_FAILED))?;
        info!("Created environment {} ({})", name, display_name);
        Ok(name)
    }

    async fn update(&self, name: &str, display_name: &str, description: &str) -> EnvgateResult<()> {
        self.call(
            "update_environment",
            json!({
                "environment_name": name,
                "display_name": display_name,
                "description": description,
            }),
            UPDATE_FAILED,
        )
        .await?;
        info!("Updated environment {}", name);
        Ok(())
    }

    async fn delete(&self, name: &str) -> EnvgateResult<()> {
        self.call(
            "delete_environment",
            json!({ "environment_name": name }),
            DELETE_FAILED,
        )
        .await?;
        info!("Deleted environment {}", name);
        Ok(())
    }
}
