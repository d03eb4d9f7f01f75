use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;
use url::Url;

use envgate_core::{EnvgateConfig, EnvgateError, EnvgateResult};

/// Prefix of every whitelisted backend method
pub const METHOD_PREFIX: &str = "api/method/";

// Helper function to convert reqwest errors to EnvgateError
pub(crate) fn handle_reqwest_error(err: reqwest::Error) -> EnvgateError {
    EnvgateError::network(err.to_string())
}

/// Shared HTTP plumbing: one reqwest client carrying the session cookie,
/// plus the backend base URL.
#[derive(Clone, Debug)]
pub struct BackendHttp {
    client: Client,
    base_url: Url,
}

impl BackendHttp {
    pub fn new(config: &EnvgateConfig) -> EnvgateResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(sid) = &config.session_cookie {
            let cookie = HeaderValue::from_str(&format!("sid={}", sid))
                .map_err(|e| EnvgateError::config(format!("Invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, cookie);
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .default_headers(headers)
            .build()
            .map_err(handle_reqwest_error)?;

        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    /// URL of a backend method, e.g. `crm.api.user_auth.get_current_user`
    pub fn method_url(&self, method: &str) -> EnvgateResult<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(&format!("{}{}", METHOD_PREFIX, method))?)
    }

    pub async fn get(&self, method: &str) -> EnvgateResult<Response> {
        let url = self.method_url(method)?;
        debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .await
            .map_err(handle_reqwest_error)
    }

    pub async fn post(&self, method: &str, body: &Value) -> EnvgateResult<Response> {
        let url = self.method_url(method)?;
        debug!("POST {}", url);
        self.client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(handle_reqwest_error)
    }
}

/// Decode a response body as JSON
pub(crate) async fn read_json(response: Response) -> EnvgateResult<Value> {
    response
        .json::<Value>()
        .await
        .map_err(|e| EnvgateError::Serialization(format!("Invalid response body: {}", e)))
}
