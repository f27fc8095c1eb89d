//! HTTP transport for token-authenticated services.
//!
//! `ApiClient` owns the shared `reqwest::Client`, the service base URL,
//! and the session store. Every outgoing request passes through
//! `auth_headers`, which attaches the stored bearer token - except on the
//! token-issue path, which must stay anonymous.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::utils::url::join_url;

use super::ApiError;

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Token-issue path. Requests here are never authorized: the call that
/// fetches a token cannot depend on already having one.
pub(crate) const TOKEN_ISSUE_PATH: &str = "/Token/GenToken";

/// Transient request descriptor: a relative path, a lowercase method
/// name, and optional form fields for `post`.
#[derive(Debug, Clone)]
pub struct Request<'a> {
    pub url: &'a str,
    pub method: &'a str,
    pub body: Option<&'a [(&'a str, &'a str)]>,
}

/// API client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: SessionStore,
}

impl ApiClient {
    /// Create a new API client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            store: SessionStore::new(config.cache_dir()?),
        })
    }

    /// The session store backing this client.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Whether a valid unexpired session is currently stored.
    pub fn is_logged_in(&self) -> bool {
        self.store.is_logged_in()
    }

    /// User name recorded in the stored session.
    pub fn user_name(&self) -> Option<String> {
        self.store.user_name()
    }

    /// Issue the single HTTP call described by `req`.
    ///
    /// `get` sends no body; `post` sends its fields as a URL-encoded
    /// form. Any other method fails immediately without touching the
    /// network.
    pub async fn request<T: DeserializeOwned>(&self, req: Request<'_>) -> Result<T> {
        match req.method {
            "get" => self.get(req.url).await,
            "post" => self.post_form(req.url, req.body.unwrap_or(&[])).await,
            other => Err(ApiError::UnsupportedMethod(other.to_string()).into()),
        }
    }

    /// Headers for a request to `path`: the stored session as
    /// `Authorization`, unless the path is the anonymous token-issue
    /// endpoint or no valid session exists.
    fn auth_headers(&self, path: &str) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if path.split('?').next() == Some(TOKEN_ISSUE_PATH) {
            return Ok(headers);
        }
        if let Some(bearer) = self.store.bearer() {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&bearer)
                    .context("Stored session token is not a valid header value")?,
            );
            debug!(path, "attached session authorization");
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = join_url(&self.base_url, path);
        debug!(url = %url, "GET request started");

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers(path)?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T> {
        let url = join_url(&self.base_url, path);
        debug!(url = %url, "POST request started");

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers(path)?)
            .form(form)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }
}
