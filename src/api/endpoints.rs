//! Endpoint bindings.
//!
//! Every remote operation is one row in a declarative table: its path,
//! method, how it passes parameters, and the wire parameter names. The
//! typed wrapper methods are thin projections of that table through
//! `ApiClient::call`; nothing endpoint-specific lives anywhere else.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::auth::{SessionToken, TokenProfile};
use crate::utils::url::append_query_param;

use super::client::{ApiClient, Request, TOKEN_ISSUE_PATH};

/// How an endpoint receives its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamStyle {
    /// Appended to the URL query string
    Query,
    /// URL-encoded form body
    Body,
}

/// One remote operation: everything needed to build its request.
pub(crate) struct Endpoint {
    pub path: &'static str,
    pub method: &'static str,
    pub style: ParamStyle,
    pub params: &'static [&'static str],
}

pub(crate) const AUTH_LOGIN: Endpoint = Endpoint {
    path: "/Auth/Login",
    method: "post",
    style: ParamStyle::Body,
    params: &["username", "password"],
};

pub(crate) const TOKEN_LOGIN: Endpoint = Endpoint {
    path: "/Token/Login",
    method: "post",
    style: ParamStyle::Body,
    params: &["username", "password"],
};

pub(crate) const TOKEN_LOGIN_GET: Endpoint = Endpoint {
    path: "/Token/Login",
    method: "get",
    style: ParamStyle::Query,
    params: &["username", "password"],
};

pub(crate) const TOKEN_GET: Endpoint = Endpoint {
    path: "/Token/Get",
    method: "get",
    style: ParamStyle::Query,
    params: &["key"],
};

pub(crate) const TOKEN_UPLOAD: Endpoint = Endpoint {
    path: "/Token/Upload",
    method: "get",
    style: ParamStyle::Query,
    params: &["file"],
};

pub(crate) const TOKEN_GEN: Endpoint = Endpoint {
    path: TOKEN_ISSUE_PATH,
    method: "post",
    style: ParamStyle::Body,
    params: &["username", "password"],
};

pub(crate) const SERVICE_AUTH: Endpoint = Endpoint {
    path: "/Service/Auth",
    method: "post",
    style: ParamStyle::Body,
    params: &["username", "password"],
};

/// Wire shape of the token-issue response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    #[serde(rename = "tokenType")]
    pub token_type: String,
    pub profile: TokenProfileResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenProfileResponse {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "authTime", default)]
    pub auth_time: Option<i64>,
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,
}

impl TokenResponse {
    /// Convert the wire response into the persisted session shape.
    pub fn into_session(self) -> SessionToken {
        SessionToken {
            token_type: self.token_type,
            access_token: self.token,
            user_name: self.profile.name,
            profile: TokenProfile {
                expires_at: self.profile.expires_at,
                auth_time: self.profile.auth_time,
                key: self.profile.key,
            },
        }
    }
}

impl ApiClient {
    /// Build and issue the request for one endpoint table row.
    ///
    /// `values` line up with the row's parameter names; `None` skips an
    /// optional parameter.
    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        values: &[Option<&str>],
    ) -> Result<T> {
        debug_assert_eq!(endpoint.params.len(), values.len());

        match endpoint.style {
            ParamStyle::Query => {
                let mut url = endpoint.path.to_string();
                for (name, value) in endpoint.params.iter().zip(values) {
                    if let Some(value) = value {
                        url = append_query_param(&url, name, value);
                    }
                }
                self.request(Request {
                    url: &url,
                    method: endpoint.method,
                    body: None,
                })
                .await
            }
            ParamStyle::Body => {
                let mut body: Vec<(&str, &str)> = Vec::new();
                for (name, value) in endpoint.params.iter().zip(values) {
                    if let Some(value) = value {
                        body.push((*name, *value));
                    }
                }
                self.request(Request {
                    url: endpoint.path,
                    method: endpoint.method,
                    body: Some(&body),
                })
                .await
            }
        }
    }

    /// POST /Auth/Login
    pub async fn auth_login(&self, username: &str, password: &str) -> Result<Value> {
        self.call(&AUTH_LOGIN, &[Some(username), Some(password)])
            .await
    }

    /// POST /Token/Login
    pub async fn token_login(&self, username: &str, password: &str) -> Result<Value> {
        self.call(&TOKEN_LOGIN, &[Some(username), Some(password)])
            .await
    }

    /// GET /Token/Login - query-string variant of `token_login`.
    pub async fn token_login_get(&self, username: &str, password: &str) -> Result<Value> {
        self.call(&TOKEN_LOGIN_GET, &[Some(username), Some(password)])
            .await
    }

    /// GET /Token/Get?key=
    pub async fn token_get(&self, key: &str) -> Result<Value> {
        self.call(&TOKEN_GET, &[Some(key)]).await
    }

    /// GET /Token/Upload, optionally scoped to one file.
    pub async fn token_upload(&self, file: Option<&str>) -> Result<Value> {
        self.call(&TOKEN_UPLOAD, &[file]).await
    }

    /// POST /Token/GenToken - issue a token from credentials.
    /// Always sent anonymously.
    pub async fn gen_token(&self, username: &str, password: &str) -> Result<TokenResponse> {
        self.call(&TOKEN_GEN, &[Some(username), Some(password)])
            .await
    }

    /// POST /Service/Auth
    pub async fn service_auth(&self, username: &str, password: &str) -> Result<Value> {
        self.call(&SERVICE_AUTH, &[Some(username), Some(password)])
            .await
    }

    /// Issue a token and persist it as the current session.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionToken> {
        let response = self.gen_token(username, password).await?;
        let session = response.into_session();
        self.store()
            .save(&session)
            .context("Failed to persist session")?;
        info!(user = %session.user_name, "logged in");
        Ok(session)
    }

    /// Drop the current session.
    pub fn logout(&self) -> Result<()> {
        self.store().clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[&Endpoint] = &[
        &AUTH_LOGIN,
        &TOKEN_LOGIN,
        &TOKEN_LOGIN_GET,
        &TOKEN_GET,
        &TOKEN_UPLOAD,
        &TOKEN_GEN,
        &SERVICE_AUTH,
    ];

    #[test]
    fn test_table_rows_are_dispatchable() {
        for endpoint in TABLE {
            assert!(
                endpoint.method == "get" || endpoint.method == "post",
                "{} uses method {}",
                endpoint.path,
                endpoint.method
            );
            // get never carries a body in this service
            if endpoint.style == ParamStyle::Body {
                assert_eq!(endpoint.method, "post", "{}", endpoint.path);
            }
        }
    }

    #[test]
    fn test_token_response_into_session() {
        let json = r#"{
            "token": "tok-1",
            "tokenType": "Bearer",
            "profile": {"key": "", "name": "admin", "authTime": 1700000000, "expiresAt": 1700003600}
        }"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        let session = response.into_session();

        assert_eq!(session.bearer(), "Bearer tok-1");
        assert_eq!(session.user_name, "admin");
        assert_eq!(session.profile.expires_at, 1700003600);
        assert_eq!(session.profile.auth_time, Some(1700000000));
    }

    #[test]
    fn test_token_response_tolerates_sparse_profile() {
        let json = r#"{"token":"t","tokenType":"Bearer","profile":{"expiresAt":1}}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.profile.name, "");
        assert_eq!(response.profile.auth_time, None);
    }
}
