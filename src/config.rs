// Client configuration. Explicit values win; credentials and the API URL
// otherwise come from the environment. Resolution fails fast so the client
// is never built with a half-empty key pair.

use std::fmt;

use reqwest::Url;

use crate::env::Env;
use crate::error::ApiError;

pub const PUBLIC_KEY_VAR: &str = "RC_PUBLIC_KEY";
pub const PRIVATE_KEY_VAR: &str = "RC_PRIVATE_KEY";
pub const API_URL_VAR: &str = "RC_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Values supplied by the caller. Anything left `None` is looked up in the
/// environment when resolved.
#[derive(Clone, Debug, Default)]
pub struct ClientOptions {
    pub api_url: Option<String>,
    pub public_key: Option<String>,
    pub private_key: Option<String>,
}

/// Fully resolved configuration handed to [`crate::api::ApiClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub public_key: String,
    private_key: String,
}

impl ClientOptions {
    /// Fill the gaps from `env` and validate the result.
    pub fn resolve(self, env: &Env) -> Result<ClientConfig, ApiError> {
        let public_key = pick(self.public_key, env, PUBLIC_KEY_VAR).ok_or(
            ApiError::MissingCredential {
                env_var: PUBLIC_KEY_VAR,
                flag: "public-key",
            },
        )?;
        let private_key = pick(self.private_key, env, PRIVATE_KEY_VAR).ok_or(
            ApiError::MissingCredential {
                env_var: PRIVATE_KEY_VAR,
                flag: "private-key",
            },
        )?;
        let raw_url = pick(self.api_url, env, API_URL_VAR)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(ClientConfig {
            api_url: parse_base_url(&raw_url)?,
            public_key,
            private_key,
        })
    }
}

impl ClientConfig {
    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url.as_str())
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

fn pick(explicit: Option<String>, env: &Env, var: &str) -> Option<String> {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| env.non_empty(var))
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl {
            url: raw.to_string(),
            reason: "not a base URL".into(),
        });
    }
    Ok(url)
}
