// Error type shared by configuration and the API client. The binary wraps
// these in `anyhow` and lets them terminate the run.

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between reading configuration and getting a
/// usable answer back from the API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Neither an explicit value nor the environment provided a credential.
    #[error("missing credential: set {env_var} or pass --{flag}")]
    MissingCredential {
        env_var: &'static str,
        flag: &'static str,
    },

    #[error("invalid API URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server rejected the key pair.
    #[error("{endpoint} rejected the credentials ({status}): {body}")]
    Unauthorized {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("user record has no `{0}` field")]
    MissingField(&'static str),
}
