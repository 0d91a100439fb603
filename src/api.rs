// API client module: a small blocking HTTP client for the RFID/user API.
// Every call is a single authenticated round trip. Nothing is retried or
// cached.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{RfidLookup, RfidRequest, UserId, UserRecord};

/// The two things the lookup flow needs from a backend.
///
/// [`ApiClient`] is the HTTP implementation; tests substitute their own.
pub trait UserLookup {
    /// Ask which user, if any, an RFID belongs to. `meta` is stored by the
    /// server alongside the request for auditing.
    fn resolve_rfid(&self, rfid: &str, meta: &str) -> Result<RfidLookup, ApiError>;

    /// Fetch the record of a user returned by [`UserLookup::resolve_rfid`].
    fn get_user(&self, user_id: &UserId) -> Result<UserRecord, ApiError>;
}

/// Blocking API client holding a reqwest client and the resolved
/// configuration (base URL and key pair).
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Build a client with a default reqwest client.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|source| ApiError::Transport {
                endpoint: config.api_url.to_string(),
                source,
            })?;
        Ok(Self::with_http_client(config, client))
    }

    /// Build a client around a caller-configured reqwest client.
    pub fn with_http_client(config: ClientConfig, client: Client) -> Self {
        ApiClient { client, config }
    }

    /// Base URL with `segments` appended, each percent-encoded as a single
    /// path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.config.api_url.clone();
        // Config only accepts URLs that can be a base, so this always applies.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.basic_auth(&self.config.public_key, Some(self.config.private_key()))
    }

    /// Send the request and decode a JSON body, mapping each failure mode to
    /// its own error variant.
    fn send_json<T: DeserializeOwned>(&self, url: &Url, req: RequestBuilder) -> Result<T, ApiError> {
        let endpoint = url.to_string();
        let res = self
            .authed(req)
            .send()
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;
        let res = check_status(&endpoint, res)?;
        res.json::<T>()
            .map_err(|source| ApiError::Decode { endpoint, source })
    }
}

impl UserLookup for ApiClient {
    fn resolve_rfid(&self, rfid: &str, meta: &str) -> Result<RfidLookup, ApiError> {
        let url = self.endpoint(&["rfid"]);
        debug!(%url, "resolving rfid");
        let req = self.client.post(url.clone()).json(&RfidRequest { rfid, meta });
        let lookup: RfidLookup = self.send_json(&url, req)?;
        debug!(
            request_id = %lookup.request_id,
            found = lookup.user_id.is_some(),
            "rfid resolved"
        );
        Ok(lookup)
    }

    fn get_user(&self, user_id: &UserId) -> Result<UserRecord, ApiError> {
        let url = self.endpoint(&["user", user_id.as_str()]);
        debug!(%url, "fetching user");
        let req = self.client.get(url.clone());
        self.send_json(&url, req)
    }
}

fn check_status(endpoint: &str, res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    warn!(%endpoint, %status, "request was not successful");
    let body = res.text().unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthorized {
            endpoint: endpoint.to_string(),
            status,
            body,
        });
    }
    Err(ApiError::Status {
        endpoint: endpoint.to_string(),
        status,
        body,
    })
}
