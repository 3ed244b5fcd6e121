//! HTTP transport for the dog service, built on reqwest.
//!
//! The client keeps a cookie store, so the session cookie set by `/auth/login` rides
//! along on every later call. The gateway itself holds nothing but the client and the
//! base URL.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

use super::{DogService, GatewayError};
use crate::dog::{Dog, MatchResult, SearchResults};
use crate::search::SearchParams;

/// Base URL of the public dog service.
pub const DEFAULT_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

/// `DogService` over HTTP. Cheap to clone; clones share the cookie store.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a gateway for `base_url` with a fresh cookie store.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use an existing client. It must have a cookie store for sessions to work.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a non-success status to an error, otherwise hand the response back.
fn check(response: Response, path: &str) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GatewayError::Status {
            status: status.as_u16(),
            path: path.to_string(),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
}

impl DogService for HttpGateway {
    async fn login(&self, name: &str, email: &str) -> Result<(), GatewayError> {
        let path = "/auth/login";
        let response = self
            .client
            .post(self.url(path))
            .json(&json!({ "name": name, "email": email }))
            .send()
            .await?;
        check(response, path)?;
        info!(name, "logged in");
        Ok(())
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        let path = "/auth/logout";
        let response = self.client.post(self.url(path)).send().await?;
        check(response, path)?;
        info!("logged out");
        Ok(())
    }

    async fn breeds(&self) -> Result<Vec<String>, GatewayError> {
        let path = "/dogs/breeds";
        debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        decode(check(response, path)?).await
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResults, GatewayError> {
        let path = "/dogs/search";
        let query = params.to_query();
        debug!(path, ?query, "GET");
        let response = self.client.get(self.url(path)).query(&query).send().await?;
        decode(check(response, path)?).await
    }

    async fn dogs(&self, ids: &[String]) -> Result<Vec<Dog>, GatewayError> {
        let path = "/dogs";
        debug!(path, count = ids.len(), "POST");
        let response = self.client.post(self.url(path)).json(ids).send().await?;
        decode(check(response, path)?).await
    }

    async fn match_dog(&self, ids: &[String]) -> Result<MatchResult, GatewayError> {
        let path = "/dogs/match";
        debug!(path, count = ids.len(), "POST");
        let response = self.client.post(self.url(path)).json(ids).send().await?;
        decode(check(response, path)?).await
    }
}
