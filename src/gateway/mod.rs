//! Gateway - typed access to the remote dog service.
//!
//! `DogService` is the port the screens talk to. Each method is one request with no
//! retry, no caching and no batching. Two implementations ship with the crate:
//!
//! - [`HttpGateway`]: the real service over HTTPS, session cookie kept by the client.
//! - [`InMemoryDogService`]: a catalog held in memory with the same search semantics,
//!   for tests and local development.
//!
//! With the `stub` feature, [`stub::router`] serves an `InMemoryDogService` over the
//! same HTTP surface as the remote service.

mod error;
mod http;
mod in_memory;
#[cfg(feature = "stub")]
pub mod stub;

use std::future::Future;

use crate::dog::{Dog, MatchResult, SearchResults};
use crate::search::SearchParams;

pub use error::GatewayError;
pub use http::{HttpGateway, DEFAULT_BASE_URL};
pub use in_memory::InMemoryDogService;

/// Largest id list the bulk lookup accepts.
pub const BULK_LIMIT: usize = 100;

/// Operations offered by the dog service.
pub trait DogService: Send + Sync {
    /// Start a session for `name` / `email`.
    fn login(&self, name: &str, email: &str) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// End the current session.
    fn logout(&self) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Every breed name the service knows.
    fn breeds(&self) -> impl Future<Output = Result<Vec<String>, GatewayError>> + Send;

    /// One page of matching dog ids plus the total hit count.
    fn search(
        &self,
        params: &SearchParams,
    ) -> impl Future<Output = Result<SearchResults, GatewayError>> + Send;

    /// Resolve ids into records (at most [`BULK_LIMIT`] per call).
    fn dogs(&self, ids: &[String]) -> impl Future<Output = Result<Vec<Dog>, GatewayError>> + Send;

    /// Ask the service to pick one dog out of `ids`.
    fn match_dog(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<MatchResult, GatewayError>> + Send;
}
