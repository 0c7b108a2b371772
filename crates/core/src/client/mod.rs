//! # Adoption Service Client
//!
//! The [`DogService`] trait is the seam between the components and the
//! upstream HTTP service. [`HttpDogService`] is the production
//! implementation; tests substitute in-memory fakes.

pub mod http;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::models::{Credentials, DogId, DogRecord, MatchResult, SearchQuery, SearchResults};

pub use http::HttpDogService;

/// Operations the upstream adoption service exposes
///
/// Every call after `login` relies on the session cookie the service set;
/// implementations are responsible for carrying it.
#[async_trait]
pub trait DogService: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> Result<(), ServiceError>;

    /// `POST /auth/logout`
    async fn logout(&self) -> Result<(), ServiceError>;

    /// `GET /dogs/breeds`
    async fn breeds(&self) -> Result<Vec<String>, ServiceError>;

    /// `GET /dogs/search`
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, ServiceError>;

    /// `POST /dogs`, records come back in service order
    async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<DogRecord>, ServiceError>;

    /// `POST /dogs/match`
    async fn match_dogs(&self, ids: &[DogId]) -> Result<MatchResult, ServiceError>;
}
