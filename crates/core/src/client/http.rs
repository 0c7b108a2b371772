//! # HTTP Client
//!
//! `reqwest`-backed [`DogService`]. The client keeps a cookie store so the
//! session cookie set by `/auth/login` rides along on every later request.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::DogService;
use crate::config::ServiceConfig;
use crate::errors::ServiceError;
use crate::models::{Credentials, DogId, DogRecord, MatchResult, SearchQuery, SearchResults};

/// Production client for the adoption service
#[derive(Debug, Clone)]
pub struct HttpDogService {
    client: Client,
    config: ServiceConfig,
}

impl HttpDogService {
    /// Build a cookie-persisting client for `config`
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Turn a non-2xx response into [`ServiceError::Rejected`]
    ///
    /// A body that cannot be read in full is a transport failure, not a
    /// rejection.
    async fn check(response: Response) -> Result<Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().path().to_string();
        let body = response.text().await?;
        tracing::warn!(status = status.as_u16(), path = %url, "Service rejected request");
        Err(ServiceError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
        let bytes = Self::check(response).await?.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DogService for HttpDogService {
    #[tracing::instrument(skip(self, credentials), fields(name = %credentials.name))]
    async fn login(&self, credentials: &Credentials) -> Result<(), ServiceError> {
        let response = self
            .client
            .post(self.config.endpoint("/auth/login"))
            .json(credentials)
            .send()
            .await?;
        Self::check(response).await?;
        tracing::debug!("Login accepted");
        Ok(())
    }

    async fn logout(&self) -> Result<(), ServiceError> {
        let response = self
            .client
            .post(self.config.endpoint("/auth/logout"))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn breeds(&self) -> Result<Vec<String>, ServiceError> {
        let response = self
            .client
            .get(self.config.endpoint("/dogs/breeds"))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, ServiceError> {
        tracing::debug!(size = query.size, breeds = ?query.breeds, "Searching dog ids");
        let response = self
            .client
            .get(self.config.endpoint("/dogs/search"))
            .query(&query.to_pairs())
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<DogRecord>, ServiceError> {
        tracing::debug!(count = ids.len(), "Fetching dog details");
        let response = self
            .client
            .post(self.config.endpoint("/dogs"))
            .json(ids)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn match_dogs(&self, ids: &[DogId]) -> Result<MatchResult, ServiceError> {
        tracing::debug!(count = ids.len(), "Requesting match");
        let response = self
            .client
            .post(self.config.endpoint("/dogs/match"))
            .json(ids)
            .send()
            .await?;
        Self::decode(response).await
    }
}
