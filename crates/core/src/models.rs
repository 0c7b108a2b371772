//! # PawMatch Models
//!
//! Wire types shared by the client and the components. Field names follow
//! the upstream adoption service's JSON payloads.

use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;

/// Opaque dog identifier assigned by the upstream service
pub type DogId = String;

/// A dog as returned by `POST /dogs`
///
/// Immutable once fetched; identity is `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DogRecord {
    pub id: DogId,
    pub img: String,
    pub name: String,
    pub age: u32,
    pub zip_code: String,
    pub breed: String,
}

/// Login payload for `POST /auth/login`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub email: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Query for `GET /dogs/search`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Maximum number of ids to return
    pub size: usize,
    /// Restrict results to these breeds (empty = any breed)
    pub breeds: Vec<String>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            size: crate::config::DEFAULT_PAGE_SIZE,
            breeds: Vec::new(),
        }
    }
}

impl SearchQuery {
    /// Create a query for `size` ids of any breed
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            breeds: Vec::new(),
        }
    }

    /// Add a breed filter
    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breeds.push(breed.into());
        self
    }

    /// Query string pairs in the order the service expects them
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("size", self.size.to_string())];
        pairs.extend(self.breeds.iter().map(|b| ("breeds", b.clone())));
        pairs
    }
}

impl From<&ServiceConfig> for SearchQuery {
    /// Any-breed query sized by the configured page size
    fn from(config: &ServiceConfig) -> Self {
        Self::with_size(config.page_size)
    }
}

/// Response of `GET /dogs/search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub result_ids: Vec<DogId>,
    #[serde(default)]
    pub total: Option<u64>,
    /// Relative URL of the next page, if the service reports one
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

/// Response of `POST /dogs/match`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    #[serde(rename = "match")]
    pub dog_id: DogId,
}
