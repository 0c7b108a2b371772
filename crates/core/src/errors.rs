//! # Errors
//!
//! Typed failures for each layer: local validation, the upstream service,
//! the fetch pipeline and catalog operations.

use thiserror::Error;

use crate::catalog::FetchStage;

/// Local, pre-flight credential problems. Display text is user-facing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter name and email.")]
    MissingField,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Failure talking to the adoption service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service answered with a non-2xx status
    #[error("service rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body did not match the expected shape
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Whether the service itself refused the request
    pub fn is_rejection(&self) -> bool {
        matches!(self, ServiceError::Rejected { .. })
    }
}

/// An event arrived in a stage that cannot accept it
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("pipeline cannot accept {event} while {stage:?}")]
pub struct PipelineError {
    pub stage: FetchStage,
    pub event: &'static str,
}

/// Failure of a catalog operation
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Match generation was requested with no favorites
    #[error("add at least one favorite before generating a match")]
    NoFavorites,

    /// The dog is not part of the loaded catalog
    #[error("dog {0} is not in the catalog")]
    UnknownDog(String),

    /// A pipeline stage failed; `message` is the user-facing text
    #[error("{message}")]
    Stage {
        message: &'static str,
        #[source]
        source: ServiceError,
    },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
