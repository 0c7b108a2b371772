//! # Fetch Pipeline
//!
//! State machine for the catalog's initial load: search for ids, then fetch
//! the records for those ids. Transitions are driven by [`PipelineEvent`]s
//! so the search-before-details ordering is enforced in one place.

use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;
use crate::models::{DogId, DogRecord};

pub const SEARCH_FAILED: &str = "Failed to fetch dog breed ids";
pub const DETAILS_FAILED: &str = "Failed to fetch dog breeds";

/// Stage of the catalog load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStage {
    /// Nothing requested yet
    Idle,
    /// Waiting for the id search
    Searching,
    /// Waiting for the batched detail fetch
    DetailsLoading,
    /// Catalog populated
    Ready,
    /// A stage failed; absorbing
    Failed,
}

/// Input to the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    SearchStarted,
    IdsReceived(Vec<DogId>),
    DetailsReceived(Vec<DogRecord>),
    StageFailed(&'static str),
}

impl PipelineEvent {
    fn name(&self) -> &'static str {
        match self {
            PipelineEvent::SearchStarted => "search_started",
            PipelineEvent::IdsReceived(_) => "ids_received",
            PipelineEvent::DetailsReceived(_) => "details_received",
            PipelineEvent::StageFailed(_) => "stage_failed",
        }
    }
}

/// Work the driver must perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineAction {
    /// Issue the id search
    Search,
    /// Issue one detail fetch for these ids
    FetchDetails(Vec<DogId>),
    /// Nothing further to do
    Done,
}

/// The catalog load state machine
#[derive(Debug, Clone)]
pub struct FetchPipeline {
    stage: FetchStage,
    ids: Vec<DogId>,
    dogs: Vec<DogRecord>,
    error: Option<&'static str>,
}

impl Default for FetchPipeline {
    fn default() -> Self {
        Self {
            stage: FetchStage::Idle,
            ids: Vec::new(),
            dogs: Vec::new(),
            error: None,
        }
    }
}

impl FetchPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> FetchStage {
        self.stage
    }

    /// Ids returned by the last search
    pub fn ids(&self) -> &[DogId] {
        &self.ids
    }

    /// Records in detail-response order
    pub fn dogs(&self) -> &[DogRecord] {
        &self.dogs
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Apply an event, returning the next action or rejecting the event
    pub fn handle(&mut self, event: PipelineEvent) -> Result<PipelineAction, PipelineError> {
        let rejected = PipelineError {
            stage: self.stage,
            event: event.name(),
        };

        let action = match (self.stage, event) {
            (FetchStage::Idle, PipelineEvent::SearchStarted) => {
                self.stage = FetchStage::Searching;
                PipelineAction::Search
            }
            (FetchStage::Searching, PipelineEvent::IdsReceived(ids)) => {
                self.ids = ids;
                if self.ids.is_empty() {
                    self.stage = FetchStage::Ready;
                    PipelineAction::Done
                } else {
                    self.stage = FetchStage::DetailsLoading;
                    PipelineAction::FetchDetails(self.ids.clone())
                }
            }
            (FetchStage::DetailsLoading, PipelineEvent::DetailsReceived(dogs)) => {
                self.dogs = dogs;
                self.stage = FetchStage::Ready;
                PipelineAction::Done
            }
            (FetchStage::Searching | FetchStage::DetailsLoading, PipelineEvent::StageFailed(msg)) => {
                self.error = Some(msg);
                self.stage = FetchStage::Failed;
                PipelineAction::Done
            }
            _ => return Err(rejected),
        };

        tracing::debug!(stage = ?self.stage, "Pipeline transition");
        Ok(action)
    }

    /// Check if the load has finished, successfully or not
    pub fn is_complete(&self) -> bool {
        matches!(self.stage, FetchStage::Ready | FetchStage::Failed)
    }

    /// Check if the catalog loaded
    pub fn is_success(&self) -> bool {
        self.stage == FetchStage::Ready
    }
}
