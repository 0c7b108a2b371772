//! # Catalog Events
//!
//! Timeline of what the catalog did, in order. Used by the terminal front
//! end for `--timeline` output and by tests to check request sequencing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of catalog event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogEventKind {
    /// Id search issued
    SearchStarted,
    /// Id search answered
    IdsReceived,
    /// Batched detail fetch issued
    DetailsRequested,
    /// Detail fetch answered
    DetailsReceived,
    /// A load stage failed
    StageFailed,
    FavoriteAdded,
    FavoriteRemoved,
    /// Match request issued
    MatchRequested,
    /// Match id received (whether or not it resolved)
    MatchReceived,
    MatchFailed,
}

/// An entry in the catalog timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: CatalogEventKind,
    /// Associated data (JSON)
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl CatalogEvent {
    pub fn new(kind: CatalogEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            data: None,
        }
    }

    /// Add data to the event
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}
