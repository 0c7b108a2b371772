//! # Catalog
//!
//! The logged-in view: loads the dog catalog through the [`FetchPipeline`],
//! owns the favorites, and resolves matches against them.
//!
//! ## Flow
//!
//! ```text
//! load: search ids → fetch details (one batch) → Ready
//! generate_match: favorite ids → match id → lookup in favorites
//! ```

pub mod events;
pub mod favorites;
pub mod pipeline;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::client::DogService;
use crate::errors::{CatalogError, ServiceError};
use crate::models::{DogId, DogRecord, SearchQuery};

pub use events::{CatalogEvent, CatalogEventKind};
pub use favorites::Favorites;
pub use pipeline::{
    FetchPipeline, FetchStage, PipelineAction, PipelineEvent, DETAILS_FAILED, SEARCH_FAILED,
};

pub const MATCH_FAILED: &str = "Failed to generate a match";

/// Snapshot of everything the presentation layer draws
#[derive(Debug, Serialize)]
pub struct CatalogView<'a> {
    pub stage: FetchStage,
    pub dogs: &'a [DogRecord],
    pub favorites: Vec<&'a DogRecord>,
    #[serde(rename = "match")]
    pub matched: Option<&'a DogRecord>,
    pub error: Option<&'a str>,
    /// Whether the match action is enabled
    pub can_match: bool,
}

/// Catalog component for an authenticated session
pub struct Catalog {
    service: Arc<dyn DogService>,
    query: SearchQuery,
    pipeline: FetchPipeline,
    favorites: Favorites,
    match_id: Option<DogId>,
    matched: Option<DogRecord>,
    error: Option<String>,
    events: Vec<CatalogEvent>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("stage", &self.stage())
            .field("dogs", &self.dogs().len())
            .field("favorites", &self.favorites().len())
            .field("error", &self.error())
            .finish()
    }
}

impl Catalog {
    pub fn new(service: Arc<dyn DogService>, query: SearchQuery) -> Self {
        Self {
            service,
            query,
            pipeline: FetchPipeline::new(),
            favorites: Favorites::new(),
            match_id: None,
            matched: None,
            error: None,
            events: Vec::new(),
        }
    }

    /// Run the initial load: id search, then one detail fetch
    ///
    /// A no-op once the pipeline has left `Idle`. Stage failures are kept
    /// in [`Catalog::error`] and also returned.
    #[tracing::instrument(skip(self), fields(size = self.query.size))]
    pub async fn load(&mut self) -> Result<FetchStage, CatalogError> {
        if self.pipeline.stage() != FetchStage::Idle {
            tracing::debug!(stage = ?self.pipeline.stage(), "Catalog already loaded");
            return Ok(self.pipeline.stage());
        }

        let mut action = self.pipeline.handle(PipelineEvent::SearchStarted)?;
        loop {
            action = match action {
                PipelineAction::Search => {
                    self.record(CatalogEvent::new(CatalogEventKind::SearchStarted));
                    match self.service.search(&self.query).await {
                        Ok(results) => {
                            tracing::info!(count = results.result_ids.len(), "Dog ids received");
                            self.record(
                                CatalogEvent::new(CatalogEventKind::IdsReceived)
                                    .with_data(json!({ "count": results.result_ids.len() })),
                            );
                            self.pipeline
                                .handle(PipelineEvent::IdsReceived(results.result_ids))?
                        }
                        Err(source) => return Err(self.fail_stage(SEARCH_FAILED, source)),
                    }
                }
                PipelineAction::FetchDetails(ids) => {
                    self.record(
                        CatalogEvent::new(CatalogEventKind::DetailsRequested)
                            .with_data(json!({ "count": ids.len() })),
                    );
                    match self.service.fetch_dogs(&ids).await {
                        Ok(dogs) => {
                            tracing::info!(count = dogs.len(), "Dog details received");
                            self.record(
                                CatalogEvent::new(CatalogEventKind::DetailsReceived)
                                    .with_data(json!({ "count": dogs.len() })),
                            );
                            self.pipeline.handle(PipelineEvent::DetailsReceived(dogs))?
                        }
                        Err(source) => return Err(self.fail_stage(DETAILS_FAILED, source)),
                    }
                }
                PipelineAction::Done => break,
            };
        }

        Ok(self.pipeline.stage())
    }

    fn fail_stage(&mut self, message: &'static str, source: ServiceError) -> CatalogError {
        tracing::warn!(error = %source, "{}", message);
        self.record(
            CatalogEvent::new(CatalogEventKind::StageFailed).with_data(json!({ "message": message })),
        );
        if let Err(e) = self.pipeline.handle(PipelineEvent::StageFailed(message)) {
            return e.into();
        }
        self.error = Some(message.to_string());
        CatalogError::Stage { message, source }
    }

    pub fn stage(&self) -> FetchStage {
        self.pipeline.stage()
    }

    /// Catalog rows in detail-response order
    pub fn dogs(&self) -> &[DogRecord] {
        self.pipeline.dogs()
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Id returned by the last successful match request
    pub fn match_id(&self) -> Option<&str> {
        self.match_id.as_deref()
    }

    /// The favorite the last match resolved to
    pub fn current_match(&self) -> Option<&DogRecord> {
        self.matched.as_ref()
    }

    pub fn events(&self) -> &[CatalogEvent] {
        &self.events
    }

    /// Add a dog to the favorites. Returns `false` if it was already there.
    pub fn add_favorite(&mut self, dog: DogRecord) -> bool {
        let id = dog.id.clone();
        let added = self.favorites.add(dog);
        if added {
            self.record(
                CatalogEvent::new(CatalogEventKind::FavoriteAdded).with_data(json!({ "id": id })),
            );
        }
        added
    }

    /// Favorite a dog from the loaded catalog by id
    pub fn favorite(&mut self, id: &str) -> Result<bool, CatalogError> {
        let dog = self
            .dogs()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownDog(id.to_string()))?;
        Ok(self.add_favorite(dog))
    }

    /// Remove a favorite. Unknown ids are a no-op returning `false`.
    pub fn remove_favorite(&mut self, id: &str) -> bool {
        let removed = self.favorites.remove(id).is_some();
        if removed {
            self.record(
                CatalogEvent::new(CatalogEventKind::FavoriteRemoved).with_data(json!({ "id": id })),
            );
        }
        removed
    }

    /// Whether the match action is enabled
    pub fn can_match(&self) -> bool {
        !self.favorites.is_empty()
    }

    /// Ask the service to pick one of the favorites
    ///
    /// The returned id is looked up in the current favorites; an id that
    /// is not a favorite leaves the match unset without raising an error.
    #[tracing::instrument(skip(self), fields(favorites = self.favorites.len()))]
    pub async fn generate_match(&mut self) -> Result<Option<&DogRecord>, CatalogError> {
        if !self.can_match() {
            return Err(CatalogError::NoFavorites);
        }

        let ids = self.favorites.ids().to_vec();
        self.match_id = None;
        self.matched = None;
        self.record(
            CatalogEvent::new(CatalogEventKind::MatchRequested)
                .with_data(json!({ "count": ids.len() })),
        );

        match self.service.match_dogs(&ids).await {
            Ok(result) => {
                if self.error.as_deref() == Some(MATCH_FAILED) {
                    self.error = None;
                }
                self.match_received(result.dog_id);
                Ok(self.matched.as_ref())
            }
            Err(source) => {
                tracing::warn!(error = %source, "{}", MATCH_FAILED);
                self.record(CatalogEvent::new(CatalogEventKind::MatchFailed));
                self.error = Some(MATCH_FAILED.to_string());
                Err(CatalogError::Stage {
                    message: MATCH_FAILED,
                    source,
                })
            }
        }
    }

    fn match_received(&mut self, id: DogId) {
        self.matched = self.favorites.get(&id).cloned();
        match &self.matched {
            Some(dog) => tracing::info!(id = %id, name = %dog.name, "Match found"),
            None => tracing::warn!(id = %id, "Match id is not among the favorites"),
        }
        self.record(
            CatalogEvent::new(CatalogEventKind::MatchReceived)
                .with_data(json!({ "id": id, "resolved": self.matched.is_some() })),
        );
        self.match_id = Some(id);
    }

    /// Everything the presentation layer needs, borrowed
    pub fn view(&self) -> CatalogView<'_> {
        CatalogView {
            stage: self.stage(),
            dogs: self.dogs(),
            favorites: self.favorites.iter().collect(),
            matched: self.current_match(),
            error: self.error(),
            can_match: self.can_match(),
        }
    }

    fn record(&mut self, event: CatalogEvent) {
        self.events.push(event);
    }
}
