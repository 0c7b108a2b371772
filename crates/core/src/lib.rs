//! # PawMatch Core
//!
//! Client-side logic for the PawMatch dog adoption flow: log in against the
//! adoption service, load a catalog of dogs, keep favorites, and ask the
//! service to pick a match among them.
//!
//! ## Architecture
//!
//! - `app` - Root composition: the session gate over login and catalog
//! - `session` - Session context owned by the root
//! - `login` - Credential validation and submission
//! - `catalog/` - Fetch pipeline state machine, favorites, match lookup
//! - `client/` - `DogService` trait and its reqwest implementation
//! - `config` - Service location and request shaping
//! - `models` - Wire types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pawmatch_core::{App, HttpDogService, LoginForm, SearchQuery, ServiceConfig};
//!
//! let config = ServiceConfig::from_env()?;
//! let query = SearchQuery::from(&config);
//! let service = HttpDogService::new(config)?;
//! let mut app = App::new(Arc::new(service), query);
//! *app.login_form_mut() = LoginForm::with_input("Ada", "ada@example.com");
//! if app.submit_login().await {
//!     let catalog = app.catalog_mut().unwrap();
//!     catalog.load().await?;
//! }
//! ```

pub mod app;
pub mod catalog;
pub mod client;
pub mod config;
pub mod errors;
pub mod login;
pub mod models;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{App, View};
pub use catalog::{Catalog, CatalogView, FetchStage};
pub use client::{DogService, HttpDogService};
pub use config::ServiceConfig;
pub use errors::{CatalogError, ServiceError, ValidationError};
pub use login::LoginForm;
pub use models::{Credentials, DogId, DogRecord, MatchResult, SearchQuery, SearchResults};
pub use session::Session;
