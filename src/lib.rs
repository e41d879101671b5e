//! Catalog Gateway - Read-only Catalog Entity Resolution
//!
//! Resolves free-text user input ("Hammer Strength chest press", "lat
//! pulldown", "greek yogurt") to canonical catalog entities - exercises or
//! foods - by fuzzy-matching against canonical display names and a table of
//! known aliases (brand/model variants, shorthand, locale-specific
//! phrasing).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Consumers: HTTP/CLI layer, workout + meal logging (external)   │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  CatalogSearchService                            │
//! │        search_exercises / search_foods / food_by_barcode        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Resolver                                   │
//! │   normalize → score both sources → dedup by entity → rank       │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    CandidateStore                                │
//! │     canonical names + aliases (Postgres or in-memory)           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use catalog_gateway::{CatalogConfig, CatalogSearchService, SearchRequest};
//!
//! let config = CatalogConfig::default();
//! let pool = config.connect().await?;
//! let service = CatalogSearchService::new(pool, &config.schema);
//!
//! let matches = service
//!     .search_exercises(&SearchRequest::new("hammer strength chest press"))
//!     .await?;
//! ```
//!
//! Resolution is stateless and side-effect-free per call: concurrent calls
//! share no mutable state and see the store as a read-only snapshot. All
//! mutation (seeding, alias curation, deactivation) happens through the
//! external ingestion path.

pub mod config;
pub mod model;
pub mod normalize;
pub mod resolver;
pub mod service;
pub mod store;
pub mod trigram;

// Re-export main types
pub use config::CatalogConfig;
pub use model::{
    CatalogKind, ExerciseDetails, ExerciseMatch, FoodDetails, FoodMatch, MatchCandidate,
    MatchSource, SearchRequest,
};
pub use normalize::normalize;
pub use resolver::{ResolveError, Resolver};
pub use service::CatalogSearchService;
pub use store::{
    AliasCandidate, CandidateStore, CanonicalCandidate, MemoryCandidateStore, PgCandidateStore,
    PgCatalogRepository, StoreError,
};
pub use trigram::TrigramSet;
