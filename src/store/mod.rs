//! Read-only candidate access for the resolver.
//!
//! The store holds no matching logic: it streams pre-normalized rows out of
//! the backing tables and the resolver does the rest. All mutation (seeding
//! entities, curating aliases, deactivation) happens through the external
//! ingestion path; from this crate's perspective the store is a read-only
//! snapshot.

use futures::stream::BoxStream;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCandidateStore;
pub use postgres::{PgCandidateStore, PgCatalogRepository};

/// A canonical-name candidate row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CanonicalCandidate {
    pub entity_id: Uuid,
    /// Raw display name; doubles as the matched text for canonical hits.
    pub display_name: String,
    /// Normalized form of the display name, computed at write time.
    pub normalized_name: String,
}

/// An alias candidate row, joined with the owning entity's display name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AliasCandidate {
    pub entity_id: Uuid,
    /// Display name of the owning entity (ranking key).
    pub display_name: String,
    /// Raw alias text as ingested.
    pub raw_alias: String,
    /// Normalized form of the alias text, computed at write time.
    pub normalized_alias: String,
    /// Brand annotation, e.g. "Hammer Strength".
    pub brand: Option<String>,
    /// Model annotation for branded equipment variants.
    pub model: Option<String>,
}

/// Failures reading from the backing store.
///
/// Propagated to callers unmodified; retry policy, if any, belongs to the
/// store client, not the resolver.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("candidate store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Read interface the resolver draws candidates from.
///
/// Both methods stream lazily over potentially large tables; the resolver
/// prefilters row-by-row, so implementations should not materialize the
/// full table either.
pub trait CandidateStore: Send + Sync {
    /// Canonical entity names. `active_only` hides soft-deactivated rows.
    fn canonical_candidates(
        &self,
        active_only: bool,
    ) -> BoxStream<'_, Result<CanonicalCandidate, StoreError>>;

    /// Alias rows for one locale. `active_only` hides rows whose alias or
    /// owning entity is deactivated.
    fn alias_candidates<'a>(
        &'a self,
        locale: &'a str,
        active_only: bool,
    ) -> BoxStream<'a, Result<AliasCandidate, StoreError>>;
}
