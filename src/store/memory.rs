//! In-memory candidate store for tests and embedded catalogs.
//!
//! Rows are normalized at insert time, so reads behave exactly like the
//! pre-normalized database columns; the alias/entity join is evaluated at
//! read time like its SQL counterpart.

use futures::stream::{self, BoxStream, StreamExt};
use uuid::Uuid;

use super::{AliasCandidate, CandidateStore, CanonicalCandidate, StoreError};
use crate::normalize::normalize;

#[derive(Debug, Clone)]
struct EntityRow {
    entity_id: Uuid,
    display_name: String,
    normalized_name: String,
    active: bool,
}

#[derive(Debug, Clone)]
struct AliasRow {
    entity_id: Uuid,
    raw_alias: String,
    normalized_alias: String,
    locale: String,
    brand: Option<String>,
    model: Option<String>,
    active: bool,
}

/// Candidate store backed by plain vectors.
#[derive(Debug, Default)]
pub struct MemoryCandidateStore {
    entities: Vec<EntityRow>,
    aliases: Vec<AliasRow>,
}

impl MemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a canonical entity name.
    pub fn insert_entity(&mut self, entity_id: Uuid, display_name: &str, active: bool) {
        self.entities.push(EntityRow {
            entity_id,
            display_name: display_name.to_string(),
            normalized_name: normalize(display_name),
            active,
        });
    }

    /// Insert an alias for an already-inserted entity.
    ///
    /// Duplicate (entity, normalized alias, locale) triples are ignored,
    /// matching the schema's uniqueness constraint.
    pub fn insert_alias(
        &mut self,
        entity_id: Uuid,
        alias: &str,
        locale: &str,
        brand: Option<&str>,
        model: Option<&str>,
        active: bool,
    ) {
        let normalized_alias = normalize(alias);
        let duplicate = self.aliases.iter().any(|a| {
            a.entity_id == entity_id && a.normalized_alias == normalized_alias && a.locale == locale
        });
        if duplicate {
            return;
        }
        self.aliases.push(AliasRow {
            entity_id,
            raw_alias: alias.to_string(),
            normalized_alias,
            locale: locale.to_string(),
            brand: brand.map(str::to_string),
            model: model.map(str::to_string),
            active,
        });
    }
}

impl CandidateStore for MemoryCandidateStore {
    fn canonical_candidates(
        &self,
        active_only: bool,
    ) -> BoxStream<'_, Result<CanonicalCandidate, StoreError>> {
        let iter = self
            .entities
            .iter()
            .filter(move |e| !active_only || e.active)
            .map(|e| {
                Ok(CanonicalCandidate {
                    entity_id: e.entity_id,
                    display_name: e.display_name.clone(),
                    normalized_name: e.normalized_name.clone(),
                })
            });
        stream::iter(iter).boxed()
    }

    fn alias_candidates<'a>(
        &'a self,
        locale: &'a str,
        active_only: bool,
    ) -> BoxStream<'a, Result<AliasCandidate, StoreError>> {
        let iter = self
            .aliases
            .iter()
            .filter(move |a| a.locale == locale && (!active_only || a.active))
            .filter_map(move |a| {
                // Inner join to the owning entity, as the SQL store does.
                self.entities
                    .iter()
                    .find(|e| e.entity_id == a.entity_id && (!active_only || e.active))
                    .map(|e| {
                        Ok(AliasCandidate {
                            entity_id: a.entity_id,
                            display_name: e.display_name.clone(),
                            raw_alias: a.raw_alias.clone(),
                            normalized_alias: a.normalized_alias.clone(),
                            brand: a.brand.clone(),
                            model: a.model.clone(),
                        })
                    })
            });
        stream::iter(iter).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    #[tokio::test]
    async fn normalizes_at_insert_time() {
        let mut store = MemoryCandidateStore::new();
        let id = Uuid::new_v4();
        store.insert_entity(id, "  Café Latte ", true);

        let rows: Vec<_> = store
            .canonical_candidates(true)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].display_name, "  Café Latte ");
        assert_eq!(rows[0].normalized_name, "cafe latte");
    }

    #[tokio::test]
    async fn filters_inactive_and_locale() {
        let mut store = MemoryCandidateStore::new();
        let live = Uuid::new_v4();
        let dead = Uuid::new_v4();
        store.insert_entity(live, "Chest Press", true);
        store.insert_entity(dead, "Old Machine", false);
        store.insert_alias(live, "brustpresse", "de", None, None, true);
        store.insert_alias(live, "chest press machine", "en", None, None, true);
        store.insert_alias(dead, "retired name", "en", None, None, true);
        store.insert_alias(live, "disabled alias", "en", None, None, false);

        let canonical: Vec<_> = store
            .canonical_candidates(true)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(canonical.len(), 1);

        let aliases: Vec<_> = store
            .alias_candidates("en", true)
            .try_collect()
            .await
            .unwrap();
        // "retired name" is joined to an inactive entity, "disabled alias"
        // is itself inactive, "brustpresse" is the wrong locale.
        assert_eq!(aliases.len(), 1);
        assert_eq!(aliases[0].raw_alias, "chest press machine");
        assert_eq!(aliases[0].display_name, "Chest Press");

        // With active_only off, curation tooling sees everything.
        let canonical: Vec<_> = store
            .canonical_candidates(false)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(canonical.len(), 2);
        let aliases: Vec<_> = store
            .alias_candidates("en", false)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(aliases.len(), 3);
    }

    #[tokio::test]
    async fn duplicate_alias_triples_are_ignored() {
        let mut store = MemoryCandidateStore::new();
        let id = Uuid::new_v4();
        store.insert_entity(id, "Chest Press", true);
        store.insert_alias(id, "Hammer Strength Chest Press", "en", None, None, true);
        store.insert_alias(id, "hammer strength chest press", "en", None, None, true);

        let aliases: Vec<_> = store
            .alias_candidates("en", true)
            .try_collect()
            .await
            .unwrap();
        assert_eq!(aliases.len(), 1);
    }
}
