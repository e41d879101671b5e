//! Catalog search facade: resolution plus hydration.
//!
//! One public method per searchable family, mirroring the endpoint surface
//! a transport layer mounts: exercise search, food search, and exact
//! barcode lookup. The service owns nothing mutable; every call is
//! independent and safe to run concurrently.

use std::collections::HashMap;

use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::model::{
    normalize_barcode, CatalogKind, ExerciseMatch, FoodDetails, FoodMatch, SearchRequest,
};
use crate::resolver::{ResolveError, Resolver};
use crate::store::{PgCandidateStore, PgCatalogRepository};

/// Read-only search service over the catalog schema.
pub struct CatalogSearchService {
    exercises: Resolver<PgCandidateStore>,
    foods: Resolver<PgCandidateStore>,
    repository: PgCatalogRepository,
}

impl CatalogSearchService {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        Self {
            exercises: Resolver::new(PgCandidateStore::new(
                pool.clone(),
                schema,
                CatalogKind::Exercise,
            )),
            foods: Resolver::new(PgCandidateStore::new(pool.clone(), schema, CatalogKind::Food)),
            repository: PgCatalogRepository::new(pool, schema),
        }
    }

    /// Fuzzy-search exercises by canonical name or alias.
    #[instrument(skip(self, request), fields(query = %request.query))]
    pub async fn search_exercises(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<ExerciseMatch>, ResolveError> {
        let candidates = self.exercises.resolve(request).await?;
        let ids: Vec<Uuid> = candidates.iter().map(|c| c.entity_id).collect();
        let details = self.repository.exercises_by_ids(&ids).await?;
        let by_id: HashMap<Uuid, _> = details.into_iter().map(|d| (d.exercise_id, d)).collect();
        debug!(resolved = ids.len(), hydrated = by_id.len(), "exercise search");

        // Resolver order is authoritative; rows that vanished between the
        // candidate read and the hydration read are skipped.
        let matches = candidates
            .into_iter()
            .filter_map(|c| {
                by_id.get(&c.entity_id).map(|d| ExerciseMatch {
                    exercise_id: c.entity_id,
                    display_name: d.display_name.clone(),
                    kind: d.kind.clone(),
                    modality: d.modality.clone(),
                    score: c.score,
                    matched_text: c.matched_text,
                    matched_source: c.matched_source,
                    brand_name: c.brand,
                    model_name: c.model,
                })
            })
            .collect();
        Ok(matches)
    }

    /// Fuzzy-search foods by canonical name or alias. Public foods only.
    #[instrument(skip(self, request), fields(query = %request.query))]
    pub async fn search_foods(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<FoodMatch>, ResolveError> {
        let candidates = self.foods.resolve(request).await?;
        let ids: Vec<Uuid> = candidates.iter().map(|c| c.entity_id).collect();
        // The hydration read enforces is_public, so non-public foods fall
        // out here even though their names and aliases are indexed.
        let details = self.repository.foods_by_ids(&ids).await?;
        let by_id: HashMap<Uuid, _> = details.into_iter().map(|d| (d.food_id, d)).collect();
        debug!(resolved = ids.len(), hydrated = by_id.len(), "food search");

        let matches = candidates
            .into_iter()
            .filter_map(|c| {
                by_id.get(&c.entity_id).map(|d| FoodMatch {
                    food_id: c.entity_id,
                    display_name: d.display_name.clone(),
                    brand: d.brand.clone(),
                    barcode: d.barcode.clone(),
                    source: d.source.clone(),
                    basis: d.basis.clone(),
                    kcal: d.kcal,
                    protein_g: d.protein_g,
                    carbs_g: d.carbs_g,
                    fat_g: d.fat_g,
                    score: c.score,
                    matched_text: c.matched_text,
                    matched_source: c.matched_source,
                })
            })
            .collect();
        Ok(matches)
    }

    /// Exact barcode lookup against active food rows.
    #[instrument(skip(self))]
    pub async fn food_by_barcode(
        &self,
        barcode: &str,
    ) -> Result<Option<FoodDetails>, ResolveError> {
        let code = normalize_barcode(barcode).ok_or_else(|| {
            ResolveError::InvalidArgument("barcode must be 8-14 digits".to_string())
        })?;
        Ok(self.repository.food_by_barcode(&code).await?)
    }
}
