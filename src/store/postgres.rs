//! Postgres-backed candidate store and hydration reads.
//!
//! Thin read interface over the catalog schema; no matching logic lives
//! here. SQL is assembled once at construction (the schema name is
//! configuration, not a bind parameter) and candidate rows stream out
//! through `fetch`, so large catalogs are never materialized in memory.

use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use sqlx::PgPool;
use uuid::Uuid;

use super::{AliasCandidate, CandidateStore, CanonicalCandidate, StoreError};
use crate::model::{CatalogKind, ExerciseDetails, FoodDetails};

/// Streams candidate rows for one catalog family.
pub struct PgCandidateStore {
    pool: PgPool,
    canonical_all_sql: String,
    canonical_active_sql: String,
    alias_all_sql: String,
    alias_active_sql: String,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool, schema: &str, catalog: CatalogKind) -> Self {
        let (entity, alias, id_col) = match catalog {
            CatalogKind::Exercise => ("exercise", "exercise_alias", "exercise_id"),
            CatalogKind::Food => ("food", "food_alias", "food_id"),
        };

        let canonical_all_sql = format!(
            "select {id_col} as entity_id, display_name, normalized_name \
             from {schema}.{entity}"
        );
        let canonical_active_sql = format!("{canonical_all_sql} where is_active");

        let alias_all_sql = format!(
            "select a.{id_col} as entity_id, e.display_name, a.raw_alias, \
             a.normalized_alias, a.brand, a.model \
             from {schema}.{alias} a \
             join {schema}.{entity} e on e.{id_col} = a.{id_col} \
             where a.locale = $1"
        );
        let alias_active_sql = format!("{alias_all_sql} and a.is_active and e.is_active");

        Self {
            pool,
            canonical_all_sql,
            canonical_active_sql,
            alias_all_sql,
            alias_active_sql,
        }
    }
}

impl CandidateStore for PgCandidateStore {
    fn canonical_candidates(
        &self,
        active_only: bool,
    ) -> BoxStream<'_, Result<CanonicalCandidate, StoreError>> {
        let sql = if active_only {
            &self.canonical_active_sql
        } else {
            &self.canonical_all_sql
        };
        sqlx::query_as::<_, CanonicalCandidate>(sql)
            .fetch(&self.pool)
            .map_err(StoreError::from)
            .boxed()
    }

    fn alias_candidates<'a>(
        &'a self,
        locale: &'a str,
        active_only: bool,
    ) -> BoxStream<'a, Result<AliasCandidate, StoreError>> {
        let sql = if active_only {
            &self.alias_active_sql
        } else {
            &self.alias_all_sql
        };
        sqlx::query_as::<_, AliasCandidate>(sql)
            .bind(locale)
            .fetch(&self.pool)
            .map_err(StoreError::from)
            .boxed()
    }
}

/// Hydration reads: join resolved entity ids back to display rows.
pub struct PgCatalogRepository {
    pool: PgPool,
    exercises_by_ids_sql: String,
    foods_by_ids_sql: String,
    food_by_barcode_sql: String,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        let exercises_by_ids_sql = format!(
            "select exercise_id, display_name, kind, modality, \
             primary_muscles, secondary_muscles, joints \
             from {schema}.exercise \
             where exercise_id = any($1)"
        );
        // Macros are numeric in the schema; cast to float8 for the wire.
        let food_columns = "food_id, display_name, brand, barcode, source, basis, \
             kcal::float8 as kcal, protein_g::float8 as protein_g, \
             carbs_g::float8 as carbs_g, fat_g::float8 as fat_g";
        let foods_by_ids_sql = format!(
            "select {food_columns} from {schema}.food \
             where food_id = any($1) and is_public"
        );
        let food_by_barcode_sql = format!(
            "select {food_columns} from {schema}.food \
             where barcode = $1 and is_active \
             limit 1"
        );

        Self {
            pool,
            exercises_by_ids_sql,
            foods_by_ids_sql,
            food_by_barcode_sql,
        }
    }

    /// Display rows for the given exercise ids, in arbitrary order.
    pub async fn exercises_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<ExerciseDetails>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, ExerciseDetails>(&self.exercises_by_ids_sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Display rows for the given food ids, public rows only, in arbitrary
    /// order.
    pub async fn foods_by_ids(&self, ids: &[Uuid]) -> Result<Vec<FoodDetails>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, FoodDetails>(&self.foods_by_ids_sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Exact barcode lookup against active food rows.
    ///
    /// Expects an already-normalized barcode (see
    /// [`crate::model::normalize_barcode`]).
    pub async fn food_by_barcode(&self, barcode: &str) -> Result<Option<FoodDetails>, StoreError> {
        let row = sqlx::query_as::<_, FoodDetails>(&self.food_by_barcode_sql)
            .bind(barcode)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
