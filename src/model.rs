//! Domain types for catalog resolution.
//!
//! The request/response types here are the crate's outward surface; a
//! transport layer (out of scope) decodes a `SearchRequest` from its inbound
//! representation and serializes the match rows straight back out.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which catalog family a candidate store reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Exercise,
    Food,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Exercise => "exercise",
            CatalogKind::Food => "food",
        }
    }
}

/// Which candidate source produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// The entity's own display name matched.
    Canonical,
    /// A known alias of the entity matched.
    Alias,
}

impl MatchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchSource::Canonical => "canonical",
            MatchSource::Alias => "alias",
        }
    }
}

/// A catalog search request.
///
/// Field defaults match the inbound interface: locale "en", 25 results, no
/// score floor. `Deserialize` carries the same defaults so a transport layer
/// can decode partial requests directly.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    /// Free-text user input.
    pub query: String,
    /// Locale filter applied to alias candidates.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Result count cap; must be positive.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Minimum similarity to keep; must lie in `[0, 1]`.
    #[serde(default)]
    pub min_score: f64,
}

impl SearchRequest {
    /// A request with defaults for everything but the query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            locale: default_locale(),
            max_results: default_max_results(),
            min_score: 0.0,
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_max_results() -> usize {
    25
}

/// A resolved candidate: one entity, its best-scoring matched text.
///
/// Transient: produced during a single resolution call and discarded after
/// the call returns.
#[derive(Debug, Clone, Serialize)]
pub struct MatchCandidate {
    pub entity_id: Uuid,
    pub display_name: String,
    /// The alias or canonical name text that produced the hit.
    pub matched_text: String,
    pub matched_source: MatchSource,
    /// Trigram similarity in `[0, 1]`.
    pub score: f64,
    /// Brand annotation carried from an alias match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Model annotation carried from an alias match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Hydrated exercise display row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ExerciseDetails {
    pub exercise_id: Uuid,
    pub display_name: String,
    pub kind: String,
    pub modality: Option<String>,
    pub primary_muscles: Vec<String>,
    pub secondary_muscles: Vec<String>,
    pub joints: Vec<String>,
}

/// Hydrated food display row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FoodDetails {
    pub food_id: Uuid,
    pub display_name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    /// Row provenance (seed data, user submission, importer name).
    pub source: Option<String>,
    /// Basis the macros are expressed on (e.g. "per_100g").
    pub basis: Option<String>,
    pub kcal: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
}

/// Outward result row for an exercise search.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseMatch {
    pub exercise_id: Uuid,
    pub display_name: String,
    pub kind: String,
    pub modality: Option<String>,
    pub score: f64,
    pub matched_text: String,
    pub matched_source: MatchSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// Outward result row for a food search.
#[derive(Debug, Clone, Serialize)]
pub struct FoodMatch {
    pub food_id: Uuid,
    pub display_name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub source: Option<String>,
    pub basis: Option<String>,
    pub kcal: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub score: f64,
    pub matched_text: String,
    pub matched_source: MatchSource,
}

/// Normalize a barcode: strip whitespace, require 8-14 digits.
///
/// Returns `None` for anything that is not a plain digit string of that
/// length after stripping.
pub fn normalize_barcode(raw: &str) -> Option<String> {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if (8..=14).contains(&stripped.len()) && stripped.chars().all(|c| c.is_ascii_digit()) {
        Some(stripped)
    } else {
        None
    }
}
