//! Core resolution: normalize the query, score candidates from both
//! sources, collapse to one candidate per entity, rank, truncate.
//!
//! The two candidate sources are scored as independent phases and merged
//! with explicit source priority. The database original expressed the
//! collapse as "rank within partition, keep rank = 1"; here it is an
//! explicit map keyed by entity id with a comparator-based replacement.
//!
//! Calls are stateless and side-effect-free: concurrent resolutions share
//! no mutable state and may run fully in parallel against the same store
//! snapshot.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use futures::TryStreamExt;
use tracing::debug;
use uuid::Uuid;

use crate::model::{MatchCandidate, MatchSource, SearchRequest};
use crate::normalize::normalize;
use crate::store::{CandidateStore, StoreError};
use crate::trigram::TrigramSet;

/// Resolution failures.
///
/// `InvalidQuery` and `InvalidArgument` are caller errors: surfaced
/// immediately, never retried, not system faults. `Store` is propagated
/// from the candidate store unmodified; retry policy belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The query is empty (or whitespace-only) after normalization.
    #[error("query is empty")]
    InvalidQuery,
    /// A request parameter is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The candidate store could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves free text to catalog entities against one candidate store.
pub struct Resolver<S> {
    store: S,
}

impl<S: CandidateStore> Resolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolve `request.query` to at most `request.max_results` entities,
    /// each appearing once, ordered by descending score.
    ///
    /// Zero surviving candidates is a valid outcome and returns an empty
    /// vector, not an error. Output is deterministic for identical inputs
    /// over unchanged store contents.
    pub async fn resolve(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<MatchCandidate>, ResolveError> {
        if request.max_results == 0 {
            return Err(ResolveError::InvalidArgument(
                "max_results must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&request.min_score) {
            return Err(ResolveError::InvalidArgument(
                "min_score must lie in [0, 1]".to_string(),
            ));
        }
        let query = normalize(&request.query);
        if query.is_empty() {
            return Err(ResolveError::InvalidQuery);
        }
        let query_trigrams = TrigramSet::new(&query);

        // Best surviving candidate per entity, across both sources.
        let mut best: HashMap<Uuid, MatchCandidate> = HashMap::new();

        // Phase 1: canonical names.
        let mut canonical_seen = 0usize;
        let mut canonical = self.store.canonical_candidates(true);
        while let Some(row) = canonical.try_next().await? {
            canonical_seen += 1;
            if let Some(score) = score_candidate(&query_trigrams, &row.normalized_name, request) {
                keep_best(
                    &mut best,
                    MatchCandidate {
                        entity_id: row.entity_id,
                        display_name: row.display_name.clone(),
                        matched_text: row.display_name,
                        matched_source: MatchSource::Canonical,
                        score,
                        brand: None,
                        model: None,
                    },
                );
            }
        }

        // Phase 2: aliases for the requested locale. The same alias text
        // may map to several entities; each survives for its own entity.
        let mut alias_seen = 0usize;
        let mut aliases = self.store.alias_candidates(&request.locale, true);
        while let Some(row) = aliases.try_next().await? {
            alias_seen += 1;
            if let Some(score) = score_candidate(&query_trigrams, &row.normalized_alias, request) {
                keep_best(
                    &mut best,
                    MatchCandidate {
                        entity_id: row.entity_id,
                        display_name: row.display_name,
                        matched_text: row.raw_alias,
                        matched_source: MatchSource::Alias,
                        score,
                        brand: row.brand,
                        model: row.model,
                    },
                );
            }
        }

        debug!(
            query = %query,
            canonical_seen,
            alias_seen,
            survivors = best.len(),
            "scored candidate sources"
        );

        let mut results: Vec<MatchCandidate> = best.into_values().collect();
        results.sort_by(rank_order);
        results.truncate(request.max_results);
        Ok(results)
    }
}

/// Prefilter plus score.
///
/// `None` when the candidate shares no trigram with the query (equivalent
/// to scoring 0 and dropping before ranking) or lands below the floor.
fn score_candidate(
    query: &TrigramSet,
    normalized_text: &str,
    request: &SearchRequest,
) -> Option<f64> {
    let grams = TrigramSet::new(normalized_text);
    if !query.shares_any(&grams) {
        return None;
    }
    let score = query.similarity(&grams);
    (score >= request.min_score).then_some(score)
}

/// Keep exactly one candidate per entity: the one `beats` prefers.
fn keep_best(best: &mut HashMap<Uuid, MatchCandidate>, candidate: MatchCandidate) {
    match best.entry(candidate.entity_id) {
        Entry::Vacant(slot) => {
            slot.insert(candidate);
        }
        Entry::Occupied(mut slot) => {
            if beats(&candidate, slot.get()) {
                slot.insert(candidate);
            }
        }
    }
}

/// Dedup preference: higher score; on a tie canonical over alias; on a
/// further tie the lexicographically smaller matched text.
fn beats(challenger: &MatchCandidate, incumbent: &MatchCandidate) -> bool {
    match challenger
        .score
        .partial_cmp(&incumbent.score)
        .unwrap_or(Ordering::Equal)
    {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match (challenger.matched_source, incumbent.matched_source) {
            (MatchSource::Canonical, MatchSource::Alias) => true,
            (MatchSource::Alias, MatchSource::Canonical) => false,
            _ => challenger.matched_text < incumbent.matched_text,
        },
    }
}

/// Ranking: score descending, then display name ascending, then entity id
/// ascending. The id key pins the order when score and name both tie, since
/// the dedup map iterates in arbitrary order.
fn rank_order(a: &MatchCandidate, b: &MatchCandidate) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.display_name.cmp(&b.display_name))
        .then_with(|| a.entity_id.cmp(&b.entity_id))
}
