//! Trigram similarity scoring.
//!
//! Keeps the semantics the catalog previously got from the database's
//! trigram operator: a string decomposes into overlapping 3-character
//! shingles over a padded form (two leading spaces, one trailing), and the
//! similarity of two strings is the Jaccard overlap of their shingle sets.
//!
//! Two-stage use, mirroring the index-then-rank pattern: `shares_any` is the
//! cheap candidate prefilter, `similarity` the exact score. Skipping
//! candidates that share no trigram never changes the ranked output, because
//! the Jaccard score is 0 exactly when the intersection is empty.

use std::collections::HashSet;

/// The set of 3-character shingles of a normalized string.
#[derive(Debug, Clone, Default)]
pub struct TrigramSet {
    grams: HashSet<[char; 3]>,
}

impl TrigramSet {
    /// Build the trigram set of `text`.
    ///
    /// `text` is expected to be normalized already. The empty string yields
    /// an empty set; non-empty strings are padded so one- and two-character
    /// inputs still produce shingles.
    pub fn new(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let mut padded: Vec<char> = Vec::with_capacity(text.len() + 3);
        padded.push(' ');
        padded.push(' ');
        padded.extend(text.chars());
        padded.push(' ');
        let grams = padded.windows(3).map(|w| [w[0], w[1], w[2]]).collect();
        Self { grams }
    }

    /// Prefilter check: true when at least one trigram is shared.
    pub fn shares_any(&self, other: &TrigramSet) -> bool {
        let (small, large) = if self.grams.len() <= other.grams.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.grams.iter().any(|g| large.grams.contains(g))
    }

    /// Jaccard similarity `|A ∩ B| / |A ∪ B|` in `[0, 1]`.
    ///
    /// Identical normalized strings score 1.0 and strings sharing no
    /// trigram score 0.0. Two empty sets score 1.0, one empty set 0.0; the
    /// empty case is degenerate input callers reject upstream, but scoring
    /// it must not fail.
    pub fn similarity(&self, other: &TrigramSet) -> f64 {
        if self.grams.is_empty() && other.grams.is_empty() {
            return 1.0;
        }
        if self.grams.is_empty() || other.grams.is_empty() {
            return 0.0;
        }
        let (small, large) = if self.grams.len() <= other.grams.len() {
            (self, other)
        } else {
            (other, self)
        };
        let shared = small.grams.iter().filter(|g| large.grams.contains(*g)).count();
        let union = self.grams.len() + other.grams.len() - shared;
        shared as f64 / union as f64
    }
}
