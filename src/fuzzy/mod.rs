// Fuzzy sensitivity analysis: what would exact matching have missed?
//
// Scores every observed n-gram against every vocabulary surface term with
// normalized Levenshtein similarity. The table is dense and diagnostic
// only: accepted matches are reported for inspection, never folded back
// into the exact-match counts. Terms here are lowercased surface forms,
// not normalized keys, because a misspelling is a surface phenomenon.

use std::cmp::Ordering;

use serde::Serialize;

/// Similarity in [0, 1]: 1.0 exactly when the strings are equal, otherwise
/// 1 minus the edit distance over the longer length. Symmetric.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Score one n-gram against every term. Output order follows `terms`.
pub fn score_against(terms: &[String], ngram: &str) -> Vec<f64> {
    terms.iter().map(|term| similarity(term, ngram)).collect()
}

/// One observed n-gram and its similarity to every term.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityRow {
    pub ngram: String,
    pub scores: Vec<f64>,
}

/// Dense similarity table: one row per distinct observed n-gram, one score
/// column per vocabulary term.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityTable {
    terms: Vec<String>,
    rows: Vec<SimilarityRow>,
}

/// A term/n-gram pair at or above the acceptance threshold.
#[derive(Debug, Clone, Serialize)]
pub struct FuzzyMatch {
    pub term: String,
    pub ngram: String,
    pub score: f64,
}

impl SimilarityTable {
    /// Score every n-gram against every term.
    pub fn build(terms: Vec<String>, ngrams: &[String]) -> Self {
        let rows = ngrams
            .iter()
            .map(|ngram| SimilarityRow {
                ngram: ngram.clone(),
                scores: score_against(&terms, ngram),
            })
            .collect();
        Self { terms, rows }
    }

    /// Assemble a table from rows scored elsewhere (the pipeline scores row
    /// by row to drive its progress bar). Row score vectors must follow the
    /// order of `terms`.
    pub fn from_rows(terms: Vec<String>, rows: Vec<SimilarityRow>) -> Self {
        Self { terms, rows }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn rows(&self) -> &[SimilarityRow] {
        &self.rows
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn ngram_count(&self) -> usize {
        self.rows.len()
    }

    /// Score for one (term, n-gram) cell, if both are present.
    pub fn score(&self, term: &str, ngram: &str) -> Option<f64> {
        let col = self.terms.iter().position(|t| t == term)?;
        let row = self.rows.iter().find(|r| r.ngram == ngram)?;
        row.scores.get(col).copied()
    }

    /// Every cell at or above the threshold, excluding a term's exact match
    /// with itself (similarity 1.0 on identical strings says nothing about
    /// near-misses). Grouped by term in column order, highest score first.
    pub fn matches_above(&self, threshold: f64) -> Vec<FuzzyMatch> {
        let mut matches = Vec::new();
        for (col, term) in self.terms.iter().enumerate() {
            let mut for_term: Vec<&SimilarityRow> = self
                .rows
                .iter()
                .filter(|row| row.ngram != *term && row.scores[col] >= threshold)
                .collect();
            for_term.sort_by(|a, b| {
                b.scores[col]
                    .partial_cmp(&a.scores[col])
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.ngram.cmp(&b.ngram))
            });
            matches.extend(for_term.into_iter().map(|row| FuzzyMatch {
                term: term.clone(),
                ngram: row.ngram.clone(),
                score: row.scores[col],
            }));
        }
        matches
    }

    /// The closest non-exact n-gram to a term, regardless of threshold.
    /// Ties keep the earliest-observed n-gram.
    pub fn best_match(&self, term: &str) -> Option<(&str, f64)> {
        let col = self.terms.iter().position(|t| t == term)?;
        let mut best: Option<(&str, f64)> = None;
        for row in &self.rows {
            if row.ngram == *term {
                continue;
            }
            let score = row.scores[col];
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((row.ngram.as_str(), score));
            }
        }
        best
    }
}
