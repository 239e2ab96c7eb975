// Full analysis pipeline: validate -> normalize -> count -> fuzzy scan.
//
// The stages run strictly in sequence and every intermediate is an
// explicit value; nothing mutates the corpus in place. The fuzzy table is
// computed last and is purely diagnostic: the exact-match counts are
// already final when the scan starts.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use crate::concepts::{validate_vocabulary, ConceptGroup};
use crate::corpus::Corpus;
use crate::counts::{resolve_terms, summarize_groups, GroupSummary, PresenceMatrix};
use crate::fuzzy::{self, FuzzyMatch, SimilarityRow, SimilarityTable};
use crate::normalize::ngram::SlidingWindow;
use crate::normalize::{CorpusView, Normalizer};

/// Default similarity threshold for the sensitivity report. Chosen by
/// inspection of score distributions, not by any statistical criterion,
/// and always overridable.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.9;

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Accept a (term, n-gram) pair as a near-miss at or above this score.
    pub fuzzy_threshold: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

/// Everything a report renderer needs, in one serializable value.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub documents: usize,
    pub fuzzy_threshold: f64,
    pub groups: Vec<GroupSummary>,
    pub similarity: SimilarityTable,
    pub fuzzy_matches: Vec<FuzzyMatch>,
}

/// Run the whole analysis over a corpus.
///
/// Fails fast on a malformed vocabulary or threshold. An empty corpus is
/// valid input: every proportion comes back 0.0 and the similarity table
/// has no rows.
pub fn run(
    corpus: &Corpus,
    vocabulary: &[ConceptGroup],
    options: &AnalysisOptions,
) -> Result<AnalysisReport> {
    if !(options.fuzzy_threshold > 0.0 && options.fuzzy_threshold <= 1.0) {
        anyhow::bail!(
            "Fuzzy threshold must be in (0.0, 1.0], got {}",
            options.fuzzy_threshold
        );
    }

    let normalizer = Normalizer::english();
    validate_vocabulary(vocabulary, &normalizer)?;

    // Step 1: normalize every document into the two aligned views.
    let normalized = normalizer.normalize_corpus(corpus);
    info!(documents = normalized.len(), "Corpus normalized");

    // Step 2: exact n-gram counting against the vocabulary.
    let tokenizer = SlidingWindow::default();
    let terms = resolve_terms(vocabulary, &normalizer);
    let matrix = PresenceMatrix::build(&normalized, terms, &tokenizer);
    let groups = summarize_groups(&matrix, vocabulary);
    info!(terms = matrix.term_count(), "Concept counts complete");

    // Step 3: fuzzy scan over the raw view. Misspellings are a surface
    // phenomenon, so terms are compared as lowercased surface forms against
    // unstemmed n-grams.
    let ngrams = normalized.distinct_ngrams(CorpusView::Raw, &tokenizer);
    let fuzzy_terms: Vec<String> = vocabulary
        .iter()
        .flat_map(|group| group.terms.iter())
        .map(|term| term.term.to_lowercase())
        .collect();

    let pb = ProgressBar::new(ngrams.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Fuzzy scan [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let mut rows = Vec::with_capacity(ngrams.len());
    for ngram in &ngrams {
        rows.push(SimilarityRow {
            ngram: ngram.clone(),
            scores: fuzzy::score_against(&fuzzy_terms, ngram),
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    let similarity = SimilarityTable::from_rows(fuzzy_terms, rows);
    let fuzzy_matches = similarity.matches_above(options.fuzzy_threshold);
    info!(
        ngrams = similarity.ngram_count(),
        matches = fuzzy_matches.len(),
        threshold = options.fuzzy_threshold,
        "Fuzzy scan complete"
    );

    Ok(AnalysisReport {
        documents: corpus.len(),
        fuzzy_threshold: options.fuzzy_threshold,
        groups,
        similarity,
        fuzzy_matches,
    })
}
