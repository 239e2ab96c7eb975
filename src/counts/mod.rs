// Concept counting: presence matrix and document-presence proportions.
//
// For every (document, term) pair, the matrix holds how many of the
// document's n-grams equal the term's lookup key exactly. Both sides of
// the comparison went through the same normalization, so equality is plain
// string equality. The headline statistic is the document-presence
// proportion: the fraction of documents mentioning a term at least once,
// not how often they repeat it.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::concepts::ConceptGroup;
use crate::normalize::ngram::NgramTokenizer;
use crate::normalize::{CorpusView, NormalizedCorpus, Normalizer};

/// A vocabulary term resolved to its lookup form.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTerm {
    /// Surface form as authored in the vocabulary
    pub surface: String,
    /// Normalized (and, unless acronym, stemmed) lookup key
    pub key: String,
    /// Which corpus view the key is valid against
    pub view: CorpusView,
}

/// Resolve every term in the vocabulary, in group order then term order.
pub fn resolve_terms(groups: &[ConceptGroup], normalizer: &Normalizer) -> Vec<ResolvedTerm> {
    groups
        .iter()
        .flat_map(|group| group.terms.iter())
        .map(|term| ResolvedTerm {
            surface: term.term.clone(),
            key: normalizer.term_key(&term.term, term.is_acronym),
            view: if term.is_acronym {
                CorpusView::Raw
            } else {
                CorpusView::Stemmed
            },
        })
        .collect()
}

/// Occurrence counts for every (document, term) pair.
pub struct PresenceMatrix {
    doc_ids: Vec<u32>,
    terms: Vec<ResolvedTerm>,
    /// counts[row][col]: row follows doc_ids, col follows terms
    counts: Vec<Vec<u32>>,
}

impl PresenceMatrix {
    /// Count every term against every document. Each document's n-grams are
    /// tallied once per view, then terms are looked up in the tally for
    /// their view.
    pub fn build(
        corpus: &NormalizedCorpus,
        terms: Vec<ResolvedTerm>,
        tokenizer: &dyn NgramTokenizer,
    ) -> Self {
        let mut counts = Vec::with_capacity(corpus.len());
        for row in 0..corpus.len() {
            let raw_tally = tally(tokenizer.ngrams(&corpus.unstemmed[row]));
            let stemmed_tally = tally(tokenizer.ngrams(&corpus.stemmed[row]));
            let doc_counts = terms
                .iter()
                .map(|term| {
                    let view_tally = match term.view {
                        CorpusView::Raw => &raw_tally,
                        CorpusView::Stemmed => &stemmed_tally,
                    };
                    view_tally.get(&term.key).copied().unwrap_or(0)
                })
                .collect();
            counts.push(doc_counts);
        }
        debug!(
            documents = corpus.len(),
            terms = terms.len(),
            "Presence matrix built"
        );
        Self {
            doc_ids: corpus.doc_ids.clone(),
            terms,
            counts,
        }
    }

    pub fn doc_count(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> &[ResolvedTerm] {
        &self.terms
    }

    pub fn doc_ids(&self) -> &[u32] {
        &self.doc_ids
    }

    /// Column for a surface term, if the term is in this matrix.
    pub fn column_index(&self, surface: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.surface == surface)
    }

    /// Occurrence count for one document and one surface term.
    pub fn count(&self, doc_id: u32, surface: &str) -> Option<u32> {
        let row = self.doc_ids.iter().position(|&id| id == doc_id)?;
        let col = self.column_index(surface)?;
        Some(self.counts[row][col])
    }

    pub fn count_at(&self, row: usize, col: usize) -> u32 {
        self.counts[row][col]
    }

    /// How many documents mention the term at least once.
    pub fn documents_matched(&self, col: usize) -> usize {
        self.counts.iter().filter(|row| row[col] >= 1).count()
    }

    /// Fraction of documents mentioning the term at least once. An empty
    /// corpus yields 0.0, not an error.
    pub fn presence_proportion(&self, col: usize) -> f64 {
        if self.doc_ids.is_empty() {
            return 0.0;
        }
        self.documents_matched(col) as f64 / self.doc_ids.len() as f64
    }
}

fn tally(grams: Vec<String>) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for gram in grams {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// Per-term slice of a group summary.
#[derive(Debug, Clone, Serialize)]
pub struct TermSummary {
    pub term: String,
    pub is_acronym: bool,
    pub documents_matched: usize,
    pub proportion: f64,
}

/// Per-group presence: term rows plus the "any term in this group"
/// proportion, merged by document so a note mentioning two surface forms
/// counts once.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub documents: usize,
    pub documents_matched: usize,
    pub proportion: f64,
    pub terms: Vec<TermSummary>,
}

pub fn summarize_groups(matrix: &PresenceMatrix, groups: &[ConceptGroup]) -> Vec<GroupSummary> {
    let docs = matrix.doc_count();
    groups
        .iter()
        .map(|group| {
            let mut matched_any = vec![false; docs];
            let terms = group
                .terms
                .iter()
                .map(|term| match matrix.column_index(&term.term) {
                    Some(col) => {
                        for (row, matched) in matched_any.iter_mut().enumerate() {
                            if matrix.count_at(row, col) >= 1 {
                                *matched = true;
                            }
                        }
                        TermSummary {
                            term: term.term.clone(),
                            is_acronym: term.is_acronym,
                            documents_matched: matrix.documents_matched(col),
                            proportion: matrix.presence_proportion(col),
                        }
                    }
                    // Term absent from the matrix: it matches nothing.
                    None => TermSummary {
                        term: term.term.clone(),
                        is_acronym: term.is_acronym,
                        documents_matched: 0,
                        proportion: 0.0,
                    },
                })
                .collect();

            let documents_matched = matched_any.iter().filter(|m| **m).count();
            let proportion = if docs == 0 {
                0.0
            } else {
                documents_matched as f64 / docs as f64
            };
            GroupSummary {
                name: group.name.clone(),
                documents: docs,
                documents_matched,
                proportion,
                terms,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::ngram::SlidingWindow;

    /// Build a normalized corpus directly from (unstemmed, stemmed) pairs,
    /// bypassing the normalizer so these tests pin counting, not stemming.
    fn corpus(views: &[(&str, &str)]) -> NormalizedCorpus {
        NormalizedCorpus {
            doc_ids: (0..views.len() as u32).collect(),
            unstemmed: views.iter().map(|(u, _)| (*u).to_string()).collect(),
            stemmed: views.iter().map(|(_, s)| (*s).to_string()).collect(),
        }
    }

    fn raw_term(surface: &str) -> ResolvedTerm {
        ResolvedTerm {
            surface: surface.to_string(),
            key: surface.to_string(),
            view: CorpusView::Raw,
        }
    }

    fn stemmed_term(surface: &str, key: &str) -> ResolvedTerm {
        ResolvedTerm {
            surface: surface.to_string(),
            key: key.to_string(),
            view: CorpusView::Stemmed,
        }
    }

    #[test]
    fn test_counts_every_occurrence_in_a_document() {
        let corpus = corpus(&[("patient ards stable ards", "patient ard stabl ard")]);
        let matrix = PresenceMatrix::build(
            &corpus,
            vec![raw_term("ards")],
            &SlidingWindow::default(),
        );
        assert_eq!(matrix.count(0, "ards"), Some(2));
        // Two occurrences, one document.
        assert_eq!(matrix.documents_matched(0), 1);
    }

    #[test]
    fn test_absent_term_counts_zero() {
        let corpus = corpus(&[("patient stable", "patient stabl")]);
        let matrix = PresenceMatrix::build(
            &corpus,
            vec![raw_term("ards")],
            &SlidingWindow::default(),
        );
        assert_eq!(matrix.count(0, "ards"), Some(0));
        assert_eq!(matrix.presence_proportion(0), 0.0);
    }

    #[test]
    fn test_views_are_looked_up_independently() {
        // "ards" appears raw; the stemmed view holds "ard" only.
        let corpus = corpus(&[("patient has ards", "patient has ard")]);
        let raw = PresenceMatrix::build(
            &corpus,
            vec![raw_term("ards")],
            &SlidingWindow::default(),
        );
        assert_eq!(raw.count(0, "ards"), Some(1));

        let stemmed = PresenceMatrix::build(
            &corpus,
            vec![stemmed_term("ards", "ards")],
            &SlidingWindow::default(),
        );
        assert_eq!(stemmed.count(0, "ards"), Some(0));
    }

    #[test]
    fn test_multiword_key_matches_contiguous_ngram_only() {
        let corpus = corpus(&[
            ("mechan ventil start", "mechan ventil start"),
            ("mechan support ventil", "mechan support ventil"),
        ]);
        let matrix = PresenceMatrix::build(
            &corpus,
            vec![stemmed_term("mechanical ventilation", "mechan ventil")],
            &SlidingWindow::default(),
        );
        assert_eq!(matrix.count(0, "mechanical ventilation"), Some(1));
        // Tokens present but not adjacent: no match.
        assert_eq!(matrix.count(1, "mechanical ventilation"), Some(0));
        assert_eq!(matrix.presence_proportion(0), 0.5);
    }

    #[test]
    fn test_proportion_is_documents_not_occurrences() {
        let corpus = corpus(&[
            ("ards ards ards", "ard ard ard"),
            ("stable", "stabl"),
            ("stable", "stabl"),
            ("ards", "ard"),
        ]);
        let matrix = PresenceMatrix::build(
            &corpus,
            vec![raw_term("ards")],
            &SlidingWindow::default(),
        );
        // 4 occurrences across 2 of 4 documents.
        assert_eq!(matrix.documents_matched(0), 2);
        assert_eq!(matrix.presence_proportion(0), 0.5);
    }

    #[test]
    fn test_empty_corpus_reports_zero_not_error() {
        let corpus = corpus(&[]);
        let matrix = PresenceMatrix::build(
            &corpus,
            vec![raw_term("ards")],
            &SlidingWindow::default(),
        );
        assert_eq!(matrix.doc_count(), 0);
        assert_eq!(matrix.documents_matched(0), 0);
        assert_eq!(matrix.presence_proportion(0), 0.0);
    }

    #[test]
    fn test_count_uses_document_ids_not_row_positions() {
        let corpus = NormalizedCorpus {
            doc_ids: vec![5, 9],
            unstemmed: vec!["stable".to_string(), "ards".to_string()],
            stemmed: vec!["stabl".to_string(), "ard".to_string()],
        };
        let matrix = PresenceMatrix::build(
            &corpus,
            vec![raw_term("ards")],
            &SlidingWindow::default(),
        );
        assert_eq!(matrix.count(9, "ards"), Some(1));
        assert_eq!(matrix.count(5, "ards"), Some(0));
        assert_eq!(matrix.count(0, "ards"), None);
    }

    #[test]
    fn test_group_summary_merges_terms_by_document() {
        use crate::concepts::ConceptGroup;

        // Doc 0 mentions only the acronym, doc 1 only the long form,
        // doc 2 neither, doc 3 both.
        let corpus = corpus(&[
            ("ards confirmed", "ard confirm"),
            ("acute respiratory distress syndrome", "acut respiratori distress syndrom"),
            ("stable overnight", "stabl overnight"),
            ("ards acute respiratory distress syndrome", "ard acut respiratori distress syndrom"),
        ]);
        let terms = vec![
            stemmed_term(
                "acute respiratory distress syndrome",
                "acut respiratori distress syndrom",
            ),
            raw_term("ards"),
        ];
        let matrix = PresenceMatrix::build(&corpus, terms, &SlidingWindow::default());
        let groups = vec![ConceptGroup::new(
            "ARDS",
            &[
                ("acute respiratory distress syndrome", false),
                ("ards", true),
            ],
        )];

        let summaries = summarize_groups(&matrix, &groups);
        assert_eq!(summaries.len(), 1);
        let group = &summaries[0];
        assert_eq!(group.documents, 4);
        // Union of docs 0, 1, 3; doc 3 counted once.
        assert_eq!(group.documents_matched, 3);
        assert!((group.proportion - 0.75).abs() < 1e-9);

        assert_eq!(group.terms.len(), 2);
        assert_eq!(group.terms[0].documents_matched, 2); // docs 1 and 3
        assert_eq!(group.terms[1].documents_matched, 2); // docs 0 and 3
    }

    #[test]
    fn test_group_summary_empty_corpus() {
        use crate::concepts::ConceptGroup;

        let matrix = PresenceMatrix::build(
            &corpus(&[]),
            vec![raw_term("ards")],
            &SlidingWindow::default(),
        );
        let groups = vec![ConceptGroup::new("ARDS", &[("ards", true)])];
        let summaries = summarize_groups(&matrix, &groups);
        assert_eq!(summaries[0].documents, 0);
        assert_eq!(summaries[0].documents_matched, 0);
        assert_eq!(summaries[0].proportion, 0.0);
        assert_eq!(summaries[0].terms[0].proportion, 0.0);
    }
}
