// Text normalization: the fixed preprocessing pipeline applied to every
// document and every concept term.
//
// The order is deliberate and load-bearing: lowercase, collapse whitespace,
// drop stopwords (whole-token matches only), strip punctuation, strip
// digits, collapse again. Stopword removal runs before punctuation removal
// so tokens are compared against the stopword list in their attached form.
// That ordering costs full idempotence: a stopword with punctuation attached
// ("now.") fails the whole-token comparison and is bared by the punctuation
// pass, so the bare token leaks into both views and only another full pass
// would drop it. The character passes themselves are idempotent, and the
// trailing collapse closes the gaps left by tokens that dissolve entirely.
//
// Stemming is not part of `normalize`: it is a separate pass over the
// normalized text, so every document gets two aligned views, unstemmed
// (acronym lookups) and stemmed (multi-word phrase lookups).

pub mod ngram;
pub mod traits;

use std::collections::HashSet;

use regex_lite::Regex;
use serde::Serialize;
use stop_words::{get, LANGUAGE};
use tracing::debug;

use crate::corpus::Corpus;
use ngram::NgramTokenizer;
use traits::{SnowballStemmer, Stemmer};

/// Which normalized view of the corpus a lookup runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusView {
    /// Lowercased, stopword-/punctuation-/digit-stripped, unstemmed.
    Raw,
    /// The raw view with every token stemmed.
    Stemmed,
}

/// ASCII punctuation as a character class. Matched characters are deleted,
/// not replaced, so hyphenated words collapse into one token.
const PUNCT_PATTERN: &str = r"[!-/:-@\[-`{-~]";
const DIGIT_PATTERN: &str = "[0-9]";
const WHITESPACE_PATTERN: &str = r"\s+";

pub struct Normalizer {
    stopwords: HashSet<String>,
    whitespace_re: Regex,
    punct_re: Regex,
    digit_re: Regex,
    stemmer: Box<dyn Stemmer>,
}

impl Normalizer {
    /// The standard English normalizer: ISO stopword list, Porter2 stemming.
    pub fn english() -> Self {
        Self::with_stemmer(Box::new(SnowballStemmer::english()))
    }

    /// Same character passes and stopword list, custom stemmer.
    pub fn with_stemmer(stemmer: Box<dyn Stemmer>) -> Self {
        let stopwords: HashSet<String> = get(LANGUAGE::English).into_iter().collect();
        Self {
            stopwords,
            whitespace_re: Regex::new(WHITESPACE_PATTERN).expect("static whitespace pattern"),
            punct_re: Regex::new(PUNCT_PATTERN).expect("static punctuation pattern"),
            digit_re: Regex::new(DIGIT_PATTERN).expect("static digit pattern"),
            stemmer,
        }
    }

    /// Run the full normalization pipeline. Stemming is not applied here.
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        let collapsed = self.collapse_whitespace(&lowered);
        let destopped = self.strip_stopwords(&collapsed);
        let depunct = self.punct_re.replace_all(&destopped, "");
        let dedigit = self.digit_re.replace_all(&depunct, "");
        self.collapse_whitespace(&dedigit)
    }

    /// Stem already-normalized text token by token, preserving order and
    /// single-space joins.
    pub fn stem_text(&self, normalized: &str) -> String {
        normalized
            .split_whitespace()
            .map(|token| self.stemmer.stem(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Resolve a vocabulary term to its lookup key. Acronyms are normalized
    /// but never stemmed: the stemmer mangles short abbreviations ("ards"
    /// stems to "ard"), and an acronym lookup runs against the raw view.
    pub fn term_key(&self, term: &str, is_acronym: bool) -> String {
        let normalized = self.normalize(term);
        if is_acronym {
            normalized
        } else {
            self.stem_text(&normalized)
        }
    }

    /// Normalize every document, producing the two aligned corpus views.
    pub fn normalize_corpus(&self, corpus: &Corpus) -> NormalizedCorpus {
        let mut doc_ids = Vec::with_capacity(corpus.len());
        let mut unstemmed = Vec::with_capacity(corpus.len());
        let mut stemmed = Vec::with_capacity(corpus.len());
        for doc in &corpus.documents {
            let raw = self.normalize(&doc.text);
            let stem = self.stem_text(&raw);
            doc_ids.push(doc.id);
            unstemmed.push(raw);
            stemmed.push(stem);
        }
        debug!(documents = doc_ids.len(), "Normalization views built");
        NormalizedCorpus {
            doc_ids,
            unstemmed,
            stemmed,
        }
    }

    fn collapse_whitespace(&self, text: &str) -> String {
        self.whitespace_re
            .replace_all(text.trim(), " ")
            .into_owned()
    }

    /// Drop tokens that match the stopword list exactly. Substrings inside
    /// longer tokens are untouched ("hand" keeps its "and").
    fn strip_stopwords(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|token| !self.stopwords.contains(*token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The corpus after normalization: parallel vectors indexed by document
/// position, with the original document ids carried alongside.
#[derive(Debug, Clone)]
pub struct NormalizedCorpus {
    pub doc_ids: Vec<u32>,
    pub unstemmed: Vec<String>,
    pub stemmed: Vec<String>,
}

impl NormalizedCorpus {
    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    pub fn view(&self, view: CorpusView) -> &[String] {
        match view {
            CorpusView::Raw => &self.unstemmed,
            CorpusView::Stemmed => &self.stemmed,
        }
    }

    /// Every distinct n-gram observed in the given view, in first-observation
    /// order (document order, then ascending n within a document).
    pub fn distinct_ngrams(&self, view: CorpusView, tokenizer: &dyn NgramTokenizer) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for text in self.view(view) {
            for gram in tokenizer.ngrams(text) {
                if seen.insert(gram.clone()) {
                    out.push(gram);
                }
            }
        }
        out
    }
}
