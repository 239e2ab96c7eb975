// TF-IDF corpus overview.
//
// Ranks the most distinctive words across the generated notes so a reader
// can sanity-check what the corpus is about before trusting the concept
// counts. Each note is one document for IDF purposes: boilerplate shared
// by every template gets downweighted, concept words get boosted.

use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use serde::Serialize;
use stop_words::{get, LANGUAGE};
use tracing::info;

use super::Corpus;

pub struct KeywordExtractor {
    /// How many ranked keywords to keep
    pub top_n: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self { top_n: 15 }
    }
}

/// Ranked corpus keywords with their TF-IDF scores.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusKeywords {
    pub keywords: Vec<(String, f32)>,
    pub document_count: u32,
}

impl KeywordExtractor {
    /// Extract the top keywords. An empty corpus produces an empty table;
    /// the overview is informational and must not block a run.
    pub fn extract(&self, corpus: &Corpus) -> CorpusKeywords {
        if corpus.is_empty() {
            return CorpusKeywords {
                keywords: Vec::new(),
                document_count: 0,
            };
        }

        let texts: Vec<String> = corpus.texts().map(str::to_string).collect();
        let stop_words: Vec<String> = get(LANGUAGE::English);

        // The library handles tokenization, stop word removal, and scoring.
        let params = TfIdfParams::UnprocessedDocuments(&texts, &stop_words, None);
        let tfidf = TfIdf::new(params);
        let keywords: Vec<(String, f32)> = tfidf.get_ranked_word_scores(self.top_n);

        if let Some((top, score)) = keywords.first() {
            info!(
                keywords = keywords.len(),
                top_keyword = top.as_str(),
                top_score = score,
                "Extracted corpus keywords"
            );
        }

        CorpusKeywords {
            keywords,
            document_count: corpus.len() as u32,
        }
    }
}
