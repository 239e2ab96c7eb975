// Corpus data model: the documents every later stage consumes.
//
// A corpus is immutable once built: the pipeline derives normalized views
// from it rather than rewriting document text in place.

pub mod generator;
pub mod keywords;
pub mod templates;

use serde::Serialize;

/// One synthetic clinical note.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Stable identifier, assigned in generation order starting at 0
    pub id: u32,
    /// Raw note text, before any normalization
    pub text: String,
}

/// An ordered collection of documents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Corpus {
    pub documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Build a corpus from raw texts, assigning ids in iteration order.
    pub fn from_texts<I>(texts: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let documents = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Document { id: i as u32, text })
            .collect();
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate over raw document texts in id order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|d| d.text.as_str())
    }
}
