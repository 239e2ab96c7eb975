// Stemmer trait: swap-ready abstraction.
//
// The pipeline only needs token -> stem; any suffix-stripping stemmer
// satisfies the contract. The default is the Porter2 (Snowball English)
// stemmer, which is what the reference vocabulary was authored against.

use rust_stemmers::Algorithm;

/// Trait for reducing a single token to its stem.
pub trait Stemmer {
    fn stem(&self, token: &str) -> String;
}

/// Porter2 English stemmer, the default.
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    pub fn english() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, token: &str) -> String {
        self.inner.stem(token).into_owned()
    }
}

/// No-op stemmer, for tests and for callers that want the character-level
/// passes without any stemming.
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, token: &str) -> String {
        token.to_string()
    }
}
