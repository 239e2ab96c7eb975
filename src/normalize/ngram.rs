// Sliding-window n-gram generation over whitespace-delimited tokens.
//
// Concept terms and document text must agree on what an n-gram is, so both
// sides are tokenized by this one module. Orders run 1 through 4 for the
// standard analysis: no vocabulary term is longer than four tokens.

use anyhow::Result;

/// Highest n-gram order the standard analysis generates. Vocabulary terms
/// longer than this can never match and are rejected at validation.
pub const DEFAULT_MAX_ORDER: usize = 4;

/// Generate every contiguous n-gram of each order in
/// `min_order..=max_order`, in ascending order of n and left to right
/// within each order. Tokens are joined with a single space. Orders longer
/// than the token count contribute nothing.
pub fn ngrams(text: &str, min_order: usize, max_order: usize) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut grams = Vec::new();
    for order in min_order..=max_order {
        if order == 0 || order > tokens.len() {
            continue;
        }
        for window in tokens.windows(order) {
            grams.push(window.join(" "));
        }
    }
    grams
}

/// Trait for turning normalized text into n-grams.
pub trait NgramTokenizer {
    fn ngrams(&self, text: &str) -> Vec<String>;
}

/// The standard tokenizer: a sliding window over a fixed order range.
#[derive(Debug, Clone, Copy)]
pub struct SlidingWindow {
    min_order: usize,
    max_order: usize,
}

impl SlidingWindow {
    pub fn new(min_order: usize, max_order: usize) -> Result<Self> {
        if min_order == 0 {
            anyhow::bail!("n-gram order starts at 1, got min_order = 0");
        }
        if min_order > max_order {
            anyhow::bail!(
                "min_order {} exceeds max_order {}",
                min_order,
                max_order
            );
        }
        Ok(Self {
            min_order,
            max_order,
        })
    }

    pub fn max_order(&self) -> usize {
        self.max_order
    }
}

impl Default for SlidingWindow {
    /// Orders 1 through 4, the range the concept vocabulary is built for.
    fn default() -> Self {
        Self {
            min_order: 1,
            max_order: DEFAULT_MAX_ORDER,
        }
    }
}

impl NgramTokenizer for SlidingWindow {
    fn ngrams(&self, text: &str) -> Vec<String> {
        ngrams(text, self.min_order, self.max_order)
    }
}
