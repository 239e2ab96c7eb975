// Seeded synthetic-corpus generation.
//
// Mad-libs over the static templates: pick a skeleton, fill each {slot}
// with a draw from the matching pool. Everything routes through one
// StdRng, so a seed fully determines the corpus.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::templates;
use super::{Corpus, Document};

pub struct CorpusGenerator {
    rng: StdRng,
}

impl CorpusGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate `n_docs` notes with sequential ids starting at 0.
    pub fn generate(&mut self, n_docs: usize) -> Corpus {
        let documents = (0..n_docs)
            .map(|i| Document {
                id: i as u32,
                text: self.synthesize_note(),
            })
            .collect();
        info!(documents = n_docs, "Synthetic corpus generated");
        Corpus::new(documents)
    }

    fn synthesize_note(&mut self) -> String {
        let template = self.pick(templates::NOTE_TEMPLATES);
        self.fill_template(template)
    }

    /// Replace each {slot} with a fresh draw, left to right. Repeated slots
    /// get independent draws.
    fn fill_template(&mut self, template: &str) -> String {
        let mut out = String::with_capacity(template.len() * 2);
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            out.push_str(&rest[..start]);
            let slot = &rest[start + 1..start + len];
            out.push_str(&self.draw(slot));
            rest = &rest[start + len + 1..];
        }
        out.push_str(rest);
        out
    }

    fn draw(&mut self, slot: &str) -> String {
        match slot {
            "name" => format!(
                "{} {}",
                self.pick(templates::FIRST_NAMES),
                self.pick(templates::LAST_NAMES)
            ),
            "age" => self.rng.random_range(25..=90).to_string(),
            "unit" => self.pick(templates::UNITS).to_string(),
            "concept" => self.concept_phrase(),
            "symptom" => self.pick(templates::SYMPTOMS).to_string(),
            "duration" => self.pick(templates::DURATIONS).to_string(),
            "day" => self.rng.random_range(1..=9).to_string(),
            "closing" => self.pick(templates::CLOSINGS).to_string(),
            // Unknown slot: keep the literal braces so the bad template is
            // visible in the generated text.
            other => format!("{{{other}}}"),
        }
    }

    fn concept_phrase(&mut self) -> String {
        let idx = self.rng.random_range(0..templates::CONCEPT_PHRASES.len());
        let phrase = &templates::CONCEPT_PHRASES[idx];
        pick_weighted(&mut self.rng, phrase.variants).to_string()
    }

    fn pick<'a>(&mut self, pool: &[&'a str]) -> &'a str {
        pool[self.rng.random_range(0..pool.len())]
    }
}

/// Draw one entry from a weighted slice. Weights must not all be zero.
fn pick_weighted<'a>(rng: &mut StdRng, variants: &[(&'a str, u32)]) -> &'a str {
    let total: u32 = variants.iter().map(|(_, w)| w).sum();
    let mut roll = rng.random_range(0..total);
    for (text, weight) in variants {
        if roll < *weight {
            return text;
        }
        roll -= weight;
    }
    variants[variants.len() - 1].0
}
