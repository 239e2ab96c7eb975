use std::env;

use anyhow::{Context, Result};

use crate::pipeline::analysis::DEFAULT_FUZZY_THRESHOLD;

/// Documents to generate when GAUZE_DOCS is unset.
pub const DEFAULT_DOCS: usize = 300;
/// Corpus seed when GAUZE_SEED is unset.
pub const DEFAULT_SEED: u64 = 17;
/// Report destination when GAUZE_REPORT_PATH is unset.
pub const DEFAULT_REPORT_PATH: &str = "output/gauze-report.md";

/// Central configuration loaded from environment variables.
///
/// Every knob has a default so `gauze report` works out of the box. The
/// .env file is loaded automatically at startup via dotenvy, and CLI flags
/// override whatever the environment provides.
pub struct Config {
    /// How many synthetic documents to generate (GAUZE_DOCS)
    pub docs: usize,
    /// Seed for the corpus generator (GAUZE_SEED)
    pub seed: u64,
    /// Similarity acceptance threshold for the fuzzy scan (GAUZE_FUZZY_THRESHOLD)
    pub fuzzy_threshold: f64,
    /// Where `gauze report` writes its markdown file (GAUZE_REPORT_PATH)
    pub report_path: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// defaults above. A set-but-unparsable variable is a configuration
    /// error, not a silent fallback.
    pub fn load() -> Result<Self> {
        let docs = match env::var("GAUZE_DOCS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("GAUZE_DOCS must be a non-negative integer, got '{raw}'"))?,
            Err(_) => DEFAULT_DOCS,
        };

        let seed = match env::var("GAUZE_SEED") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("GAUZE_SEED must be an unsigned integer, got '{raw}'"))?,
            Err(_) => DEFAULT_SEED,
        };

        let fuzzy_threshold = match env::var("GAUZE_FUZZY_THRESHOLD") {
            Ok(raw) => raw.parse().with_context(|| {
                format!("GAUZE_FUZZY_THRESHOLD must be a number, got '{raw}'")
            })?,
            Err(_) => DEFAULT_FUZZY_THRESHOLD,
        };

        let report_path =
            env::var("GAUZE_REPORT_PATH").unwrap_or_else(|_| DEFAULT_REPORT_PATH.to_string());

        let config = Self {
            docs,
            seed,
            fuzzy_threshold,
            report_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Re-check value ranges. Called by `load`, and again after CLI flag
    /// overrides are applied.
    pub fn validate(&self) -> Result<()> {
        if !(self.fuzzy_threshold > 0.0 && self.fuzzy_threshold <= 1.0) {
            anyhow::bail!(
                "Fuzzy threshold must be in (0.0, 1.0], got {}",
                self.fuzzy_threshold
            );
        }
        Ok(())
    }
}
