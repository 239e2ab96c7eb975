// Concept vocabulary: the fixed, hand-authored clinical concept groups.
//
// A group names one clinical concept; its terms are the surface forms a
// note might use for it. Acronym terms are flagged so they bypass the
// stemmer and are looked up in the raw corpus view ("ards" stems to "ard",
// which would never match anything).

use std::collections::HashMap;

use anyhow::Result;
use serde::Serialize;

use crate::normalize::ngram::DEFAULT_MAX_ORDER;
use crate::normalize::{CorpusView, Normalizer};

/// One surface form of a concept.
#[derive(Debug, Clone, Serialize)]
pub struct ConceptTerm {
    pub term: String,
    /// Acronyms are normalized but never stemmed, and match against the
    /// raw corpus view.
    pub is_acronym: bool,
}

/// A named concept and its surface forms.
#[derive(Debug, Clone, Serialize)]
pub struct ConceptGroup {
    pub name: String,
    pub terms: Vec<ConceptTerm>,
}

impl ConceptGroup {
    pub fn new(name: impl Into<String>, terms: &[(&str, bool)]) -> Self {
        Self {
            name: name.into(),
            terms: terms
                .iter()
                .map(|(term, is_acronym)| ConceptTerm {
                    term: (*term).to_string(),
                    is_acronym: *is_acronym,
                })
                .collect(),
        }
    }
}

/// The standard vocabulary the analysis ships with.
///
/// Inflected variants are deliberately absent: the stemmed view already
/// conflates them ("mechanically ventilated" lands on the same stems as
/// "mechanical ventilation"), and listing both would create two terms with
/// an identical lookup key.
pub fn default_vocabulary() -> Vec<ConceptGroup> {
    vec![
        ConceptGroup::new(
            "ARDS",
            &[
                ("acute respiratory distress syndrome", false),
                ("ards", true),
            ],
        ),
        ConceptGroup::new("Mechanical ventilation", &[("mechanical ventilation", false)]),
        ConceptGroup::new("Sepsis", &[("sepsis", false), ("septic shock", false)]),
        ConceptGroup::new("Pneumonia", &[("pneumonia", false)]),
        ConceptGroup::new(
            "COPD",
            &[
                ("chronic obstructive pulmonary disease", false),
                ("copd", true),
            ],
        ),
        ConceptGroup::new(
            "Heart failure",
            &[
                ("congestive heart failure", false),
                ("heart failure", false),
                ("chf", true),
            ],
        ),
        ConceptGroup::new(
            "Atrial fibrillation",
            &[("atrial fibrillation", false), ("afib", true)],
        ),
        ConceptGroup::new(
            "Shortness of breath",
            &[("shortness of breath", false), ("dyspnea", false)],
        ),
    ]
}

/// Validate a vocabulary before any counting happens. Malformed input is a
/// configuration bug and fails the run immediately rather than producing a
/// silently wrong table.
pub fn validate_vocabulary(groups: &[ConceptGroup], normalizer: &Normalizer) -> Result<()> {
    if groups.is_empty() {
        anyhow::bail!("Concept vocabulary is empty; nothing to count");
    }

    // Surface forms must be unique everywhere (case-insensitive), and so
    // must resolved lookup keys within a view: two terms sharing a key
    // would produce indistinguishable counts.
    let mut surfaces: HashMap<String, String> = HashMap::new();
    let mut keys: HashMap<(CorpusView, String), (String, String)> = HashMap::new();

    for group in groups {
        if group.terms.is_empty() {
            anyhow::bail!(
                "Concept group '{}' has no terms; every group must name at least one surface form",
                group.name
            );
        }

        for term in &group.terms {
            let surface = term.term.to_lowercase();
            if let Some(prev_group) = surfaces.insert(surface.clone(), group.name.clone()) {
                if prev_group == group.name {
                    anyhow::bail!(
                        "Term '{}' appears twice in group '{}'",
                        term.term,
                        group.name
                    );
                }
                anyhow::bail!(
                    "Term '{}' appears in both '{}' and '{}'; a term may belong to one group only",
                    term.term,
                    prev_group,
                    group.name
                );
            }

            let key = normalizer.term_key(&term.term, term.is_acronym);
            if key.is_empty() {
                anyhow::bail!(
                    "Term '{}' in group '{}' normalizes to an empty string and can never match",
                    term.term,
                    group.name
                );
            }

            let order = key.split_whitespace().count();
            if order > DEFAULT_MAX_ORDER {
                anyhow::bail!(
                    "Term '{}' in group '{}' is {} tokens after normalization; the n-gram window stops at {}",
                    term.term,
                    group.name,
                    order,
                    DEFAULT_MAX_ORDER
                );
            }

            let view = if term.is_acronym {
                CorpusView::Raw
            } else {
                CorpusView::Stemmed
            };
            if let Some((prev_term, prev_group)) =
                keys.insert((view, key.clone()), (term.term.clone(), group.name.clone()))
            {
                anyhow::bail!(
                    "Terms '{}' (group '{}') and '{}' (group '{}') resolve to the same lookup key '{}'; their counts would be indistinguishable",
                    prev_term,
                    prev_group,
                    term.term,
                    group.name,
                    key
                );
            }
        }
    }

    Ok(())
}
