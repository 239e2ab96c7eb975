// Markdown report generation.
//
// Writes the full analysis to a file so a run can be shared or diffed
// later. The header records the run parameters (seed, document count,
// threshold): together with the seeded generator they make every number
// in the report reproducible.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::corpus::keywords::CorpusKeywords;
use crate::corpus::Document;
use crate::pipeline::analysis::AnalysisReport;

/// Generate a markdown report and write it to `path`, creating parent
/// directories as needed. Returns the path written.
pub fn generate_report(
    report: &AnalysisReport,
    keywords: Option<&CorpusKeywords>,
    samples: &[Document],
    seed: u64,
    path: &str,
) -> Result<String> {
    let mut md = String::new();

    md.push_str("# Gauze Concept Report\n\n");
    md.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str("## Run Parameters\n\n");
    md.push_str("| Parameter | Value |\n");
    md.push_str("|---|---|\n");
    md.push_str(&format!("| Documents | {} |\n", report.documents));
    md.push_str(&format!("| Seed | {seed} |\n"));
    md.push_str(&format!(
        "| Fuzzy threshold | {:.2} |\n\n",
        report.fuzzy_threshold
    ));

    // Group-level summary first, term-level breakdown after.
    md.push_str("## Concept Presence\n\n");
    md.push_str("| Concept group | Documents matched | Proportion |\n");
    md.push_str("|---|---:|---:|\n");
    for group in &report.groups {
        md.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            escape_pipes(&group.name),
            group.documents_matched,
            group.proportion * 100.0
        ));
    }
    md.push_str(&format!(
        "| **Total documents** | **{}** | |\n\n",
        report.documents
    ));

    for group in &report.groups {
        md.push_str(&format!(
            "### {} ({:.1}% of documents)\n\n",
            escape_pipes(&group.name),
            group.proportion * 100.0
        ));
        md.push_str("| Term | Lookup | Documents | Proportion |\n");
        md.push_str("|---|---|---:|---:|\n");
        for term in &group.terms {
            let lookup = if term.is_acronym { "raw" } else { "stemmed" };
            md.push_str(&format!(
                "| {} | {} | {} | {:.1}% |\n",
                escape_pipes(&term.term),
                lookup,
                term.documents_matched,
                term.proportion * 100.0
            ));
        }
        md.push('\n');
    }

    md.push_str(&format!(
        "## Near-Miss Spellings (similarity >= {:.2})\n\n",
        report.fuzzy_threshold
    ));
    if report.fuzzy_matches.is_empty() {
        md.push_str("No observed n-gram scored at or above the threshold against any term.\n\n");
    } else {
        md.push_str("| Term | Observed n-gram | Similarity |\n");
        md.push_str("|---|---|---:|\n");
        for m in &report.fuzzy_matches {
            md.push_str(&format!(
                "| {} | {} | {:.3} |\n",
                escape_pipes(&m.term),
                escape_pipes(&m.ngram),
                m.score
            ));
        }
        md.push('\n');
        md.push_str(&format!(
            "{} spellings in the corpus are close enough to a vocabulary term that an \
             exact keyword search silently misses them.\n\n",
            report.fuzzy_matches.len()
        ));
    }

    if let Some(overview) = keywords {
        if !overview.keywords.is_empty() {
            md.push_str("## Corpus Keywords (TF-IDF)\n\n");
            md.push_str("| Rank | Keyword | Score |\n");
            md.push_str("|---:|---|---:|\n");
            for (i, (word, score)) in overview.keywords.iter().enumerate() {
                md.push_str(&format!(
                    "| {} | {} | {:.3} |\n",
                    i + 1,
                    escape_pipes(word),
                    score
                ));
            }
            md.push('\n');
        }
    }

    if !samples.is_empty() {
        md.push_str("## Sample Documents\n\n");
        for doc in samples {
            md.push_str(&format!("- **#{}**: {}\n", doc.id, escape_pipes(&doc.text)));
        }
        md.push('\n');
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create report directory {}", parent.display())
            })?;
        }
    }
    fs::write(path, md).with_context(|| format!("Failed to write report to {path}"))?;

    Ok(path.to_string())
}

/// Escape pipe characters so raw note text cannot break a table row.
fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}
