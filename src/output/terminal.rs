// Colored terminal output for the analysis tables.
//
// This module handles all terminal-specific formatting: headers, proportion
// bars, dimmed hints. The main.rs display calls delegate here.

use std::collections::HashSet;

use colored::Colorize;

use crate::corpus::keywords::CorpusKeywords;
use crate::corpus::Corpus;
use crate::counts::GroupSummary;
use crate::fuzzy::{FuzzyMatch, SimilarityTable};

/// Display the generated corpus: document count, seed, and a few samples.
pub fn display_corpus_summary(corpus: &Corpus, seed: u64, samples: usize) {
    println!(
        "\n{}",
        format!(
            "=== Synthetic Corpus ({} documents, seed {seed}) ===",
            corpus.len()
        )
        .bold()
    );

    if corpus.is_empty() {
        println!("\n  (no documents)");
        return;
    }
    println!();

    for doc in corpus.documents.iter().take(samples) {
        let preview = ellipsize(&doc.text, 110);
        println!("  {:>5}  {}", format!("#{}", doc.id).dimmed(), preview);
    }

    let remaining = corpus.len().saturating_sub(samples);
    if remaining > 0 {
        println!("  {}", format!("... and {remaining} more").dimmed());
    }
}

/// Display the ranked corpus keywords.
pub fn display_keywords(overview: &CorpusKeywords) {
    if overview.keywords.is_empty() {
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Corpus Keywords (TF-IDF over {} documents) ===",
            overview.document_count
        )
        .bold()
    );
    println!();

    for (i, (word, score)) in overview.keywords.iter().enumerate() {
        println!("  {:>2}. {:<28} {:>7.3}", i + 1, word, score);
    }
}

/// Display per-term document-presence proportions, grouped by concept.
///
/// The headline number per group is the fraction of documents mentioning
/// any of the group's terms; the indented rows break that down by term.
pub fn display_group_summaries(groups: &[GroupSummary]) {
    if groups.is_empty() {
        println!("No concept groups configured.");
        return;
    }

    let documents = groups[0].documents;
    println!(
        "\n{}",
        format!("=== Concept Presence ({documents} documents) ===").bold()
    );
    println!();
    println!(
        "  {}",
        "Fraction of documents mentioning each term at least once.".dimmed()
    );
    println!();

    for group in groups {
        println!(
            "  {:<42} {} {:>5.1}%  {}",
            group.name.bold(),
            proportion_bar(group.proportion),
            group.proportion * 100.0,
            format!("{}/{} docs", group.documents_matched, group.documents).dimmed()
        );

        for term in &group.terms {
            let label = if term.is_acronym {
                format!("{} [raw]", term.term)
            } else {
                term.term.clone()
            };
            println!(
                "      {:<38} {} {:>5.1}%  {}",
                label,
                proportion_bar(term.proportion),
                term.proportion * 100.0,
                format!("{} docs", term.documents_matched).dimmed()
            );
        }
        println!();
    }
}

/// Display accepted near-misses, then the closest rejected n-gram for every
/// term with no accepted match.
pub fn display_fuzzy_matches(table: &SimilarityTable, matches: &[FuzzyMatch], threshold: f64) {
    println!(
        "\n{}",
        format!(
            "=== Near-Miss Spellings (similarity >= {threshold:.2}, {} distinct n-grams scanned) ===",
            table.ngram_count()
        )
        .bold()
    );
    println!();

    if matches.is_empty() {
        println!("  No observed n-gram comes that close to any vocabulary term.");
        println!(
            "  {}",
            "Exact matching missed nothing at this threshold.".dimmed()
        );
    } else {
        println!(
            "  {:<28} {:<34} {:>6}",
            "Term".dimmed(),
            "Observed n-gram".dimmed(),
            "Score".dimmed()
        );
        println!("  {}", "-".repeat(70).dimmed());

        for m in matches {
            println!("  {:<28} {:<34} {:>6.3}", m.term, m.ngram, m.score);
        }

        let terms_hit: HashSet<&str> = matches.iter().map(|m| m.term.as_str()).collect();
        println!();
        println!(
            "  {} {} near-miss spellings across {} terms; an exact search would miss these.",
            "!".yellow(),
            matches.len(),
            terms_hit.len()
        );
    }

    // Context for everything that stayed quiet: how close did the scan get?
    let matched: HashSet<&str> = matches.iter().map(|m| m.term.as_str()).collect();
    let quiet: Vec<(&str, &str, f64)> = table
        .terms()
        .iter()
        .filter(|term| !matched.contains(term.as_str()))
        .filter_map(|term| {
            table
                .best_match(term)
                .map(|(ngram, score)| (term.as_str(), ngram, score))
        })
        .collect();

    if !quiet.is_empty() {
        println!();
        println!(
            "  {}",
            "Closest observed n-gram for terms with no accepted match:".dimmed()
        );
        for (term, ngram, score) in quiet {
            println!(
                "    {}",
                format!("{term}  ~  \"{ngram}\"  ({score:.3})").dimmed()
            );
        }
    }
}

/// Build the bar: filled portion + empty portion, colored by magnitude.
fn proportion_bar(proportion: f64) -> colored::ColoredString {
    let bar_width: usize = 20;
    let filled = (proportion * bar_width as f64).round() as usize;
    let empty = bar_width.saturating_sub(filled);
    let bar = format!("[{}{}]", "=".repeat(filled.min(bar_width)), " ".repeat(empty));

    if proportion >= 0.25 {
        bar.bright_green()
    } else if proportion >= 0.10 {
        bar.bright_yellow()
    } else {
        bar.bright_blue()
    }
}

/// Cut a preview line at `max_chars` characters, marking the cut with an
/// ellipsis. Counts characters rather than bytes, so multi-byte text never
/// lands a slice mid-character.
fn ellipsize(text: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for (seen, ch) in text.chars().enumerate() {
        if seen == max_chars {
            out.push_str("...");
            return out;
        }
        out.push(ch);
    }
    out
}
