use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use gauze::config::Config;
use gauze::corpus::Corpus;
use gauze::pipeline::analysis::{AnalysisOptions, AnalysisReport};

/// Gauze: concept counting and misspelling sensitivity analysis for
/// synthetic clinical notes.
///
/// Generates a reproducible fake corpus, counts a fixed clinical vocabulary
/// in it, and measures which near-miss spellings an exact keyword search
/// would have overlooked.
#[derive(Parser)]
#[command(name = "gauze", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the synthetic corpus and show samples plus keywords
    Corpus {
        /// Number of documents to generate (overrides GAUZE_DOCS)
        #[arg(long)]
        docs: Option<usize>,

        /// Generator seed (overrides GAUZE_SEED)
        #[arg(long)]
        seed: Option<u64>,

        /// How many sample documents to print (default: 5)
        #[arg(long, default_value = "5")]
        samples: usize,
    },

    /// Count concept mentions and show document-presence proportions
    Counts {
        /// Number of documents to generate (overrides GAUZE_DOCS)
        #[arg(long)]
        docs: Option<usize>,

        /// Generator seed (overrides GAUZE_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Scan for near-miss spellings an exact search would overlook
    Fuzzy {
        /// Number of documents to generate (overrides GAUZE_DOCS)
        #[arg(long)]
        docs: Option<usize>,

        /// Generator seed (overrides GAUZE_SEED)
        #[arg(long)]
        seed: Option<u64>,

        /// Similarity acceptance threshold (overrides GAUZE_FUZZY_THRESHOLD)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Run the full analysis and write a markdown report
    Report {
        /// Number of documents to generate (overrides GAUZE_DOCS)
        #[arg(long)]
        docs: Option<usize>,

        /// Generator seed (overrides GAUZE_SEED)
        #[arg(long)]
        seed: Option<u64>,

        /// Similarity acceptance threshold (overrides GAUZE_FUZZY_THRESHOLD)
        #[arg(long)]
        threshold: Option<f64>,

        /// Where to write the markdown file (overrides GAUZE_REPORT_PATH)
        #[arg(long)]
        out: Option<String>,

        /// Print the full report as JSON to stdout instead of tables
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gauze=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Corpus {
            docs,
            seed,
            samples,
        } => {
            let config = load_config(docs, seed, None)?;
            println!(
                "Generating {} synthetic clinical notes (seed {})...",
                config.docs, config.seed
            );

            let corpus = generate_corpus(&config);

            gauze::output::terminal::display_corpus_summary(&corpus, config.seed, samples);

            let overview = gauze::corpus::keywords::KeywordExtractor::default().extract(&corpus);
            gauze::output::terminal::display_keywords(&overview);
        }

        Commands::Counts { docs, seed } => {
            let config = load_config(docs, seed, None)?;
            println!(
                "Counting concept mentions across {} documents (seed {})...",
                config.docs, config.seed
            );

            let corpus = generate_corpus(&config);
            let report = run_analysis(&corpus, &config)?;

            gauze::output::terminal::display_group_summaries(&report.groups);
        }

        Commands::Fuzzy {
            docs,
            seed,
            threshold,
        } => {
            let config = load_config(docs, seed, threshold)?;
            println!(
                "Scanning {} documents for near-miss spellings (threshold {:.2})...",
                config.docs, config.fuzzy_threshold
            );

            let corpus = generate_corpus(&config);
            let report = run_analysis(&corpus, &config)?;

            gauze::output::terminal::display_fuzzy_matches(
                &report.similarity,
                &report.fuzzy_matches,
                report.fuzzy_threshold,
            );
        }

        Commands::Report {
            docs,
            seed,
            threshold,
            out,
            json,
        } => {
            let config = load_config(docs, seed, threshold)?;
            let report_path = out.unwrap_or_else(|| config.report_path.clone());

            println!(
                "Running full analysis ({} documents, seed {}, threshold {:.2})...",
                config.docs, config.seed, config.fuzzy_threshold
            );

            let corpus = generate_corpus(&config);
            let report = run_analysis(&corpus, &config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            let overview = gauze::corpus::keywords::KeywordExtractor::default().extract(&corpus);

            gauze::output::terminal::display_group_summaries(&report.groups);
            gauze::output::terminal::display_fuzzy_matches(
                &report.similarity,
                &report.fuzzy_matches,
                report.fuzzy_threshold,
            );
            gauze::output::terminal::display_keywords(&overview);

            let samples = &corpus.documents[..corpus.len().min(3)];
            let written = gauze::output::markdown::generate_report(
                &report,
                Some(&overview),
                samples,
                config.seed,
                &report_path,
            )?;

            println!(
                "\n{}",
                format!("Markdown report saved to: {written}").bold()
            );
        }
    }

    Ok(())
}

/// Load the environment configuration, apply CLI flag overrides, and
/// re-validate the merged result.
fn load_config(docs: Option<usize>, seed: Option<u64>, threshold: Option<f64>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(docs) = docs {
        config.docs = docs;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(threshold) = threshold {
        config.fuzzy_threshold = threshold;
    }
    config.validate()?;
    Ok(config)
}

fn generate_corpus(config: &Config) -> Corpus {
    let mut generator = gauze::corpus::generator::CorpusGenerator::new(config.seed);
    generator.generate(config.docs)
}

/// Run the analysis pipeline over the corpus with the shipped vocabulary.
fn run_analysis(corpus: &Corpus, config: &Config) -> Result<AnalysisReport> {
    info!(
        documents = corpus.len(),
        threshold = config.fuzzy_threshold,
        "Starting analysis"
    );
    let options = AnalysisOptions {
        fuzzy_threshold: config.fuzzy_threshold,
    };
    gauze::pipeline::analysis::run(corpus, &gauze::concepts::default_vocabulary(), &options)
}
