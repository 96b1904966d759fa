//! veracity - fabricated-news detection CLI
//!
//! Usage:
//!   veracity generate-sample                 # Write the synthetic corpus to ./data
//!   veracity train                           # Fit and persist the artifact pair
//!   veracity predict "article text"          # Classify
//!   veracity audit "article text"            # Style audit (no model needed)
//!   veracity explain "article text"          # Token attribution
//!   veracity importance                      # Global feature importance
//!   veracity related "article text"          # Similar reference articles
//!
//! Text arguments may be omitted to read from stdin.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use veracity::config::VeracityConfig;
use veracity::corpus::{Corpus, Label};
use veracity::detector::Detector;
use veracity::error::{Result, VeracityError};
use veracity::explain::LocalAttribution;
use veracity::serialization::ArtifactStore;
use veracity::training::Trainer;

/// veracity - explainable fabricated-news detection
#[derive(Parser)]
#[command(name = "veracity")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Artifact directory (overrides config and VERACITY_ARTIFACTS)
    #[arg(long, global = true, value_name = "DIR")]
    artifacts: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the synthetic sample corpus (True.csv / Fake.csv)
    GenerateSample {
        /// Output directory
        #[arg(short, long, default_value = "data")]
        output: PathBuf,
    },

    /// Train on True.csv / Fake.csv and persist the artifact pair
    Train {
        /// Directory holding True.csv and Fake.csv
        #[arg(short, long, default_value = "data")]
        data: PathBuf,

        /// Train on the built-in sample corpus instead
        #[arg(long)]
        sample: bool,
    },

    /// Classify an article
    Predict {
        /// Article text (stdin if omitted)
        text: Option<String>,
    },

    /// Rule-based linguistic audit
    Audit {
        /// Article text (stdin if omitted)
        text: Option<String>,
    },

    /// Token-level attribution for one or more articles
    Explain {
        /// Article texts (stdin if omitted)
        texts: Vec<String>,

        /// Contributors to show per article
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Most authentic-leaning and most fabricated-leaning terms
    Importance,

    /// Reference articles similar to the input
    Related {
        /// Article text (stdin if omitted)
        text: Option<String>,

        /// Directory holding True.csv and Fake.csv
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => VeracityConfig::from_json_file(path)?,
        None => VeracityConfig::default().with_env_overrides(),
    };
    if let Some(dir) = cli.artifacts {
        config = config.with_artifacts_dir(dir);
    }
    debug!(artifacts = %config.artifacts_dir.display(), "Configuration loaded");

    let json = cli.json;
    match cli.command {
        Commands::GenerateSample { output } => cmd_generate_sample(&output, json),
        Commands::Train { data, sample } => cmd_train(&config, &data, sample, json),
        Commands::Predict { text } => cmd_predict(config, &input_text(text)?, json),
        Commands::Audit { text } => cmd_audit(config, &input_text(text)?, json),
        Commands::Explain { texts, top } => {
            let texts = if texts.is_empty() {
                vec![read_stdin()?]
            } else {
                texts
            };
            cmd_explain(config, &texts, top, json)
        }
        Commands::Importance => cmd_importance(config, json),
        Commands::Related { text, data } => cmd_related(config, &input_text(text)?, &data, json),
    }
}

fn input_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => read_stdin(),
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_generate_sample(output: &Path, json: bool) -> Result<()> {
    let (authentic, fabricated) = Corpus::write_sample(output)?;
    if json {
        print_json(&serde_json::json!({
            "authentic": authentic,
            "fabricated": fabricated,
        }))
    } else {
        println!("Sample data written:");
        println!("  {}", authentic.display());
        println!("  {}", fabricated.display());
        Ok(())
    }
}

fn cmd_train(config: &VeracityConfig, data: &Path, sample: bool, json: bool) -> Result<()> {
    let corpus = if sample {
        Corpus::sample()
    } else {
        Corpus::load(data)?
    };
    let store = ArtifactStore::new(&config.artifacts_dir);
    let outcome = Trainer::from_config(config).train_and_save(&corpus, &store)?;

    if json {
        return print_json(&serde_json::json!({
            "pair_id": outcome.pipeline.pair_id(),
            "artifacts": store.dir(),
            "metrics": outcome.metrics,
        }));
    }

    println!("Training complete");
    println!("=================");
    println!("Documents:  {}", corpus.len());
    println!("Artifacts:  {}", store.dir().display());
    println!("Pair id:    {}", outcome.pipeline.pair_id());
    println!();
    print!("{}", outcome.metrics);
    Ok(())
}

#[derive(Serialize)]
struct Verdict {
    label: Label,
    status: &'static str,
    p_fabricated: f64,
    p_authentic: f64,
}

fn cmd_predict(config: VeracityConfig, text: &str, json: bool) -> Result<()> {
    let detector = Detector::load_with_config(config)?;
    let (p_fabricated, p_authentic) = detector.predict(text)?;
    let label = if p_authentic >= 0.5 {
        Label::Authentic
    } else {
        Label::Fabricated
    };
    let verdict = Verdict {
        label,
        status: label.status(),
        p_fabricated,
        p_authentic,
    };

    if json {
        return print_json(&verdict);
    }
    println!("Verdict:       {} ({})", verdict.label, verdict.status);
    println!("P(fabricated): {:.1}%", p_fabricated * 100.0);
    println!("P(authentic):  {:.1}%", p_authentic * 100.0);
    Ok(())
}

fn cmd_audit(config: VeracityConfig, text: &str, json: bool) -> Result<()> {
    let detector = Detector::with_config(None, config);
    let report = detector.get_linguistic_audit(text)?;
    if json {
        print_json(&report)
    } else {
        print!("{report}");
        Ok(())
    }
}

fn cmd_explain(config: VeracityConfig, texts: &[String], top: usize, json: bool) -> Result<()> {
    let detector = Detector::load_with_config(config)?;
    if !detector.is_online() {
        return Err(VeracityError::ModelUnavailable {
            reason: "train a model before requesting attributions".to_string(),
        });
    }
    let results = detector.get_local_explanation(texts);

    if json {
        return print_json(&results);
    }
    for (i, result) in results.iter().enumerate() {
        if results.len() > 1 {
            println!("[{}]", i + 1);
        }
        match result {
            LocalAttribution::Attributed(a) => {
                println!(
                    "logit {:+.4} = bias {:+.4} + tokens {:+.4}  (p_authentic {:.1}%)",
                    a.logit,
                    a.base_value,
                    a.total(),
                    a.p_authentic * 100.0
                );
                for (token, value) in a.by_token().iter().take(top) {
                    let leaning = if *value >= 0.0 { "authentic" } else { "fabricated" };
                    println!("  {token:<20} {value:+.4}  {leaning}");
                }
            }
            LocalAttribution::Unavailable { reason } => {
                println!("Explanation unavailable: {reason}");
            }
        }
    }
    Ok(())
}

fn cmd_importance(config: VeracityConfig, json: bool) -> Result<()> {
    let detector = Detector::load_with_config(config)?;
    let (markers, triggers) = detector.get_global_importance()?;

    if json {
        return print_json(&serde_json::json!({
            "authentic_markers": markers,
            "anomaly_triggers": triggers,
        }));
    }
    println!("Authentic markers:");
    for (token, weight) in &markers {
        println!("  {token:<20} {weight:+.4}");
    }
    println!();
    println!("Anomaly triggers:");
    for (token, weight) in &triggers {
        println!("  {token:<20} {weight:+.4}");
    }
    Ok(())
}

fn cmd_related(config: VeracityConfig, text: &str, data: &Path, json: bool) -> Result<()> {
    let detector = Detector::load_with_config(config)?;
    let corpus = Corpus::load(data)?;
    let related = detector.get_related_intel(text, &corpus)?;

    if json {
        return print_json(&related);
    }
    if related.is_empty() {
        println!("No similar reference articles found.");
        return Ok(());
    }
    for doc in &related {
        println!("{} [{} {}] {}", doc.similarity_pct, doc.label, doc.status, doc.title);
        println!("    {}", doc.excerpt);
    }
    Ok(())
}
