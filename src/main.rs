//! # Jam3a
//!
//! Jam3a is the merge pipeline for a Darija social-media corpus: it
//! consolidates the raw JSONL record files produced by the collection
//! scrapers into one deduplicated CSV of text confidently identified as
//! Moroccan Darija (Arabic script and romanized, with phoneme digits).
//!
//! This project can be used as a tool to merge collected data, or as a
//! lib to integrate the cleaning/classification/dedup stages into other
//! projects.
//!
//! ## Getting started
//!
//! ```sh
//! jam3a 0.3.0
//! Darija corpus merge tool.
//!
//! USAGE:
//!     jam3a <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     dedup      Deduplicate an already generated corpus
//!     explain    Explain classification decisions for a text file
//!     help       Prints this message or the help of the given subcommand(s)
//!     merge      Merge raw source files into the corpus
//! ```
use std::io::BufRead;
use std::sync::atomic::Ordering;

use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

use jam3a::classifier::HybridClassifier;
use jam3a::cleaning::Normalizer;
use jam3a::config::Config;
use jam3a::error::Error;
use jam3a::identifiers::FastText;
use jam3a::io::corpus;
use jam3a::pipelines::{Merge, Pipeline};

fn load_config(path: &Option<std::path::PathBuf>) -> Result<Config, Error> {
    let config = match path {
        Some(p) => Config::from_file(p)?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Jam3a::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Jam3a::Merge(m) => {
            let mut config = load_config(&m.config)?;
            if let Some(sources) = &m.sources {
                config.merge.sources = sources.split(',').map(|s| s.trim().to_string()).collect();
            }
            if m.synthetic {
                config.merge.synthetic = true;
            }
            if m.target_size.is_some() {
                config.merge.target_size = m.target_size;
            }
            config.validate()?;

            let predictor = FastText::new_lid(&m.lid_path)?;
            let pipeline = Merge::new(m.src, m.dst.clone(), Box::new(predictor), config);

            let cancel = pipeline.cancel_flag();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("interrupt received, stopping at next batch boundary");
                    cancel.store(true, Ordering::Relaxed);
                }
            });

            let summary = tokio::task::spawn_blocking(move || pipeline.run())
                .await
                .expect("merge task panicked")?;

            println!(
                "{}: {} corpus rows ({} accepted this run, {} duplicates, {} rejected, {} malformed) in {:.1}s",
                if summary.completed { "merge complete" } else { "merge cancelled" },
                summary.corpus_rows,
                summary.total_accepted,
                summary.total_duplicates,
                summary.total_rejected,
                summary.total_malformed,
                summary.elapsed_secs,
            );
            for (source, stats) in &summary.per_source {
                println!(
                    "  {:10} {:>9} raw -> {:>9} accepted ({} duplicates)",
                    source, stats.raw, stats.accepted, stats.duplicates
                );
            }
            println!("corpus written to {:?}", m.dst);
        }

        cli::Jam3a::Explain(e) => {
            let config = load_config(&e.config)?;
            let normalizer = Normalizer::new(config.cleaning.clone());
            let predictor = FastText::new_lid(&e.lid_path)?;
            let classifier = HybridClassifier::new(Box::new(predictor), config.detection.clone());

            let file = std::fs::File::open(&e.file)?;
            for line in std::io::BufReader::new(file).lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match normalizer.normalize(&line) {
                    None => println!(
                        "{}",
                        serde_json::json!({"text": line, "dropped": "normalization"})
                    ),
                    Some(cleaned) => {
                        let details = classifier.explain(&cleaned);
                        println!("{}", serde_json::to_string(&details)?);
                    }
                }
            }
        }

        cli::Jam3a::Dedup(d) => {
            let (kept, removed) = corpus::dedup_file(&d.src, &d.dst)?;
            info!("dedup done: kept {}, removed {}", kept, removed);
            println!("kept {} rows, removed {} duplicates -> {:?}", kept, removed, d.dst);
        }
    };
    Ok(())
}
