//! `quarry`: answer questions over the Northwind store and its policy documents.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use quarry_agent::{run_batch_files, HybridAgent};
use quarry_core::config::{CliOverrides, QuarryConfig};
use quarry_core::events::TracingSink;
use quarry_core::traits::QueryExecutor;
use quarry_core::types::OutputRecord;
use quarry_retrieval::{DocumentIndex, TfIdfRetriever};
use quarry_router::{demo_dataset, evaluate_router, load_examples, Router};
use quarry_sql::{locate_database, SqliteExecutor};

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Hybrid document + SQL question answering over Northwind")]
#[command(version)]
struct Cli {
    /// Working root for relative paths and quarry.toml
    #[arg(long, global = true, env = "QUARRY_ROOT", default_value = ".")]
    root: PathBuf,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    /// Document directory
    #[arg(long, global = true)]
    docs: Option<PathBuf>,

    /// SQLite database path (skips candidate discovery)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Synthesize/execute attempts per question
    #[arg(long, global = true)]
    max_attempts: Option<u32>,

    /// JSONL file of labeled router examples
    #[arg(long, global = true)]
    train: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer every job in a JSONL batch file
    Run {
        /// Input jobs, one `{id, question, format_hint}` per line
        #[arg(long)]
        batch: PathBuf,

        /// Output records, one per job
        #[arg(long)]
        out: PathBuf,
    },

    /// Answer a single question and print the record
    Ask {
        question: String,

        /// Expected answer shape (int, float, list[...], {category...}, {customer...})
        #[arg(long, default_value = "int")]
        format: String,
    },

    /// List tables and views in the structured store
    Tables,

    /// Router accuracy before and after training on the demo dataset
    Optimize,

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        quarry_core::tracing::init_tracing_json();
    } else {
        quarry_core::tracing::init_tracing();
    }

    let overrides = CliOverrides {
        db_path: cli.db.clone(),
        docs_dir: cli.docs.clone(),
        top_k: None,
        max_attempts: cli.max_attempts,
        training_file: cli.train.clone(),
    };
    let config = QuarryConfig::load(&cli.root, Some(&overrides)).context("loading configuration")?;

    match cli.command {
        Commands::Run { batch, out } => {
            let mut agent = build_agent(&config, &cli.root)?;
            let report = run_batch_files(&mut agent, &batch, &out)
                .with_context(|| format!("running batch {}", batch.display()))?;
            info!(
                event = "run_complete",
                processed = report.processed,
                faults = report.faults,
                out = %out.display(),
                "wrote {} record(s)",
                report.processed
            );
        }
        Commands::Ask { question, format } => {
            let mut agent = build_agent(&config, &cli.root)?;
            let envelope = agent.answer(&question, &format);
            let record = OutputRecord::from_envelope("ask", envelope);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Tables => {
            let executor = open_store(&config, &cli.root)?;
            for table in executor.tables() {
                println!("{table}");
            }
        }
        Commands::Optimize => {
            let (train, eval) = demo_dataset();
            let report = evaluate_router(&train, &eval);
            println!("{}", serde_json::to_string(&report)?);
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn open_store(config: &QuarryConfig, root: &Path) -> Result<SqliteExecutor> {
    let db_path = locate_database(&config.storage, root)?;
    let executor = SqliteExecutor::open(&db_path)?;
    Ok(executor)
}

fn build_agent(config: &QuarryConfig, root: &Path) -> Result<HybridAgent> {
    let executor = open_store(config, root)?;

    let docs_dir = config.retrieval.effective_docs_dir(root);
    let index = DocumentIndex::from_dir(&docs_dir)
        .with_context(|| format!("indexing documents in {}", docs_dir.display()))?;
    info!(event = "documents_indexed", chunks = index.len(), dir = %docs_dir.display());

    let mut router = Router::new();
    if let Some(ref file) = config.router.training_file {
        let path = root.join(file);
        let examples = load_examples(&path)?;
        router.train(&examples);
    }

    Ok(HybridAgent::new(
        router,
        Box::new(TfIdfRetriever::new(index)),
        Box::new(executor),
    )
    .with_config(config)
    .with_sink(Arc::new(TracingSink)))
}
