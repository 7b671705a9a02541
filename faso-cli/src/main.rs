//! `faso` — command-line front end for the faso-guide tourism assistant.

mod settings;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use faso_assistant::{Assistant, AssistantError, ChatResult};
use faso_corpus::DocumentStore;
use faso_model::OpenAiCompletions;
use faso_rag::{MemoryVectorIndex, OpenAiEmbedder, VectorIndex};

use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "faso", version, about = "Assistant touristique RAG pour le Burkina Faso")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the vector index from the corpus file.
    Init {
        /// Seed the built-in sample documents first, overwriting the
        /// corpus file.
        #[arg(long)]
        seed: bool,
    },
    /// Ask a single question and print the answer with its sources.
    Ask {
        /// The question, in French or any language the embedding model
        /// covers.
        question: String,
        /// Override the number of documents retrieved.
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Interactive chat loop.
    Chat,
    /// Print corpus statistics as JSON.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env().context("invalid configuration")?;
    let assistant = build_assistant(&settings).await.context("initialization failed")?;

    match cli.command {
        Command::Init { seed } => {
            if seed {
                let store = assistant.store();
                store.clear().await;
                store.seed_samples().await;
                store.save(settings.corpus_path()).await?;
                store.save_sources(settings.sources_path()).await?;
            }
            let count = assistant.reinitialize().await?;
            println!("Corpus initialisé avec {count} documents");
        }
        Command::Ask { question, top_k } => {
            let result = assistant.chat(&question, top_k).await?;
            print_result(&result);
        }
        Command::Chat => {
            run_chat_loop(&assistant).await?;
        }
        Command::Stats => {
            let stats = assistant.statistics().await;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

/// Wire the assistant from the process settings.
///
/// Construction failures here are fatal: a process that cannot reach its
/// encoder configuration or its index snapshot must not take questions.
async fn build_assistant(settings: &Settings) -> anyhow::Result<Assistant> {
    let embedder = Arc::new(
        OpenAiEmbedder::new(&settings.embedding_url)?
            .with_model(&settings.embedding_model)
            .with_dimensions(settings.embedding_dimensions),
    );
    let index = Arc::new(
        MemoryVectorIndex::open(settings.embedding_dimensions, settings.index_path()).await?,
    );
    info!(
        model = %settings.embedding_model,
        dimensions = settings.embedding_dimensions,
        indexed = index.count().await?,
        "retrieval stack ready"
    );

    let fallback_lines = match tokio::fs::read_to_string(settings.sources_path()).await {
        Ok(text) => text.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect(),
        Err(e) => {
            warn!(error = %e, "cannot read sources list, keyword fallback will be empty");
            Vec::new()
        }
    };

    let mut builder = Assistant::builder()
        .embedder(embedder)
        .index(index)
        .store(Arc::new(DocumentStore::new()))
        .config(settings.retrieval.clone())
        .generation_params(settings.generation.clone())
        .generation_timeout(Duration::from_secs(settings.generation_timeout_secs))
        .corpus_path(settings.corpus_path())
        .fallback_lines(fallback_lines);

    if let Some(llm_url) = &settings.llm_url {
        let mut model = OpenAiCompletions::new(llm_url, &settings.llm_model)?;
        if let Some(key) = &settings.llm_api_key {
            model = model.with_api_key(key);
        }
        info!(model = %settings.llm_model, "generation backend configured");
        builder = builder.model(Arc::new(model));
    } else {
        info!("no generation backend configured, answers use the template tier");
    }

    Ok(builder.build()?)
}

async fn run_chat_loop(assistant: &Assistant) -> anyhow::Result<()> {
    println!("Assistant touristique Burkina Faso — tapez votre question ('quitter' pour sortir)");
    let mut editor = rustyline::DefaultEditor::new()?;

    loop {
        match editor.readline("faso> ") {
            Ok(line) => {
                let line = line.trim();
                if line.eq_ignore_ascii_case("quitter") || line.eq_ignore_ascii_case("exit") {
                    break;
                }
                editor.add_history_entry(line)?;
                match assistant.chat(line, None).await {
                    Ok(result) => print_result(&result),
                    Err(AssistantError::EmptyQuery) => {
                        println!("La requête ne peut pas être vide");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("Au revoir!");
    Ok(())
}

fn print_result(result: &ChatResult) {
    println!("{}", result.response);
    if !result.sources.is_empty() {
        println!("\nSources:");
        for (i, source) in result.sources.iter().enumerate() {
            if source.url.is_empty() {
                println!("  {}. [{:.2}] {}", i + 1, source.similarity, source.title);
            } else {
                println!(
                    "  {}. [{:.2}] {} — {}",
                    i + 1,
                    source.similarity,
                    source.title,
                    source.url
                );
            }
        }
    }
}
