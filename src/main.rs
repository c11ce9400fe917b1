use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use section_search::config::Config;
use section_search::extract::extract_sections_from_folder;
use section_search::llm::embedder_from_config;
use section_search::pipeline::{run_pipeline, save_output, PersonaConfig};

#[derive(Parser, Debug)]
#[command(
    name = "section-search",
    about = "Rank document sections for a persona's job and condense them"
)]
struct Cli {
    /// Directory holding persona.json and a docs/ folder.
    #[arg(long)]
    input: PathBuf,

    /// Where to write the ranked JSON output.
    #[arg(long, default_value = "output/result.json")]
    output: PathBuf,

    /// Embedding provider: ollama, openai or hashing.
    #[arg(long)]
    provider: Option<String>,

    /// Sections to return. Overrides persona.json and SECTION_SEARCH_TOP_K.
    #[arg(long)]
    top_k: Option<usize>,

    /// Sentences kept per refined section.
    #[arg(long)]
    max_sentences: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(provider) = cli.provider {
        config.embedding.provider = provider;
    }

    let persona = PersonaConfig::load(&cli.input.join("persona.json"))?;
    if let Some(top_k) = cli.top_k.or(persona.top_k) {
        config.retrieval.top_k = top_k;
    }
    if let Some(max) = cli.max_sentences {
        config.retrieval.max_sentences = max;
    }
    tracing::info!(
        "Embedding provider: {} ({})",
        config.embedding.provider,
        config.embedding.base_url
    );

    let docs = cli.input.join("docs");
    let sections = extract_sections_from_folder(&docs)
        .with_context(|| format!("Failed to extract sections from {}", docs.display()))?;
    tracing::info!("Total sections: {}", sections.len());

    let embedder = embedder_from_config(&config.embedding)?;
    let output = run_pipeline(
        sections,
        &persona.persona,
        &persona.job,
        &config.retrieval,
        embedder,
    )?;

    save_output(&output, &cli.output)?;
    tracing::info!(
        "Wrote {} ranked sections to {}",
        output.sections.len(),
        cli.output.display()
    );
    Ok(())
}
