//! EduForge CLI: generate personalized educational content in the terminal.
//!
//! Collects topics and an expertise level, runs the generation pipeline,
//! and renders the three result tracks (materials, quiz, projects).

mod render;

use anyhow::Context;
use clap::Parser;
use eduforge_core::grounding::DuckDuckGoGrounding;
use eduforge_core::types::ExpertiseLevel;
use eduforge_core::{Pipeline, create_provider, load_config};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// EduForge: personalized learning materials, quizzes, and project ideas
#[derive(Parser, Debug)]
#[command(name = "eduforge", version, about, long_about = None)]
struct Cli {
    /// Topics to learn about
    topics: Vec<String>,

    /// Read topics from a file, one per line (blank lines skipped)
    #[arg(short = 'f', long)]
    topics_file: Option<PathBuf>,

    /// Your expertise level: beginner, intermediate, or advanced
    #[arg(short, long, default_value = "beginner", value_parser = parse_level)]
    level: ExpertiseLevel,

    /// LLM model to use (overrides config)
    #[arg(short, long)]
    model: Option<String>,

    /// Disable the web grounding lookup
    #[arg(long)]
    no_grounding: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,
}

fn parse_level(s: &str) -> Result<ExpertiseLevel, String> {
    s.parse()
}

/// Collect topics from positional args and the optional topics file.
fn collect_topics(cli: &Cli) -> anyhow::Result<Vec<String>> {
    let mut topics = cli.topics.clone();
    if let Some(ref path) = cli.topics_file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read topics file {}", path.display()))?;
        topics.extend(
            contents
                .lines()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty()),
        );
    }
    Ok(topics)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up tracing: human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    let log_dir = directories::ProjectDirs::from("dev", "eduforge", "eduforge")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "eduforge.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let topics = collect_topics(&cli)?;
    if topics.iter().all(|t| t.trim().is_empty()) {
        anyhow::bail!("Please enter at least one topic (positional argument or --topics-file)");
    }

    let workspace = std::env::current_dir().ok();
    let mut config = load_config(workspace.as_deref())
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    if let Some(model) = cli.model {
        config.llm.model = model;
    }

    let provider = create_provider(&config.llm)
        .map_err(|e| anyhow::anyhow!("Failed to initialize backend: {}", e))?;

    let mut pipeline = Pipeline::new(provider)
        .with_role_timeout(Duration::from_secs(config.pipeline.role_timeout_secs));
    if config.grounding.enabled && !cli.no_grounding {
        match DuckDuckGoGrounding::new() {
            Ok(grounding) => {
                pipeline =
                    pipeline.with_grounding(Arc::new(grounding), config.grounding.max_results);
            }
            Err(e) => tracing::warn!(error = %e, "Grounding unavailable; continuing without it"),
        }
    }

    if !cli.quiet {
        eprintln!(
            "Generating {} content for: {} ...",
            cli.level,
            topics.join(", ")
        );
    }

    let result = pipeline
        .run(&topics, cli.level)
        .await
        .context("Content generation failed")?;

    print!("{}", render::render_result(&result));
    Ok(())
}
