use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::info;
use translatehub::config::Config;
use translatehub::i18n::Dataset;
use translatehub::Resolver;

const USAGE: &str = "usage: translatehub <language|translator> <text>...";

#[derive(Debug, Clone, Copy)]
enum Command {
    Language,
    Translator,
}

fn main() -> Result<ExitCode> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr, so stdout only carries results)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("translatehub=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("language") => Command::Language,
        Some("translator") => Command::Translator,
        _ => {
            eprintln!("{}", USAGE);
            return Ok(ExitCode::from(2));
        }
    };
    let inputs: Vec<String> = args.collect();
    if inputs.is_empty() {
        eprintln!("{}", USAGE);
        return Ok(ExitCode::from(2));
    }

    // Load configuration from environment
    let config = Config::from_env()?;
    let dataset = load_dataset(&config)?;
    let resolver = Resolver::from_dataset(&dataset, &config).context("Failed to index dataset")?;

    let mut failed = false;
    for input in &inputs {
        let outcome = match command {
            Command::Language => resolver.resolve_language(Some(input), None).map(|resolution| {
                format!(
                    "{}\t{}\t{}\t{:.2}%",
                    input,
                    resolution.id(),
                    resolution.identity.name,
                    resolution.confidence * 100.0
                )
            }),
            Command::Translator => resolver
                .resolve_translator(Some(input), None)
                .map(|matched| format!("{}\t{}\t{:.2}%", input, matched.id(), matched.confidence * 100.0)),
        };

        match outcome {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("{}", e);
                failed = true;
            }
        }
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// The dataset named by `LANGUAGE_DATASET`, or the built-in one.
fn load_dataset(config: &Config) -> Result<Dataset> {
    match &config.dataset_path {
        Some(path) => {
            info!("Loading language dataset from {}", path);
            let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read dataset {}", path))?;
            Dataset::from_json(&json).with_context(|| format!("Failed to parse dataset {}", path))
        }
        None => Dataset::builtin().context("Failed to parse built-in dataset"),
    }
}
