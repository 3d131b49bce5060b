use anyhow::{bail, Context, Result};
use carousel_common::{GenerationRequest, Payload};
use carousel_core::parser::enforce_slide_rules;
use carousel_core::{Backend, CarouselPipeline, Config, ContentMapper, ResponseParser};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "carousel")]
#[command(about = "Generate, parse and map AI-written slide carousels")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Load configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Generation backend: llama | openai
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Override the backend endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Override model (e.g., gpt-4o, gpt-4o-mini)
    #[arg(long, global = true)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse raw model output into a carousel payload
    Parse {
        /// File with the raw response; stdin when omitted
        file: Option<PathBuf>,
        /// Print the mapped editor project instead of the payload
        #[arg(long)]
        project: bool,
        /// Report which parsing tier produced the result on stderr
        #[arg(long)]
        report: bool,
    },
    /// Map a payload JSON file to an editor project, enforcing slide order rules
    Map {
        /// Path to payload JSON
        payload: PathBuf,
    },
    /// Generate a carousel for a topic
    Generate {
        /// Carousel topic
        topic: String,
        /// Number of slides to generate
        #[arg(short, long)]
        count: Option<usize>,
        /// Writing tone
        #[arg(short, long)]
        tone: Option<String>,
        /// Optional style hint
        #[arg(short, long)]
        style: Option<String>,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit the parsed payload instead of the editor project
        #[arg(long)]
        payload: bool,
    },
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match &cli.command {
        Commands::Parse { file, project, report } => {
            let raw = read_input(file.as_deref())?;
            let parsed = ResponseParser::parse_with_report(&raw);
            if *report {
                eprintln!("tier: {}", parsed.tier.as_str());
            }
            if *project {
                print_json(&ContentMapper::create_project_from_ai(&parsed.payload))?;
            } else {
                print_json(&parsed.payload)?;
            }
        }
        Commands::Map { payload: payload_path } => {
            let text = std::fs::read_to_string(payload_path)
                .with_context(|| format!("reading {}", payload_path.display()))?;
            let mut payload: Payload =
                serde_json::from_str(&text).context("payload is not valid carousel JSON")?;
            if payload.slides.is_empty() {
                bail!("payload {} has no slides", payload_path.display());
            }
            enforce_slide_rules(&mut payload);
            print_json(&ContentMapper::create_project_from_ai(&payload))?;
        }
        Commands::Generate { topic, count, tone, style, output, payload } => {
            let config = load_config(&cli)?;
            let request = GenerationRequest {
                topic: topic.clone(),
                count: count.unwrap_or(config.default_slide_count),
                tone: tone.clone().unwrap_or_else(|| config.default_tone.clone()),
                style: style.clone(),
            };
            let pipeline = CarouselPipeline::from_config(&config)?;
            let generated = pipeline.generate(&request).await?;
            tracing::info!(tier = generated.tier.as_str(), slides = generated.payload.slides.len(), "carousel ready");

            let json = if *payload {
                serde_json::to_string_pretty(&generated.payload)?
            } else {
                serde_json::to_string_pretty(&generated.project)?
            };
            match output {
                Some(path) => {
                    tokio::fs::write(path, format!("{json}\n")).await?;
                    eprintln!("Carousel saved to: {}", path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            config.apply_env(|key| std::env::var(key).ok());
            config
        }
        None => Config::from_env(),
    };
    if let Some(backend) = &cli.backend {
        config.backend = backend.parse::<Backend>()?;
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    Ok(config)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
