// roomscape CLI - batch soundscape generation driver

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use roomscape::batch;
use roomscape::config::GenConfig;
use roomscape::rooms;
use roomscape::scene::OfflineEngine;
use roomscape::scheduler::RngSampler;

#[derive(Parser)]
#[command(name = "roomscape")]
#[command(about = "Batch generator for labeled ambisonic room soundscapes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of soundscape clips
    Generate {
        /// Path to a JSON config file (defaults apply if omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of clips (overrides config)
        #[arg(short = 'n', long)]
        clips: Option<u32>,

        /// RNG seed for reproducible batches
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// RIR dataset root (overrides config)
        #[arg(long)]
        rir_dir: Option<PathBuf>,
    },

    /// List FOA rooms available in the RIR dataset
    Rooms {
        /// Path to a JSON config file (defaults apply if omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RIR dataset root (overrides config)
        #[arg(long)]
        rir_dir: Option<PathBuf>,
    },

    /// Load and validate a config file without generating
    Check {
        /// Path to the JSON config file
        config: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<GenConfig> {
    match path {
        Some(path) => Ok(GenConfig::load(path)?),
        None => Ok(GenConfig::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            clips,
            seed,
            output,
            rir_dir,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(clips) = clips {
                config.num_clips = clips;
            }
            if let Some(output) = output {
                config.output_dir = output;
            }
            if let Some(rir_dir) = rir_dir {
                config.rir_dir = rir_dir;
            }

            let mut sampler = match seed {
                Some(seed) => RngSampler::seeded(seed),
                None => RngSampler::from_entropy(),
            };

            let engine = OfflineEngine::new();
            let summary = batch::run_batch(&config, &engine, &mut sampler)?;
            log::info!(
                "batch complete: {}/{} clips generated, {} failed",
                summary.generated,
                summary.requested,
                summary.failed
            );
        }

        Commands::Rooms { config, rir_dir } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(rir_dir) = rir_dir {
                config.rir_dir = rir_dir;
            }

            let available = rooms::discover_foa_rooms(&config.rir_dir)?;
            for room in &available {
                println!("{}", room);
            }
            log::info!("{} FOA rooms found", available.len());
        }

        Commands::Check { config } => {
            let config = GenConfig::load(&config)?;
            let catalog = config.validate()?;
            log::info!(
                "config is valid: {} event types, {} clips of {}s",
                catalog.len(),
                config.num_clips,
                config.duration_s
            );
        }
    }

    Ok(())
}
