use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediashelf_core::{
    load_config, validate_config, ClipExtractor, ClipRequest, FfmpegClipper, MediaBrowser,
    PathResolver, SubtitleReader,
};

/// Browse a local media library, read subtitle cues and cut audio clips.
#[derive(Debug, Parser)]
#[command(name = "mediashelf", version, about)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, env = "MEDIASHELF_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List a library directory as grouped items (JSON)
    List {
        /// Directory relative to the library root
        #[arg(default_value = "")]
        path: String,
    },
    /// Print the cues of a subtitle file (JSON)
    Subtitles {
        /// Subtitle file relative to the library root
        path: String,
    },
    /// Cut an MP3 clip out of an audio or video file
    Clip {
        /// Source file relative to the library root
        path: String,
        /// Clip start in milliseconds
        #[arg(long)]
        start: i64,
        /// Clip end in milliseconds
        #[arg(long)]
        end: i64,
        /// Stream index for multi-track containers
        #[arg(long)]
        track: Option<u32>,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check that ffmpeg is usable and the scratch directory exists
    Check,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr, stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    validate_config(&config).context("Configuration validation failed")?;
    info!("Library root: {:?}", config.library.root);

    let resolver = PathResolver::from(&config.library);

    match cli.command {
        Command::List { path } => {
            let browser = MediaBrowser::new(resolver);
            let items = browser
                .list(&path)
                .await
                .with_context(|| format!("Failed to list {:?}", path))?;
            print_json(&items)?;
        }
        Command::Subtitles { path } => {
            let reader = SubtitleReader::new(resolver);
            let cues = reader
                .cues(&path)
                .await
                .with_context(|| format!("Failed to read subtitles from {:?}", path))?;
            print_json(&cues)?;
        }
        Command::Clip {
            path,
            start,
            end,
            track,
            output,
        } => {
            let clipper = FfmpegClipper::new(resolver, config.clip.clone());
            let mut request = ClipRequest::new(path, start, end);
            request.track_id = track;

            let bytes = clipper
                .extract_clip(&request)
                .await
                .with_context(|| format!("Failed to clip {:?}", request.source_path))?;

            match output {
                Some(output) => {
                    tokio::fs::write(&output, &bytes)
                        .await
                        .with_context(|| format!("Failed to write clip to {:?}", output))?;
                    info!("Wrote {} bytes to {:?}", bytes.len(), output);
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&bytes)?;
                    stdout.flush()?;
                }
            }
        }
        Command::Check => {
            let clipper = FfmpegClipper::new(resolver, config.clip.clone());
            clipper
                .validate()
                .await
                .context("Clipper validation failed")?;
            info!(
                "{} clipper ready, scratch directory {:?}",
                clipper.name(),
                config.clip.temp_dir
            );
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
