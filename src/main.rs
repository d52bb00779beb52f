use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tidewave::config::{Config, Overrides};
use tidewave::{CpalBackend, DjBooth, PlaybackSession};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tidewave")]
#[command(about = "Live-code Strudel-style patterns on two decks", long_about = None)]
struct Cli {
    /// TOML file with [preview], [master] and [mixer] settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Volume for both decks (0-1)
    #[arg(long)]
    volume: Option<f32>,

    /// Tempo for both decks (60-200 BPM)
    #[arg(long)]
    bpm: Option<f32>,

    /// Crossfader position (0 preview, 100 master)
    #[arg(long)]
    crossfader: Option<f32>,

    /// Pattern file to play on the preview deck and reload on change
    #[arg(short, long)]
    watch: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?.apply(Overrides {
        volume: cli.volume,
        bpm: cli.bpm,
        crossfader: cli.crossfader,
    });
    tracing::info!(?config, "starting");

    let preview = PlaybackSession::with_settings(
        "preview",
        CpalBackend::new(),
        config.preview.volume,
        config.preview.bpm,
    );
    let master = PlaybackSession::with_settings(
        "master",
        CpalBackend::new(),
        config.master.volume,
        config.master.bpm,
    );
    let mut booth = DjBooth::new(preview, master);
    booth.set_crossfader(config.mixer.crossfader);

    tidewave::repl::start(booth, cli.watch)
}
