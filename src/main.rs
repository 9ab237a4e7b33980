//! rov-mission CLI: replay recorded marker detections through the mission core.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rov_qr_mission::{Config, MissionPipeline, RecordingSink, ReplayScript, TickReport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rov-mission")]
#[command(about = "Track QR markers and run the two-phase ROV mission decision")]
#[command(version)]
struct Cli {
    /// Write log lines to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON detection script tick by tick.
    Replay(ReplayArgs),

    /// Print the effective configuration as TOML.
    ShowConfig(ConfigArgs),
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the centroid match distance (pixels).
    #[arg(long)]
    max_distance: Option<f32>,

    /// Override the number of unmatched ticks before an object is dropped.
    #[arg(long)]
    max_frames_unseen: Option<u32>,

    /// Override the number of phase-1 votes.
    #[arg(long)]
    vote_target: Option<usize>,
}

#[derive(Debug, Clone, Args)]
struct ReplayArgs {
    /// Path to the detection script (JSON array of ticks).
    #[arg(long)]
    script: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,

    /// Frame width reported to the detector.
    #[arg(long, default_value = "640")]
    width: u32,

    /// Frame height reported to the detector.
    #[arg(long, default_value = "480")]
    height: u32,

    /// Print every mission event as a JSON line on stdout.
    #[arg(long)]
    events_json: bool,
}

fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(max_distance) = args.max_distance {
        config.tracker.max_distance = max_distance;
    }
    if let Some(max_frames_unseen) = args.max_frames_unseen {
        config.tracker.max_frames_unseen = max_frames_unseen;
    }
    if let Some(vote_target) = args.vote_target {
        config.mission.vote_target = vote_target;
    }
    config.validate()?;
    Ok(config)
}

fn print_events(report: &TickReport) {
    for event in &report.events {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "failed to encode event"),
        }
    }
}

fn run_replay(args: &ReplayArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let script = ReplayScript::load(&args.script)
        .with_context(|| format!("failed to load script {}", args.script.display()))?;
    tracing::info!(ticks = script.len(), "loaded replay script");

    let (frames, detector) = script.into_parts(args.width, args.height);
    let mut pipeline = MissionPipeline::new(frames, detector, RecordingSink::default(), config);
    let stop = AtomicBool::new(false);

    let summary = pipeline.run(&stop, |report| {
        tracing::debug!(
            tick = report.tick,
            objects = report.objects.len(),
            progress = %report.progress,
            "tick complete"
        );
        if args.events_json {
            print_events(report);
        }
    })?;

    tracing::info!(
        completed = summary.completed,
        skipped = summary.skipped,
        state = %summary.state,
        commands = pipeline.commands().commands.len(),
        "replay finished"
    );
    Ok(())
}

fn run_show_config(args: &ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    match &cli.command {
        Commands::Replay(args) => run_replay(args),
        Commands::ShowConfig(args) => run_show_config(args),
    }
}
