mod clients;
mod config;
mod error;
mod progress;
mod report;
mod runner;
mod scan;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::info;

use clients::{DeepgramClient, Transcriber};
use config::Settings;
use error::Error;
use progress::ProgressMode;

/// Batch-transcribe a folder of audio files via the Deepgram pre-recorded API.
#[derive(Parser)]
#[command(name = "batchscribe", version)]
struct Cli {
    /// Folder of audio files.
    input_dir: PathBuf,

    /// Where .txt transcripts go.
    #[arg(long)]
    output_dir: PathBuf,

    /// Files per run.
    #[arg(long, default_value_t = 50)]
    batch: usize,

    /// Parallel uploads.
    #[arg(long, default_value_t = 4)]
    concurrency: usize,

    /// HTTP timeout per file, in seconds.
    #[arg(long, default_value_t = 300.0)]
    timeout: f64,

    /// Progress rendering.
    #[arg(long, value_enum, default_value = "bar")]
    progress: ProgressMode,
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    if !cli.input_dir.is_dir() {
        return Err(Error::Io(std::io::Error::other(format!(
            "{} is not a directory",
            cli.input_dir.display()
        ))));
    }
    if !cli.timeout.is_finite() || cli.timeout <= 0.0 {
        return Err(Error::Io(std::io::Error::other(
            "--timeout must be a positive number of seconds",
        )));
    }

    let settings = Settings::from_env()?;
    std::fs::create_dir_all(&cli.output_dir)?;

    let queue = scan::collect_pending(&cli.input_dir, &cli.output_dir, cli.batch)?;
    if queue.is_empty() {
        println!("Nothing to do - already transcribed or nothing found.");
        return Ok(());
    }
    info!(
        "Queued {} files ({} parallel uploads)",
        queue.len(),
        cli.concurrency
    );

    let rate_per_min = settings.rate_per_min;
    let client = Box::new(DeepgramClient::new(settings.api_key));
    let transcriber = Transcriber::new(client, Duration::from_secs_f64(cli.timeout))?;
    let sink = progress::make_sink(cli.progress, queue.len() as u64);

    let summary = runner::run_batch(
        Arc::new(transcriber),
        queue,
        cli.concurrency,
        rate_per_min,
        sink,
    )
    .await;

    println!(
        "\n{}",
        report::summary_line(
            summary.files,
            summary.total_audio_secs,
            summary.total_elapsed,
            summary.total_cost_usd,
        )
    );

    Ok(())
}
