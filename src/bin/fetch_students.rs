//! Fetch student records for a list or range of roll numbers, write them to a
//! spreadsheet, and bundle it with the error log into an encrypted ZIP.
//!
//! Configuration comes from flags or the environment (see `--help`); a `.env`
//! file in the working directory is loaded first.

use clap::Parser;
use rollno_dl::cli::FetchArgs;
use rollno_dl::{Collector, Config, Event};
use std::process::ExitCode;
use tokio::sync::broadcast::{self, error::RecvError};

#[tokio::main]
async fn main() -> ExitCode {
    // Load from .env
    dotenvy::dotenv().ok();
    let args = FetchArgs::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run aborted");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: FetchArgs) -> rollno_dl::Result<()> {
    rollno_dl::logging::init(&args.error_log)?;

    let config = Config::try_from(args)?;
    let collector = Collector::new(config)?;

    let progress = tokio::spawn(report_progress(collector.subscribe()));
    let result = collector.run().await;
    progress.abort();

    let summary = result?;
    tracing::info!(
        total = summary.total,
        found = summary.succeeded,
        absent = summary.absent,
        table = %summary.table_path.display(),
        archive = %summary.archive_path.display(),
        "Done"
    );
    Ok(())
}

/// Log fetch progress in 10% steps
async fn report_progress(mut events: broadcast::Receiver<Event>) {
    let mut last_decile = 0;
    loop {
        match events.recv().await {
            Ok(Event::FetchStarted { total }) => {
                tracing::info!(total, "Fetching student data");
            }
            Ok(Event::Progress { completed, total }) => {
                let decile = completed * 10 / total.max(1);
                if decile > last_decile {
                    last_decile = decile;
                    tracing::info!(completed, total, "Fetching student data ({}%)", decile * 10);
                }
            }
            Ok(Event::FetchComplete { succeeded, absent }) => {
                tracing::info!(succeeded, absent, "Fetch complete");
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Progress reporter lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
