//! Command-line front end for the batched link checker.
//!
//! Runs a full check session against a linkdock server, streaming progress
//! to the terminal, then offers to bulk-delete the links found dead.
//! Ctrl-C cancels the run; results collected so far are kept.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use linkdock_checker::{CheckError, CheckSession, HttpBackend, Phase};
use linkdock_core::check::{CheckResult, CheckStatus};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "link-check", about = "Check all bookmarks for dead links")]
struct Cli {
    /// Base URL of the linkdock server.
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// User id whose bookmarks are checked.
    #[arg(long)]
    user_id: i64,

    /// Delete the links found dead after the check completes.
    #[arg(long)]
    delete: bool,

    /// Skip the confirmation prompt before deleting.
    #[arg(long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkdock_checker=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let backend = HttpBackend::new(&cli.server, cli.user_id)
        .context("failed to build HTTP client")?;
    let mut session = CheckSession::new(backend);

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nCancelling...");
            ctrl_c_cancel.cancel();
        }
    });

    session.start().await.context("failed to start check run")?;
    let total = session.state().total_items();
    if total == 0 {
        println!("No bookmarks to check.");
        return Ok(());
    }
    println!("Checking {total} links...");

    loop {
        match session.step(&cancel).await {
            Ok(true) => {
                let state = session.state();
                println!(
                    "  batch {} done, {}% complete",
                    state.batch_cursor(),
                    state.progress_percent()
                );
            }
            Ok(false) => break,
            Err(err) => return Err(err).context("check run failed"),
        }
    }

    match session.phase() {
        Phase::Cancelled => println!("Cancelled; partial results below."),
        Phase::Completed => println!("Done."),
        _ => {}
    }

    println!();
    for result in session.state().results() {
        println!("{}", format_result(result));
    }

    let summary = session.state().summary();
    println!(
        "\n{} live, {} dead, {} timed out, {} unchecked",
        summary.live, summary.dead, summary.timed_out, summary.pending
    );

    let selected = session.state().selected().len();
    if selected == 0 {
        return Ok(());
    }
    println!("{selected} bad link(s) selected for deletion.");

    if !cli.delete {
        println!("Re-run with --delete to remove them.");
        return Ok(());
    }

    if !cli.yes && !confirm(&format!("Delete {selected} link(s)?"))? {
        println!("Aborted.");
        return Ok(());
    }

    match session.delete_selected().await {
        Ok(deleted) => println!("Deleted {deleted} link(s)."),
        Err(CheckError::EmptySelection) => println!("Nothing selected."),
        Err(err) => return Err(err).context("bulk delete failed"),
    }

    Ok(())
}

fn format_result(result: &CheckResult) -> String {
    let marker = match result.status {
        CheckStatus::Live => "ok ",
        CheckStatus::Dead => "DEAD",
        CheckStatus::TimedOut => "TIME",
        CheckStatus::Pending => "?   ",
    };
    let detail = match (&result.status_code, &result.error_detail) {
        (Some(code), _) => format!(" [{code}]"),
        (None, Some(err)) => format!(" ({err})"),
        _ => String::new(),
    };
    format!("  {marker} {} - {}{detail}", result.name, result.url)
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
