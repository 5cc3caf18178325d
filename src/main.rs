//! Clipfetch - client for a remote video download service
//!
//! Talks to an extraction backend over HTTP: preview metadata for a video
//! page URL, trigger a server-side download at a chosen quality tier, and
//! keep a small local history of past downloads for offline viewing.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use clipfetch::api::{ApiClient, Quality, VideoService};
use clipfetch::history::HistoryManager;
use clipfetch::network::NetworkMonitor;
use clipfetch::session::{SessionActor, SessionCommand, SessionEvent};
use clipfetch::storage::JsonFileStore;
use clipfetch::utils::ClientSettings;

#[derive(Parser)]
#[command(name = "clipfetch", about = "Client for a remote video download service")]
struct Args {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Check that the download service is reachable
    Status,
    /// Preview metadata for a video URL without downloading
    Info { url: String },
    /// Ask the server to download a video, then print where to fetch it
    Download {
        url: String,
        /// Quality tier: best, high, medium, low
        #[arg(long, default_value_t = Quality::Best)]
        quality: Quality,
        /// Open the finished file with the platform handler
        #[arg(long)]
        open: bool,
    },
    /// Print the locally persisted download history
    History,
    /// Clear the download history
    ClearHistory,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let settings = ClientSettings::from_env();
    let network = NetworkMonitor::default();
    let client = Arc::new(ApiClient::new(&settings.api_base_url, network.clone()));

    match args.command {
        CliCommand::Status => {
            match client.health_check().await {
                Ok(health) => println!("{}: {}", health.status, health.message),
                Err(failure) => anyhow::bail!("{}", failure.text),
            }
        }
        CliCommand::Info { url } => {
            print_info(&*client, &url).await?;
        }
        CliCommand::Download { url, quality, open } => {
            download_via_session(&settings, network, client, url, quality, open).await?;
        }
        CliCommand::History => {
            let mut history = HistoryManager::new(JsonFileStore::new(&settings.data_dir));
            let log = history.load().await;

            if log.is_empty() {
                println!("No downloads recorded yet.");
            }
            for entry in log {
                println!(
                    "{}  [{}]  {}",
                    entry.downloaded_at.format("%Y-%m-%d %H:%M"),
                    entry.quality,
                    entry.title.as_deref().unwrap_or(&entry.url)
                );
            }
        }
        CliCommand::ClearHistory => {
            let mut history = HistoryManager::new(JsonFileStore::new(&settings.data_dir));
            history.clear().await;
            println!("Download history cleared.");
        }
    }

    Ok(())
}

async fn print_info(client: &ApiClient, url: &str) -> Result<()> {
    let info = match client.fetch_video_info(url).await {
        Ok(info) => info,
        Err(failure) => anyhow::bail!("{}", failure.text),
    };

    println!("Title:     {}", info.title.as_deref().unwrap_or("(unknown)"));
    if let Some(uploader) = &info.uploader {
        println!("Uploader:  {}", uploader);
    }
    if let Some(duration) = info.duration {
        println!("Duration:  {:.0}s", duration);
    }
    if let Some(views) = info.view_count {
        println!("Views:     {}", views);
    }
    if let Some(extractor) = &info.extractor {
        println!("Extractor: {}", extractor);
    }

    Ok(())
}

/// Run one download through the session actor, printing progress events.
///
/// This is the headless equivalent of the interactive flow: the same actor,
/// commands, and events a UI shell would use.
async fn download_via_session(
    settings: &ClientSettings,
    network: NetworkMonitor,
    client: Arc<ApiClient>,
    url: String,
    quality: Quality,
    open_file: bool,
) -> Result<()> {
    let history = HistoryManager::new(JsonFileStore::new(&settings.data_dir));
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (event_tx, mut event_rx) = mpsc::channel(64);

    let actor = SessionActor::new(
        client.clone(),
        network,
        history,
        Duration::from_millis(settings.preview_debounce_ms),
        cmd_rx,
        event_tx,
    );
    let actor_handle = tokio::spawn(actor.run());

    cmd_tx.send(SessionCommand::UrlChanged(url)).await?;
    cmd_tx.send(SessionCommand::QualitySelected(quality)).await?;
    cmd_tx.send(SessionCommand::SubmitDownload).await?;

    let mut result = Ok(());
    while let Some(event) = event_rx.recv().await {
        match event {
            SessionEvent::DownloadStarted => {
                println!("Requesting download ({})...", quality);
            }
            SessionEvent::HistorySaveFailed(failure) => {
                eprintln!("Warning: download not recorded in history: {}", failure.text);
            }
            SessionEvent::DownloadCompleted { outcome, history } => {
                let file_url = client.file_url(&outcome.download_url);
                if let Some(title) = &outcome.title {
                    println!("Title: {}", title);
                }
                println!("Download ready: {}", file_url);
                println!("History entries: {}", history.len());

                if open_file {
                    open::that(&file_url)?;
                }
                break;
            }
            SessionEvent::DownloadFailed(failure) => {
                result = Err(anyhow::anyhow!("{}", failure.text));
                break;
            }
            _ => {}
        }
    }

    let _ = cmd_tx.send(SessionCommand::Shutdown).await;
    let _ = actor_handle.await;
    result
}
