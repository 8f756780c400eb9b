use std::{path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use dedup_files_client::{
    format_file_size, DiskSink, FileApi, FileData, HttpFileApi, InvalidationSignal,
    ListController, SavingsTracker, UploadController, UploadOutcome, UploadPhase,
    DEFAULT_BASE_URL,
};

#[derive(Parser)]
#[command(
    name = "dedup-files",
    about = "Client for a deduplicating file-management service"
)]
struct Cli {
    /// API base URL; falls back to DEDUP_API_BASE_URL, then a local default.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a file, reporting deduplication hits
    Upload { path: PathBuf },
    /// List uploaded files
    List {
        /// Substring match on the original filename
        #[arg(long)]
        search: Option<String>,
        /// MIME type match
        #[arg(long)]
        file_type: Option<String>,
        /// Lower size bound in bytes
        #[arg(long)]
        min_size: Option<u64>,
        /// Upper size bound in bytes
        #[arg(long)]
        max_size: Option<u64>,
        /// Earliest upload date (YYYY-MM-DD)
        #[arg(long)]
        min_uploaded_at: Option<NaiveDate>,
        /// Latest upload date (YYYY-MM-DD)
        #[arg(long)]
        max_uploaded_at: Option<NaiveDate>,
    },
    /// Delete a file by id
    Delete { id: String },
    /// Download a file by id
    Download {
        id: String,
        /// Directory to save into
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
    /// Show total storage saved by deduplication
    Savings,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let base_url = cli
        .base_url
        .or_else(|| std::env::var("DEDUP_API_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let api: Arc<dyn FileApi> = Arc::new(HttpFileApi::new(base_url));
    let invalidation = InvalidationSignal::new();
    let savings = Arc::new(SavingsTracker::new(Arc::clone(&api)));

    match cli.command {
        Command::Upload { path } => {
            let content = match tokio::fs::read(&path).await {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Cannot read {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            };
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
                .unwrap_or_else(|| "upload.bin".to_string());
            let mime_type = mime_for(&filename).to_string();

            let mut upload =
                UploadController::new(Arc::clone(&api), Arc::clone(&savings), invalidation);
            upload
                .select_file(FileData::new(content, filename, mime_type))
                .expect("fresh controller has no upload in flight");

            match upload.submit().await {
                Ok(UploadOutcome::Created(record)) => {
                    println!(
                        "Uploaded {} (id {}, {})",
                        record.original_filename,
                        record.id,
                        format_file_size(record.size)
                    );
                }
                Ok(UploadOutcome::Duplicate { .. }) => {
                    if let UploadPhase::DuplicateNotice {
                        message,
                        existing_file_id,
                    } = upload.phase()
                    {
                        println!("Duplicate: {} (existing id {})", message, existing_file_id);
                    }
                }
                Ok(UploadOutcome::Failed(reason)) => {
                    eprintln!("Upload failed: {}", reason);
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
            if let Some(summary) = savings.current() {
                println!("Total saved so far: {} {}", summary.size, summary.unit);
            }
        }
        Command::List {
            search,
            file_type,
            min_size,
            max_size,
            min_uploaded_at,
            max_uploaded_at,
        } => {
            let mut list = ListController::new(Arc::clone(&api), invalidation);
            {
                let pending = list.pending_mut();
                pending.search = search;
                pending.file_type = file_type;
                pending.min_size = min_size;
                pending.max_size = max_size;
                pending.min_uploaded_at = min_uploaded_at;
                pending.max_uploaded_at = max_uploaded_at;
            }
            let records = list.apply_filters().await;
            if let Some(e) = list.last_error() {
                eprintln!("List failed: {}", e);
                std::process::exit(1);
            }
            for record in &records {
                println!(
                    "{}  {}  {}  {}  {}",
                    record.id,
                    record.uploaded_at.format("%Y-%m-%d %H:%M"),
                    format_file_size(record.size),
                    record.file_type,
                    record.original_filename
                );
            }
            println!("{} file(s)", records.len());
        }
        Command::Delete { id } => {
            let mut list = ListController::new(Arc::clone(&api), invalidation);
            match list.delete_file(&id).await {
                Ok(()) => println!("Deleted {}", id),
                Err(e) => {
                    eprintln!("Delete failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Download { id, output } => {
            let mut list = ListController::new(Arc::clone(&api), invalidation);
            let records = list.query().await;
            if let Some(e) = list.last_error() {
                eprintln!("List failed: {}", e);
                std::process::exit(1);
            }
            let Some(record) = records.iter().find(|record| record.id == id) else {
                eprintln!("No file with id {}", id);
                std::process::exit(1);
            };
            let sink = DiskSink::new(output);
            match list.download_file(record, &sink).await {
                Ok(()) => println!("Saved {}", record.original_filename),
                Err(e) => {
                    eprintln!("Download failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Savings => {
            savings.refresh().await;
            match savings.current() {
                Some(summary) => println!("Total saved: {} {}", summary.size, summary.unit),
                None => println!("Savings unknown (fetch failed)"),
            }
        }
    }
}

fn mime_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "txt" | "md" | "log" => "text/plain",
        "csv" => "text/csv",
        "html" => "text/html",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "zip" => "application/zip",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}
