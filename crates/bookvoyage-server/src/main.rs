//! BookVoyage — reading recommendation server over Goodreads tables.

use std::path::PathBuf;
use std::sync::Arc;

use bookvoyage_server::sample::{self, DEFAULT_SAMPLE_SIZE};
use bookvoyage_server::{build_router, validate, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("BOOKVOYAGE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()));
            if let Some(dir) = exe_dir {
                let parent_data = dir.join("../Data");
                if parent_data.exists() {
                    return parent_data;
                }
            }
            PathBuf::from("Data")
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--validate" | "validate" => {
                let data_dir = if args.len() > 2 {
                    PathBuf::from(&args[2])
                } else {
                    resolve_data_dir()
                };
                let report = validate::validate(&data_dir);
                validate::print_report(&report);
                std::process::exit(if report.is_ready() { 0 } else { 1 });
            }
            "sample-reviews" => {
                if args.len() < 4 {
                    eprintln!("Usage: bookvoyage sample-reviews <source.csv> <target.csv> [rows]");
                    std::process::exit(1);
                }
                let rows = match args.get(4) {
                    Some(raw) => raw
                        .parse()
                        .map_err(|_| anyhow::anyhow!("row count is not a number: {}", raw))?,
                    None => DEFAULT_SAMPLE_SIZE,
                };
                let report = sample::sample_reviews_file(
                    &PathBuf::from(&args[2]),
                    &PathBuf::from(&args[3]),
                    rows,
                )?;
                println!(
                    "Sample saved to {} ({} of {} rows).",
                    args[3], report.sampled_rows, report.source_rows
                );
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("BookVoyage — personal reading discovery server");
                println!();
                println!("Usage: bookvoyage [command]");
                println!();
                println!("Commands:");
                println!("  (none)                          Start the server");
                println!("  validate [data-dir]             Check the works and reviews tables");
                println!("  sample-reviews <src> <dst> [n]  Write a seeded sample of n reviews (default {DEFAULT_SAMPLE_SIZE})");
                println!("  help                            Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'bookvoyage help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = bookvoyage_core::BookVoyageConfig::from_env(&data_dir)?;
    let port = config.port;

    let state = Arc::new(AppState::load(config)?);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("BookVoyage server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
