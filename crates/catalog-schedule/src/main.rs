//! Catalog Schedule CLI.
//!
//! List catalog subjects, inspect one, or build a weekly schedule from several.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use catalog_schedule::{
    filter_subjects, render_grid_text, render_subject_detail, render_subject_list, CatalogClient,
    ScheduleBoard, TextStyle,
};
use schedule_kernel::{AppConfig, PlacementEngine, SelectionStrategy};

#[derive(Parser)]
#[command(name = "catalog-schedule")]
#[command(about = "Browse a course catalog and build a weekly schedule")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog API base URL (overrides the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog subjects.
    List {
        /// Keep subjects whose name or code contains this term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one subject with its groups and sessions.
    Show {
        /// Subject code, e.g. MAT101
        code: String,
    },

    /// Place subjects on a weekly grid and print it.
    Build {
        /// Subject codes
        #[arg(required = true)]
        codes: Vec<String>,
        /// Place this group instead of each subject's first one
        #[arg(short, long)]
        group: Option<String>,
        /// Print the grid model as JSON
        #[arg(long)]
        json: bool,
        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },
}

/// Log a clear warning up front when the catalog root does not answer.
async fn preflight(client: &CatalogClient) {
    if !client.health_check().await {
        warn!(api_url = %client.base_url(), "Catalog unreachable; requests will likely fail");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    }
    .with_api_url(cli.api_url.clone());

    let client = CatalogClient::with_timeout(
        &config.api_url,
        Duration::from_millis(config.request_timeout_ms),
    )
    .context("failed to create catalog client")?;

    match cli.command {
        Commands::List { search } => {
            preflight(&client).await;
            let subjects = client
                .list_subjects()
                .await
                .context("failed to load the subject list")?;
            let shown = filter_subjects(&subjects, search.as_deref().unwrap_or(""));
            println!("{}", render_subject_list(shown));
        }

        Commands::Show { code } => {
            let subject = client
                .subject_detail(&code)
                .await
                .with_context(|| format!("failed to load subject {}", code))?;
            println!("{}", render_subject_detail(&subject));
        }

        Commands::Build {
            codes,
            group,
            json,
            no_color,
        } => {
            preflight(&client).await;
            let strategy = group
                .map(SelectionStrategy::Named)
                .unwrap_or_else(|| config.selection.clone());
            let engine = PlacementEngine::new(strategy, config.layout);
            let mut board = ScheduleBoard::new(client.clone(), engine);

            // Details carry no credits; the summary list does.
            match client.list_subjects().await {
                Ok(subjects) => board.remember_credits(&subjects),
                Err(err) => warn!(error = %err, "Could not load credits from the subject list"),
            }

            info!(subjects = codes.len(), api_url = %config.api_url, "Building schedule");
            let reports = board.add_subjects(&codes).await;
            for message in reports.iter().filter_map(|r| r.message()) {
                println!("{}", message);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(board.grid())?);
            } else {
                let style = TextStyle {
                    color: !no_color,
                    ..TextStyle::default()
                };
                println!("{}", render_grid_text(board.grid(), &style));
            }
            println!("\n{}", board.summary());
        }
    }

    Ok(())
}
