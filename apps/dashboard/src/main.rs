use std::sync::Arc;

use anyhow::{Context, Result};
use browser::SampleBrowser;
use clap::{Parser, Subcommand};
use client_core::{ClientConfig, DashboardClient};
use shared::{domain::ClipId, protocol::DataSamplesQuery};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

mod commands;
mod endpoints;
mod render;

use commands::run_browse;
use endpoints::Endpoint;
use render::render_browser;

#[derive(Parser, Debug)]
#[command(about = "Terminal view of the caption dataset quality dashboard")]
struct Cli {
    /// Backend base url; defaults to DASHBOARD_API_URL, then http://localhost:7010.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of validation samples.
    Samples {
        #[arg(long)]
        category: Option<String>,
        /// One-based page number.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Page through samples interactively.
    Browse {
        #[arg(long)]
        category: Option<String>,
    },
    /// Print the markdown source of the validation report.
    Report,
    /// Print a read-only aggregate endpoint as JSON.
    Get {
        #[arg(value_enum)]
        endpoint: Endpoint,
    },
    /// Print the full record of one sample.
    Detail { clip_id: String },
    /// Print the page-numbered data sample listing as JSON.
    DataSamples {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        media_type: Option<String>,
        #[arg(long)]
        has_issues: Option<bool>,
    },
    /// Print the media url of a clip.
    Media {
        clip_id: String,
        #[arg(long)]
        original: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config = ClientConfig::resolve(cli.api_url.as_deref())
        .context("failed to resolve dashboard api url")?;
    let client = DashboardClient::new(config).context("failed to build dashboard client")?;
    tracing::info!(base_url = %client.base_url(), "dashboard client ready");

    match cli.command {
        Command::Samples { category, page } => {
            let mut browser = SampleBrowser::new(Arc::new(client));
            browser.set_category(category);
            browser.settle().await;
            if page > 1
                && browser.state().error().is_none()
                && browser.set_page(i64::from(page) - 1).is_none()
            {
                eprintln!(
                    "page {page} is out of range; showing page 1 of {}",
                    browser.state().total_pages()
                );
            }
            browser.settle().await;
            print!("{}", render_browser(browser.state()));
        }
        Command::Browse { category } => browse(client, category).await?,
        Command::Report => {
            let report = client.validation_report().await?;
            println!("{}", report.content);
        }
        Command::Get { endpoint } => {
            let value = endpoints::fetch(&client, endpoint).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Detail { clip_id } => {
            let value = client.sample_detail(&ClipId(clip_id)).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::DataSamples {
            page,
            page_size,
            category,
            media_type,
            has_issues,
        } => {
            let query = DataSamplesQuery {
                page,
                page_size,
                media_type,
                has_issues,
                category,
            };
            let value = client.data_samples(&query).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Media { clip_id, original } => {
            let clip_id = ClipId(clip_id);
            let url = if original {
                client.original_media_url(&clip_id)
            } else {
                client.media_url(&clip_id)
            };
            println!("{url}");
        }
    }

    Ok(())
}

async fn browse(client: DashboardClient, category: Option<String>) -> Result<()> {
    let mut browser = SampleBrowser::new(Arc::new(client));
    match category {
        Some(category) => browser.set_category(Some(category)),
        None => browser.mount(),
    };
    let input = BufReader::new(tokio::io::stdin());
    run_browse(&mut browser, input, &mut std::io::stdout()).await
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
