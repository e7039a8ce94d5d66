//! CLI entry point for the pdfapi tool.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use pdfapi_core::features::{
    HtmlToPdfClient, PdfMergeClient, PdfToTextClient, SearchOptions, UsageClient,
};
use pdfapi_core::{ApiClient, CallResult};
use tracing::{debug, info};

mod cli;

use cli::{Cli, Command, PdfOutput};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(command = ?cli.command, "CLI arguments parsed");

    let config = cli
        .client_config(|name| std::env::var(name).ok())
        .context("invalid configuration")?;
    let api = ApiClient::new(config)?;

    match cli.command {
        Command::ConvertUrl { url, output } => {
            let mut client = HtmlToPdfClient::new(api);
            apply_pdf_options(&mut client, &output);
            let result = if output.run_async {
                client.convert_url_to_file_async(&url, &output.output).await?
            } else {
                client.convert_url_to_file(&url, &output.output).await?
            };
            report_pdf(&result, &output.output);
        }
        Command::ConvertHtml {
            input,
            asset_base_url,
            output,
        } => {
            let html = tokio::fs::read_to_string(&input)
                .await
                .with_context(|| format!("could not read {}", input.display()))?;
            let mut client = HtmlToPdfClient::new(api);
            apply_pdf_options(&mut client, &output);
            let base_url = asset_base_url.as_deref();
            let result = if output.run_async {
                client
                    .convert_html_string_to_file_async(&html, base_url, &output.output)
                    .await?
            } else {
                client
                    .convert_html_string_to_file(&html, base_url, &output.output)
                    .await?
            };
            report_pdf(&result, &output.output);
        }
        Command::PdfToText {
            input,
            output,
            run_async,
        } => {
            let mut client = PdfToTextClient::new(api);
            let extracted = match (is_url(&input), run_async) {
                (true, false) => client.text_from_url(&input).await?,
                (true, true) => client.text_from_url_async(&input).await?,
                (false, false) => client.text_from_file(Path::new(&input)).await?,
                (false, true) => client.text_from_file_async(Path::new(&input)).await?,
            };
            info!(pages = extracted.page_count, "text extracted");
            match output {
                Some(path) => tokio::fs::write(&path, extracted.text)
                    .await
                    .with_context(|| format!("could not write {}", path.display()))?,
                None => println!("{}", extracted.text),
            }
        }
        Command::Search {
            input,
            text,
            case_sensitive,
            whole_words,
            run_async,
        } => {
            let mut client = PdfToTextClient::new(api);
            let options = SearchOptions {
                case_sensitive,
                whole_words_only: whole_words,
            };
            let positions = match (is_url(&input), run_async) {
                (true, false) => client.search_url(&input, &text, options).await?,
                (true, true) => client.search_url_async(&input, &text, options).await?,
                (false, false) => client.search_file(Path::new(&input), &text, options).await?,
                (false, true) => {
                    client
                        .search_file_async(Path::new(&input), &text, options)
                        .await?
                }
            };
            println!("Search results: {} matches", positions.len());
            for position in &positions {
                println!("{position}");
            }
        }
        Command::Merge {
            inputs,
            output,
            run_async,
        } => {
            let mut client = PdfMergeClient::new(api);
            for input in &inputs {
                if is_url(input) {
                    client.add_url_file(input);
                } else {
                    client.add_file(input);
                }
            }
            let result = if run_async {
                client.save_to_file_async(&output).await?
            } else {
                client.save_to_file(&output).await?
            };
            report_pdf(&result, &output);
        }
        Command::Usage { history } => {
            let usage = UsageClient::new(api).usage(history).await?;
            println!(
                "Status: {}, subscription: {}, limit: {}, used: {}, available: {}",
                usage.status, usage.subscription_type, usage.limit, usage.used, usage.available
            );
            for month in &usage.history {
                println!(
                    "{}-{:02}: {} conversions, {} credits",
                    month.year, month.month, month.conversions, month.credits
                );
            }
        }
    }

    Ok(())
}

fn apply_pdf_options(client: &mut HtmlToPdfClient, output: &PdfOutput) {
    if let Some(page_size) = output.page_size {
        client.set_page_size(page_size);
    }
    if let Some(orientation) = output.orientation {
        client.set_page_orientation(orientation);
    }
    if let Some(margin) = output.margin {
        client.set_margins(margin);
    }
}

fn report_pdf(result: &CallResult, path: &Path) {
    info!(pages = result.page_count, path = %path.display(), "PDF written");
    println!("{} ({} pages)", path.display(), result.page_count);
}

fn is_url(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
