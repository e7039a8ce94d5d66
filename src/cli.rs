//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use pdfapi_core::config::ENV_API_KEY;
use pdfapi_core::features::{PageOrientation, PageSize};
use pdfapi_core::{ApiError, ClientConfig, Endpoints};

/// Convert web pages to PDF, merge PDFs and extract text through the online API.
#[derive(Parser, Debug)]
#[command(name = "pdfapi")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// API key (falls back to the PDFAPI_KEY environment variable)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Conversion endpoint override
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Point every endpoint at this server (e.g. a local mock)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Seconds between async job polls
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(0..=600))]
    pub poll_interval: Option<u64>,

    /// Maximum async job polls before giving up
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pings: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a public web page to PDF
    ConvertUrl {
        /// Address of the page (http:// or https://)
        url: String,
        #[command(flatten)]
        output: PdfOutput,
    },
    /// Convert an HTML file to PDF
    ConvertHtml {
        /// HTML file to convert
        input: PathBuf,
        /// Base URL for relative links and assets
        #[arg(long)]
        asset_base_url: Option<String>,
        #[command(flatten)]
        output: PdfOutput,
    },
    /// Extract the text of a PDF (local path or http(s) URL)
    PdfToText {
        input: String,
        /// Write the text to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Run as an asynchronous job
        #[arg(long = "async")]
        run_async: bool,
    },
    /// Search a PDF (local path or http(s) URL) for text
    Search {
        input: String,
        /// Text to search for
        text: String,
        #[arg(long)]
        case_sensitive: bool,
        #[arg(long)]
        whole_words: bool,
        /// Run as an asynchronous job
        #[arg(long = "async")]
        run_async: bool,
    },
    /// Merge PDFs (local paths or http(s) URLs) in the given order
    Merge {
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<String>,
        /// Merged PDF
        #[arg(short, long)]
        output: PathBuf,
        /// Run as an asynchronous job
        #[arg(long = "async")]
        run_async: bool,
    },
    /// Show conversions used and available
    Usage {
        /// Include the monthly history
        #[arg(long)]
        history: bool,
    },
}

/// Output options shared by the HTML to PDF commands.
#[derive(Args, Debug)]
pub struct PdfOutput {
    /// Resulting PDF
    #[arg(short, long)]
    pub output: PathBuf,
    /// Page size (A4, Letter, ...)
    #[arg(long)]
    pub page_size: Option<PageSize>,
    /// Page orientation (Portrait or Landscape)
    #[arg(long)]
    pub orientation: Option<PageOrientation>,
    /// Margins in points, applied to all sides
    #[arg(long)]
    pub margin: Option<u32>,
    /// Run as an asynchronous job
    #[arg(long = "async")]
    pub run_async: bool,
}

impl Cli {
    /// Builds the client configuration from flags, falling back to `lookup`
    /// for environment variables.
    pub fn client_config(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ClientConfig, ApiError> {
        let mut config = ClientConfig::from_lookup(|name| {
            if name == ENV_API_KEY && self.api_key.is_some() {
                self.api_key.clone()
            } else {
                lookup(name)
            }
        })?;
        if let Some(base_url) = &self.base_url {
            config = config.with_endpoints(Endpoints::with_base_url(base_url));
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoints.convert.clone_from(endpoint);
        }
        if let Some(secs) = self.poll_interval {
            config = config.with_poll_interval(Duration::from_secs(secs));
        }
        if let Some(max_pings) = self.max_pings {
            config = config.with_max_pings(max_pings);
        }
        Ok(config)
    }
}
