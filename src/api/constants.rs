//! Wire constants for the conversion API (endpoints, headers, reserved parameters).

use std::time::Duration;

/// Default conversion endpoint (HTML to PDF).
pub const DEFAULT_CONVERT_ENDPOINT: &str = "https://selectpdf.com/api2/convert/";

/// Default async job status endpoint.
pub const DEFAULT_ASYNC_ENDPOINT: &str = "https://selectpdf.com/api2/asyncjob/";

/// Default web elements lookup endpoint.
pub const DEFAULT_WEB_ELEMENTS_ENDPOINT: &str = "https://selectpdf.com/api2/webelements/";

/// Default PDF to text endpoint.
pub const DEFAULT_PDF_TO_TEXT_ENDPOINT: &str = "https://selectpdf.com/api2/pdftotext/";

/// Default PDF merge endpoint.
pub const DEFAULT_PDF_MERGE_ENDPOINT: &str = "https://selectpdf.com/api2/pdfmerge/";

/// Default usage endpoint.
pub const DEFAULT_USAGE_ENDPOINT: &str = "https://selectpdf.com/api2/usage/";

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default whole-request timeout (100 minutes; conversions can run long server-side).
pub const REQUEST_TIMEOUT_SECS: u64 = 6000;

/// Default pause between async job polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Default maximum number of async job polls.
pub const DEFAULT_MAX_PINGS: u32 = 1000;

/// Maximum characters handed to one percent-encoding pass.
pub const ENCODE_CHUNK_CHARS: usize = 32765;

/// Response header carrying the page count of the produced document.
pub const HEADER_PAGES: &str = "selectpdf-api-pages";

/// Response header carrying the job id.
pub const HEADER_JOB_ID: &str = "selectpdf-api-jobid";

/// Response header carrying the number of web-element header chunks.
pub const HEADER_WEB_ELEMENTS_COUNT: &str = "selectpdf-api-web-elements-headers-count";

/// Prefix of the numbered web-element header chunks (`<prefix><i>`, 1-based).
pub const HEADER_WEB_ELEMENTS_CHUNK_PREFIX: &str = "selectpdf-api-web-elements-header-";

/// Reserved parameter names.
pub mod params {
    pub const KEY: &str = "key";
    pub const ASYNC: &str = "async";
    pub const JOB_ID: &str = "job_id";
    pub const ACTION: &str = "action";
    pub const URL: &str = "url";
    pub const HTML: &str = "html";
    pub const BASE_URL: &str = "base_url";
    pub const GET_HISTORY: &str = "get_history";
    pub const FILES_NO: &str = "files_no";
    pub const SEARCH_TEXT: &str = "search_text";
    pub const CASE_SENSITIVE: &str = "case_sensitive";
    pub const WHOLE_WORDS_ONLY: &str = "whole_words_only";
    pub const WEB_ELEMENTS_SELECTORS: &str = "pdf_web_elements_selectors";
}

/// Serializes a boolean the way the service expects it.
#[must_use]
pub fn bool_param(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
