//! Result types returned by API calls.

use std::fmt;

use serde::Deserialize;

/// Outcome of one API call.
///
/// Each call produces its own value, so derived metadata never leaks between
/// calls made through the same client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallResult {
    /// HTTP status the server answered with (200 or 202).
    pub status: u16,
    /// Response body, or `None` when it went to a caller-supplied sink or
    /// the server accepted an asynchronous job.
    pub body: Option<Vec<u8>>,
    /// Pages in the produced document (0 when not reported).
    pub page_count: u32,
    /// Job id: present while an async job runs, or when a follow-up request
    /// (e.g. web elements lookup) can be made for this result.
    pub job_id: Option<String>,
    /// Web element locations, when requested and matched.
    pub web_elements: Option<Vec<WebElement>>,
}

impl CallResult {
    /// Returns the body bytes, or an empty buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.body.unwrap_or_default()
    }

    /// Returns the body bytes by reference, or an empty slice.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }
}

/// Rectangle in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PdfRectangle {
    #[serde(alias = "X")]
    pub x: f32,
    #[serde(alias = "Y")]
    pub y: f32,
    #[serde(alias = "Width")]
    pub width: f32,
    #[serde(alias = "Height")]
    pub height: f32,
}

/// Area occupied by an HTML element on one page of the generated PDF.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebElementPdfRectangle {
    /// Zero-based page index.
    #[serde(alias = "PageIndex")]
    pub page_index: u32,
    /// Position inside the page drawing area (excludes margins, header, footer).
    #[serde(alias = "Rectangle")]
    pub rectangle: PdfRectangle,
}

/// Mapping of an HTML element to the PDF rectangles it covers.
///
/// An element can span several pages, hence the list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebElement {
    #[serde(alias = "HtmlElementId")]
    pub html_element_id: Option<String>,
    #[serde(alias = "HtmlElementTagName")]
    pub html_element_tag_name: Option<String>,
    #[serde(alias = "HtmlElementCssClassName")]
    pub html_element_css_class_name: Option<String>,
    #[serde(alias = "PdfRectangles")]
    pub pdf_rectangles: Vec<WebElementPdfRectangle>,
}

/// Location of a search match inside a PDF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextPosition {
    /// 1-based page number.
    #[serde(alias = "PageNumber")]
    pub page_number: u32,
    #[serde(alias = "X")]
    pub x: f32,
    #[serde(alias = "Y")]
    pub y: f32,
    #[serde(alias = "Width")]
    pub width: f32,
    #[serde(alias = "Height")]
    pub height: f32,
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Page: {} - [X: {}, Y: {}, Width: {}, Height: {}]",
            self.page_number, self.x, self.y, self.width, self.height
        )
    }
}

/// Account usage snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageInformation {
    /// Subscription status.
    pub status: String,
    /// Subscription type.
    pub subscription_type: String,
    /// Monthly conversions limit.
    pub limit: i64,
    /// Conversions used this month.
    pub used: i64,
    /// Conversions still available this month.
    pub available: i64,
    /// Monthly history (only filled when history was requested).
    pub history: Vec<UsageMonthlyDetails>,
}

/// Usage for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UsageMonthlyDetails {
    pub year: i32,
    pub month: u32,
    pub conversions: i64,
    pub credits: i64,
}
