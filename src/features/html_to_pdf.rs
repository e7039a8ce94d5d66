//! HTML to PDF conversion client.

use std::path::Path;

use tokio::io::AsyncWrite;
use tracing::{debug, instrument};

use super::options::{
    NumericOption, PageLayout, PageMode, PageNumbersAlignment, PageOrientation, PageSize,
    RenderingEngine, SecureProtocol, StartupMode,
};
use super::{save_to_file, save_to_writer};
use crate::api::constants::params;
use crate::api::encoder::encode_value;
use crate::api::{ApiClient, ApiError, BodyKind, CallRequest, CallResult, WebElement};
use crate::validation::{UrlRole, ensure_color, ensure_public_url};

/// Converts web pages and raw HTML to PDF.
///
/// Option setters are sticky: they apply to every later conversion made
/// with this client.
#[derive(Debug, Clone)]
pub struct HtmlToPdfClient {
    api: ApiClient,
    request: CallRequest,
}

impl HtmlToPdfClient {
    /// Creates a client using the API key from `api`'s configuration.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let request = CallRequest::with_api_key(&api.config().api_key);
        Self { api, request }
    }

    /// Returns the underlying request store.
    #[must_use]
    pub fn request(&self) -> &CallRequest {
        &self.request
    }

    // ==================== Conversions ====================

    /// Converts a public web page to PDF.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for non-http(s) or local URLs, or any
    /// call error.
    #[instrument(skip(self))]
    pub async fn convert_url(&mut self, url: &str) -> Result<CallResult, ApiError> {
        self.prepare_url(url)?;
        self.request.set_bool(params::ASYNC, false);
        self.api
            .call(&self.api.config().endpoints.convert, &self.request, BodyKind::UrlEncoded)
            .await
    }

    /// Converts a public web page and streams the PDF into `writer`.
    ///
    /// # Errors
    ///
    /// Same as [`convert_url`](Self::convert_url), plus write failures.
    #[instrument(skip(self, writer))]
    pub async fn convert_url_to_writer<W>(
        &mut self,
        url: &str,
        writer: &mut W,
    ) -> Result<CallResult, ApiError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.prepare_url(url)?;
        self.request.set_bool(params::ASYNC, false);
        self.api
            .call_to_writer(
                &self.api.config().endpoints.convert,
                &self.request,
                BodyKind::UrlEncoded,
                writer,
            )
            .await
    }

    /// Converts a public web page into a new file; a partial file is removed
    /// on failure.
    ///
    /// # Errors
    ///
    /// Same as [`convert_url`](Self::convert_url), plus IO failures.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn convert_url_to_file(
        &mut self,
        url: &str,
        path: &Path,
    ) -> Result<CallResult, ApiError> {
        self.prepare_url(url)?;
        self.request.set_bool(params::ASYNC, false);
        self.api
            .call_to_file(
                &self.api.config().endpoints.convert,
                &self.request,
                BodyKind::UrlEncoded,
                path,
            )
            .await
    }

    /// Converts a public web page through an asynchronous job.
    ///
    /// # Errors
    ///
    /// Same as [`convert_url`](Self::convert_url), plus
    /// [`ApiError::AsyncLaunch`] and [`ApiError::AsyncTimeout`].
    #[instrument(skip(self))]
    pub async fn convert_url_async(&mut self, url: &str) -> Result<CallResult, ApiError> {
        self.prepare_url(url)?;
        self.run_async().await
    }

    /// Converts a public web page through an asynchronous job into a file.
    ///
    /// # Errors
    ///
    /// Same as [`convert_url_async`](Self::convert_url_async), plus IO failures.
    pub async fn convert_url_to_file_async(
        &mut self,
        url: &str,
        path: &Path,
    ) -> Result<CallResult, ApiError> {
        let result = self.convert_url_async(url).await?;
        save_to_file(result, path).await
    }

    /// Converts an HTML string to PDF.
    ///
    /// `base_url` resolves relative links and assets in `html`.
    ///
    /// # Errors
    ///
    /// Returns any call error.
    #[instrument(skip(self, html), fields(html_len = html.len()))]
    pub async fn convert_html_string(
        &mut self,
        html: &str,
        base_url: Option<&str>,
    ) -> Result<CallResult, ApiError> {
        self.prepare_html(html, base_url);
        self.request.set_bool(params::ASYNC, false);
        self.api
            .call(&self.api.config().endpoints.convert, &self.request, BodyKind::UrlEncoded)
            .await
    }

    /// Converts an HTML string and streams the PDF into `writer`.
    ///
    /// # Errors
    ///
    /// Returns any call error, plus write failures.
    #[instrument(skip(self, html, writer), fields(html_len = html.len()))]
    pub async fn convert_html_string_to_writer<W>(
        &mut self,
        html: &str,
        base_url: Option<&str>,
        writer: &mut W,
    ) -> Result<CallResult, ApiError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.prepare_html(html, base_url);
        self.request.set_bool(params::ASYNC, false);
        self.api
            .call_to_writer(
                &self.api.config().endpoints.convert,
                &self.request,
                BodyKind::UrlEncoded,
                writer,
            )
            .await
    }

    /// Converts an HTML string into a new file.
    ///
    /// # Errors
    ///
    /// Returns any call error, plus IO failures.
    #[instrument(skip(self, html), fields(html_len = html.len(), path = %path.display()))]
    pub async fn convert_html_string_to_file(
        &mut self,
        html: &str,
        base_url: Option<&str>,
        path: &Path,
    ) -> Result<CallResult, ApiError> {
        self.prepare_html(html, base_url);
        self.request.set_bool(params::ASYNC, false);
        self.api
            .call_to_file(
                &self.api.config().endpoints.convert,
                &self.request,
                BodyKind::UrlEncoded,
                path,
            )
            .await
    }

    /// Converts an HTML string through an asynchronous job.
    ///
    /// # Errors
    ///
    /// Returns any call error, [`ApiError::AsyncLaunch`] or
    /// [`ApiError::AsyncTimeout`].
    #[instrument(skip(self, html), fields(html_len = html.len()))]
    pub async fn convert_html_string_async(
        &mut self,
        html: &str,
        base_url: Option<&str>,
    ) -> Result<CallResult, ApiError> {
        self.prepare_html(html, base_url);
        self.run_async().await
    }

    /// Converts an HTML string through an asynchronous job into a file.
    ///
    /// # Errors
    ///
    /// Same as [`convert_html_string_async`](Self::convert_html_string_async),
    /// plus IO failures.
    pub async fn convert_html_string_to_file_async(
        &mut self,
        html: &str,
        base_url: Option<&str>,
        path: &Path,
    ) -> Result<CallResult, ApiError> {
        let result = self.convert_html_string_async(html, base_url).await?;
        save_to_file(result, path).await
    }

    /// Converts an HTML string through an asynchronous job into `writer`.
    ///
    /// # Errors
    ///
    /// Same as [`convert_html_string_async`](Self::convert_html_string_async),
    /// plus write failures.
    pub async fn convert_html_string_to_writer_async<W>(
        &mut self,
        html: &str,
        base_url: Option<&str>,
        writer: &mut W,
    ) -> Result<CallResult, ApiError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let result = self.convert_html_string_async(html, base_url).await?;
        save_to_writer(result, writer).await
    }

    /// Converts a public web page through an asynchronous job into `writer`.
    ///
    /// # Errors
    ///
    /// Same as [`convert_url_async`](Self::convert_url_async), plus write
    /// failures.
    pub async fn convert_url_to_writer_async<W>(
        &mut self,
        url: &str,
        writer: &mut W,
    ) -> Result<CallResult, ApiError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let result = self.convert_url_async(url).await?;
        save_to_writer(result, writer).await
    }

    /// Returns the web elements located by a conversion.
    ///
    /// Elements delivered in the response headers are used as is; otherwise,
    /// when the conversion echoed a job id, they are looked up on the web
    /// elements endpoint. A result with neither yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns any error of the lookup call.
    pub async fn web_elements(&self, result: &CallResult) -> Result<Vec<WebElement>, ApiError> {
        if let Some(elements) = &result.web_elements {
            return Ok(elements.clone());
        }
        match result.job_id.as_deref() {
            Some(job_id) => {
                self.api
                    .fetch_web_elements(self.request.api_key(), job_id)
                    .await
            }
            None => {
                debug!("no web elements reported for this conversion");
                Ok(Vec::new())
            }
        }
    }

    fn prepare_url(&mut self, url: &str) -> Result<(), ApiError> {
        ensure_public_url(url, UrlRole::Webpage)?;
        self.request
            .set(params::URL, url)
            .set(params::HTML, "")
            .set(params::BASE_URL, "");
        Ok(())
    }

    fn prepare_html(&mut self, html: &str, base_url: Option<&str>) {
        self.request
            .set(params::URL, "")
            .set(params::HTML, html)
            .set(params::BASE_URL, base_url.unwrap_or_default());
    }

    async fn run_async(&mut self) -> Result<CallResult, ApiError> {
        let endpoint = self.api.config().endpoints.convert.clone();
        self.api
            .run_async(&endpoint, &mut self.request, BodyKind::UrlEncoded)
            .await
    }

    // ==================== Page setup ====================

    /// PDF page size. Default A4.
    pub fn set_page_size(&mut self, page_size: PageSize) -> &mut Self {
        self.request.set("page_size", page_size.as_str());
        self
    }

    /// Custom page width in points (1pt = 1/72 in). Used with [`PageSize::Custom`].
    pub fn set_page_width(&mut self, width: u32) -> &mut Self {
        self.request.set_int("page_width", i64::from(width));
        self
    }

    /// Custom page height in points. Used with [`PageSize::Custom`].
    pub fn set_page_height(&mut self, height: u32) -> &mut Self {
        self.request.set_int("page_height", i64::from(height));
        self
    }

    /// Page orientation. Default portrait.
    pub fn set_page_orientation(&mut self, orientation: PageOrientation) -> &mut Self {
        self.request.set("page_orientation", orientation.as_str());
        self
    }

    pub fn set_margin_top(&mut self, margin: u32) -> &mut Self {
        self.request.set_int("margin_top", i64::from(margin));
        self
    }

    pub fn set_margin_right(&mut self, margin: u32) -> &mut Self {
        self.request.set_int("margin_right", i64::from(margin));
        self
    }

    pub fn set_margin_bottom(&mut self, margin: u32) -> &mut Self {
        self.request.set_int("margin_bottom", i64::from(margin));
        self
    }

    pub fn set_margin_left(&mut self, margin: u32) -> &mut Self {
        self.request.set_int("margin_left", i64::from(margin));
        self
    }

    /// Sets all four margins, in points.
    pub fn set_margins(&mut self, margin: u32) -> &mut Self {
        self.set_margin_top(margin)
            .set_margin_right(margin)
            .set_margin_bottom(margin)
            .set_margin_left(margin)
    }

    /// Name the service gives the generated PDF.
    pub fn set_pdf_name(&mut self, name: &str) -> &mut Self {
        self.request.set("pdf_name", name);
        self
    }

    // ==================== Rendering ====================

    /// Rendering engine. Default WebKit.
    pub fn set_rendering_engine(&mut self, engine: RenderingEngine) -> &mut Self {
        self.request.set("engine", engine.as_str());
        self
    }

    /// Protocol the converter uses for HTTPS pages.
    pub fn set_secure_protocol(&mut self, protocol: SecureProtocol) -> &mut Self {
        self.request.set_int("protocol", protocol.value());
        self
    }

    /// Width of the browser viewport in pixels. Default 1024.
    pub fn set_web_page_width(&mut self, width: u32) -> &mut Self {
        self.request.set_int("web_page_width", i64::from(width));
        self
    }

    /// Height of the browser viewport in pixels; 0 auto-detects.
    pub fn set_web_page_height(&mut self, height: u32) -> &mut Self {
        self.request.set_int("web_page_height", i64::from(height));
        self
    }

    /// Seconds to wait at least before rendering. Default 1.
    pub fn set_min_load_time(&mut self, seconds: u32) -> &mut Self {
        self.request.set_int("min_load_time", i64::from(seconds));
        self
    }

    /// Seconds to wait at most for the page to load. Default 30.
    pub fn set_max_load_time(&mut self, seconds: u32) -> &mut Self {
        self.request.set_int("max_load_time", i64::from(seconds));
        self
    }

    /// Uses the print CSS media type.
    pub fn set_use_css_print(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("use_css_print", enabled);
        self
    }

    /// PDF background color.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] unless the color is `#RRGGBB`.
    pub fn set_background_color(&mut self, color: &str) -> Result<&mut Self, ApiError> {
        ensure_color(color)?;
        self.request.set("background_color", color);
        Ok(self)
    }

    pub fn set_draw_html_background(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("draw_html_background", enabled);
        self
    }

    pub fn set_disable_javascript(&mut self, disabled: bool) -> &mut Self {
        self.request.set_bool("disable_javascript", disabled);
        self
    }

    pub fn set_disable_internal_links(&mut self, disabled: bool) -> &mut Self {
        self.request.set_bool("disable_internal_links", disabled);
        self
    }

    pub fn set_disable_external_links(&mut self, disabled: bool) -> &mut Self {
        self.request.set_bool("disable_external_links", disabled);
        self
    }

    /// Renders whatever loaded when the max load time elapses instead of failing.
    pub fn set_render_on_timeout(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("render_on_timeout", enabled);
        self
    }

    /// Avoids breaking images between pages.
    pub fn set_keep_images_together(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("keep_images_together", enabled);
        self
    }

    pub fn set_skip_decoding(&mut self, skip: bool) -> &mut Self {
        self.request.set_bool("skip_decoding", skip);
        self
    }

    pub fn set_scale_images(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("scale_images", enabled);
        self
    }

    /// Produces a single page PDF as tall as the content.
    pub fn set_single_page_pdf(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("single_page_pdf", enabled);
        self
    }

    pub fn set_page_breaks_enhanced_algorithm(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("page_breaks_enhanced_algorithm", enabled);
        self
    }

    /// When `Manual`, the page triggers the conversion from javascript.
    pub fn set_startup_mode(&mut self, mode: StartupMode) -> &mut Self {
        self.request.set("startup_mode", mode.as_str());
        self
    }

    /// Cookies sent with the page request, as `name=value` pairs.
    pub fn set_cookies<I, K, V>(&mut self, cookies: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let serialized: String = cookies
            .into_iter()
            .map(|(name, value)| format!("{}={}&", name.as_ref(), encode_value(value.as_ref())))
            .collect();
        self.request.set("cookies_string", serialized);
        self
    }

    // ==================== Security ====================

    pub fn set_user_password(&mut self, password: &str) -> &mut Self {
        self.request.set("user_password", password);
        self
    }

    pub fn set_owner_password(&mut self, password: &str) -> &mut Self {
        self.request.set("owner_password", password);
        self
    }

    // ==================== Document information ====================

    pub fn set_doc_title(&mut self, title: &str) -> &mut Self {
        self.request.set("doc_title", title);
        self
    }

    pub fn set_doc_subject(&mut self, subject: &str) -> &mut Self {
        self.request.set("doc_subject", subject);
        self
    }

    pub fn set_doc_keywords(&mut self, keywords: &str) -> &mut Self {
        self.request.set("doc_keywords", keywords);
        self
    }

    pub fn set_doc_author(&mut self, author: &str) -> &mut Self {
        self.request.set("doc_author", author);
        self
    }

    pub fn set_doc_add_creation_date(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("doc_add_creation_date", enabled);
        self
    }

    // ==================== Viewer preferences ====================

    pub fn set_viewer_page_layout(&mut self, layout: PageLayout) -> &mut Self {
        self.request.set_int("viewer_page_layout", layout.value());
        self
    }

    pub fn set_viewer_page_mode(&mut self, mode: PageMode) -> &mut Self {
        self.request.set_int("viewer_page_mode", mode.value());
        self
    }

    pub fn set_viewer_center_window(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("viewer_center_window", enabled);
        self
    }

    pub fn set_viewer_display_doc_title(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("viewer_display_doc_title", enabled);
        self
    }

    pub fn set_viewer_fit_window(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("viewer_fit_window", enabled);
        self
    }

    pub fn set_viewer_hide_menu_bar(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("viewer_hide_menu_bar", enabled);
        self
    }

    pub fn set_viewer_hide_toolbar(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("viewer_hide_toolbar", enabled);
        self
    }

    pub fn set_viewer_hide_window_ui(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("viewer_hide_window_ui", enabled);
        self
    }

    // ==================== Header ====================

    pub fn set_show_header(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("show_header", enabled);
        self
    }

    /// Header height in points. Default 50.
    pub fn set_header_height(&mut self, height: u32) -> &mut Self {
        self.request.set_int("header_height", i64::from(height));
        self
    }

    /// Web page rendered in the header.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for non-http(s) or local URLs.
    pub fn set_header_url(&mut self, url: &str) -> Result<&mut Self, ApiError> {
        ensure_public_url(url, UrlRole::Template)?;
        self.request.set("header_url", url);
        Ok(self)
    }

    /// Raw HTML rendered in the header.
    pub fn set_header_html(&mut self, html: &str) -> &mut Self {
        self.request.set("header_html", html);
        self
    }

    /// Base URL for relative paths in the header HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for non-http(s) or local URLs.
    pub fn set_header_base_url(&mut self, base_url: &str) -> Result<&mut Self, ApiError> {
        ensure_public_url(base_url, UrlRole::BaseUrl)?;
        self.request.set("header_base_url", base_url);
        Ok(self)
    }

    pub fn set_header_display_on_first_page(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("header_display_on_first_page", enabled);
        self
    }

    pub fn set_header_display_on_odd_pages(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("header_display_on_odd_pages", enabled);
        self
    }

    pub fn set_header_display_on_even_pages(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("header_display_on_even_pages", enabled);
        self
    }

    pub fn set_header_web_page_width(&mut self, width: u32) -> &mut Self {
        self.request.set_int("header_web_page_width", i64::from(width));
        self
    }

    pub fn set_header_web_page_height(&mut self, height: u32) -> &mut Self {
        self.request.set_int("header_web_page_height", i64::from(height));
        self
    }

    // ==================== Footer ====================

    pub fn set_show_footer(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("show_footer", enabled);
        self
    }

    /// Footer height in points. Default 50.
    pub fn set_footer_height(&mut self, height: u32) -> &mut Self {
        self.request.set_int("footer_height", i64::from(height));
        self
    }

    /// Web page rendered in the footer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for non-http(s) or local URLs.
    pub fn set_footer_url(&mut self, url: &str) -> Result<&mut Self, ApiError> {
        ensure_public_url(url, UrlRole::Template)?;
        self.request.set("footer_url", url);
        Ok(self)
    }

    /// Raw HTML rendered in the footer.
    pub fn set_footer_html(&mut self, html: &str) -> &mut Self {
        self.request.set("footer_html", html);
        self
    }

    /// Base URL for relative paths in the footer HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for non-http(s) or local URLs.
    pub fn set_footer_base_url(&mut self, base_url: &str) -> Result<&mut Self, ApiError> {
        ensure_public_url(base_url, UrlRole::BaseUrl)?;
        self.request.set("footer_base_url", base_url);
        Ok(self)
    }

    pub fn set_footer_display_on_first_page(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("footer_display_on_first_page", enabled);
        self
    }

    pub fn set_footer_display_on_odd_pages(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("footer_display_on_odd_pages", enabled);
        self
    }

    pub fn set_footer_display_on_even_pages(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("footer_display_on_even_pages", enabled);
        self
    }

    /// Adds a special footer on the last page.
    pub fn set_footer_display_on_last_page(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("footer_display_on_last_page", enabled);
        self
    }

    pub fn set_footer_web_page_width(&mut self, width: u32) -> &mut Self {
        self.request.set_int("footer_web_page_width", i64::from(width));
        self
    }

    pub fn set_footer_web_page_height(&mut self, height: u32) -> &mut Self {
        self.request.set_int("footer_web_page_height", i64::from(height));
        self
    }

    // ==================== Page numbers ====================

    /// Shows page numbers in the footer.
    pub fn set_page_numbers(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("page_numbers", enabled);
        self
    }

    /// Number of the first page. Default 1.
    pub fn set_page_numbers_first(&mut self, first: i32) -> &mut Self {
        self.request.set_int("page_numbers_first", i64::from(first));
        self
    }

    /// Offset added to the total page count. Default 0.
    pub fn set_page_numbers_offset(&mut self, offset: i32) -> &mut Self {
        self.request.set_int("page_numbers_offset", i64::from(offset));
        self
    }

    /// Template such as `Page: {page_number} of {total_pages}`.
    pub fn set_page_numbers_template(&mut self, template: &str) -> &mut Self {
        self.request.set("page_numbers_template", template);
        self
    }

    pub fn set_page_numbers_font_name(&mut self, font_name: &str) -> &mut Self {
        self.request.set("page_numbers_font_name", font_name);
        self
    }

    /// Font size in points. Default 10.
    pub fn set_page_numbers_font_size(&mut self, size: u32) -> &mut Self {
        self.request.set_int("page_numbers_font_size", i64::from(size));
        self
    }

    pub fn set_page_numbers_alignment(&mut self, alignment: PageNumbersAlignment) -> &mut Self {
        self.request.set_int("page_numbers_alignment", alignment.value());
        self
    }

    /// Page numbers color.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] unless the color is `#RRGGBB`.
    pub fn set_page_numbers_color(&mut self, color: &str) -> Result<&mut Self, ApiError> {
        ensure_color(color)?;
        self.request.set("page_numbers_color", color);
        Ok(self)
    }

    /// Vertical position of page numbers in the footer, in points.
    pub fn set_page_numbers_pos_y(&mut self, position: u32) -> &mut Self {
        self.request.set_int("page_numbers_pos_y", i64::from(position));
        self
    }

    // ==================== Selectors ====================

    /// CSS selectors of elements that become PDF bookmarks.
    pub fn set_pdf_bookmarks_selectors(&mut self, selectors: &str) -> &mut Self {
        self.request.set("pdf_bookmarks_selectors", selectors);
        self
    }

    /// CSS selectors of elements excluded from the PDF.
    pub fn set_pdf_hide_elements(&mut self, selectors: &str) -> &mut Self {
        self.request.set("pdf_hide_elements", selectors);
        self
    }

    /// Converts only the element with this id.
    pub fn set_pdf_show_only_element_id(&mut self, element_id: &str) -> &mut Self {
        self.request.set("pdf_show_only_element_id", element_id);
        self
    }

    /// CSS selectors of elements whose PDF locations are reported back.
    ///
    /// See [`web_elements`](Self::web_elements).
    pub fn set_pdf_web_elements_selectors(&mut self, selectors: &str) -> &mut Self {
        self.request.set(params::WEB_ELEMENTS_SELECTORS, selectors);
        self
    }

    // ==================== Escape hatches ====================

    /// Sets a parameter not covered by a dedicated setter.
    pub fn set_custom_parameter(&mut self, name: &str, value: &str) -> &mut Self {
        self.request.set(name, value);
        self
    }

    /// Sets a custom HTTP header.
    pub fn set_header(&mut self, name: &str, value: &str) -> &mut Self {
        self.request.set_header(name, value);
        self
    }
}
