//! Out-of-band result metadata carried in response headers.
//!
//! The service reports the page count and job id in single headers, and the
//! web element map as Base64 JSON split across numbered headers because of
//! per-header size limits.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::HeaderMap;
use tracing::{debug, warn};

use super::constants::{
    HEADER_JOB_ID, HEADER_PAGES, HEADER_WEB_ELEMENTS_CHUNK_PREFIX, HEADER_WEB_ELEMENTS_COUNT,
};
use super::error::ApiError;
use super::model::WebElement;

/// Metadata extracted from one response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseMetadata {
    /// Page count, 0 when absent or unparsable.
    pub page_count: u32,
    /// Job id, `None` when absent or empty.
    pub job_id: Option<String>,
    /// Web elements, `None` when not delivered or not decodable.
    pub web_elements: Option<Vec<WebElement>>,
}

impl ResponseMetadata {
    /// Extracts all metadata from `headers`. Never fails.
    ///
    /// A malformed web element payload is logged and omitted; the primary
    /// document of the response stays valid.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let web_elements = match decode_web_elements(headers) {
            Ok(elements) => elements,
            Err(error) => {
                warn!(error = %error, "ignoring malformed web elements metadata");
                None
            }
        };
        Self {
            page_count: page_count(headers),
            job_id: job_id(headers),
            web_elements,
        }
    }
}

/// Reads the page count header; absence or parse failure yields 0.
#[must_use]
pub fn page_count(headers: &HeaderMap) -> u32 {
    header_str(headers, HEADER_PAGES)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

/// Reads the job id header; absence or an empty value yields `None`.
#[must_use]
pub fn job_id(headers: &HeaderMap) -> Option<String> {
    header_str(headers, HEADER_JOB_ID)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Reassembles and decodes the chunked web element headers.
///
/// Returns `Ok(None)` when the count header is absent.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the count is invalid, a chunk is
/// missing, or the Base64/UTF-8/JSON decoding fails.
pub fn decode_web_elements(headers: &HeaderMap) -> Result<Option<Vec<WebElement>>, ApiError> {
    let Some(count) = header_str(headers, HEADER_WEB_ELEMENTS_COUNT) else {
        return Ok(None);
    };
    let count: usize = count
        .trim()
        .parse()
        .map_err(|e| ApiError::decode("web elements header count", e))?;

    let mut encoded = String::new();
    for index in 1..=count {
        let name = format!("{HEADER_WEB_ELEMENTS_CHUNK_PREFIX}{index}");
        let chunk = header_str(headers, &name).ok_or_else(|| {
            ApiError::decode("web elements", format!("missing header chunk {index} of {count}"))
        })?;
        encoded.push_str(chunk.trim());
    }
    debug!(chunks = count, encoded_len = encoded.len(), "reassembled web elements headers");

    parse_web_elements_base64(&encoded).map(Some)
}

/// Decodes a Base64 JSON web element document.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] on malformed Base64, UTF-8 or JSON.
pub fn parse_web_elements_base64(encoded: &str) -> Result<Vec<WebElement>, ApiError> {
    let raw = STANDARD
        .decode(encoded)
        .map_err(|e| ApiError::decode("web elements", e))?;
    let json = String::from_utf8(raw).map_err(|e| ApiError::decode("web elements", e))?;
    parse_web_elements_json(&json)
}

/// Parses a JSON array of web elements.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] on malformed JSON.
pub fn parse_web_elements_json(json: &str) -> Result<Vec<WebElement>, ApiError> {
    // The service answers `null` when nothing matched.
    let elements: Option<Vec<WebElement>> =
        serde_json::from_str(json).map_err(|e| ApiError::decode("web elements", e))?;
    Ok(elements.unwrap_or_default())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    fn chunked_headers(json: &str, chunks: usize) -> HeaderMap {
        let encoded = STANDARD.encode(json);
        let size = encoded.len().div_ceil(chunks);
        let mut pairs: Vec<(String, String)> = encoded
            .as_bytes()
            .chunks(size)
            .enumerate()
            .map(|(i, c)| {
                (
                    format!("{HEADER_WEB_ELEMENTS_CHUNK_PREFIX}{}", i + 1),
                    String::from_utf8(c.to_vec()).unwrap(),
                )
            })
            .collect();
        pairs.push((HEADER_WEB_ELEMENTS_COUNT.to_string(), pairs.len().to_string()));
        let refs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        headers(&refs)
    }

    #[test]
    fn test_page_count_parsed() {
        assert_eq!(page_count(&headers(&[(HEADER_PAGES, "7")])), 7);
    }

    #[test]
    fn test_page_count_absent_or_invalid_is_zero() {
        assert_eq!(page_count(&HeaderMap::new()), 0);
        assert_eq!(page_count(&headers(&[(HEADER_PAGES, "seven")])), 0);
        assert_eq!(page_count(&headers(&[(HEADER_PAGES, "-1")])), 0);
    }

    #[test]
    fn test_job_id_present_and_empty() {
        assert_eq!(job_id(&headers(&[(HEADER_JOB_ID, "abc")])), Some("abc".to_string()));
        assert_eq!(job_id(&headers(&[(HEADER_JOB_ID, "")])), None);
        assert_eq!(job_id(&HeaderMap::new()), None);
    }

    #[test]
    fn test_web_elements_three_chunks() {
        let json = r#"[{"htmlElementId":"h1","htmlElementTagName":"H1","pdfRectangles":[{"pageIndex":0,"rectangle":{"x":10,"y":20,"width":300,"height":40}}]}]"#;
        let map = chunked_headers(json, 3);
        assert_eq!(map.get(HEADER_WEB_ELEMENTS_COUNT).unwrap(), "3");

        let elements = decode_web_elements(&map).unwrap().unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].html_element_id.as_deref(), Some("h1"));
    }

    #[test]
    fn test_web_elements_absent_is_none() {
        assert_eq!(decode_web_elements(&HeaderMap::new()).unwrap(), None);
    }

    #[test]
    fn test_web_elements_missing_chunk_is_decode_error() {
        let map = headers(&[
            (HEADER_WEB_ELEMENTS_COUNT, "2"),
            ("selectpdf-api-web-elements-header-1", "W10="),
        ]);
        let error = decode_web_elements(&map).unwrap_err();
        assert!(matches!(error, ApiError::Decode { .. }), "got {error:?}");
    }

    #[test]
    fn test_web_elements_bad_base64_is_decode_error() {
        let map = headers(&[
            (HEADER_WEB_ELEMENTS_COUNT, "1"),
            ("selectpdf-api-web-elements-header-1", "!!!not-base64!!!"),
        ]);
        assert!(decode_web_elements(&map).is_err());
    }

    #[test]
    fn test_from_headers_tolerates_bad_web_elements() {
        let map = headers(&[
            (HEADER_PAGES, "4"),
            (HEADER_WEB_ELEMENTS_COUNT, "1"),
            ("selectpdf-api-web-elements-header-1", "bm90IGpzb24="),
        ]);
        let metadata = ResponseMetadata::from_headers(&map);
        assert_eq!(metadata.page_count, 4);
        assert_eq!(metadata.web_elements, None);
    }

    #[test]
    fn test_parse_web_elements_json_null_is_empty() {
        assert!(parse_web_elements_json("null").unwrap().is_empty());
    }
}
