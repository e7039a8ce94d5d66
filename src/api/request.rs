//! Outgoing parameter, attachment and header store for one logical API call.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::constants::{bool_param, params};

/// Which wire encoding a call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `application/x-www-form-urlencoded`; attachments are ignored.
    UrlEncoded,
    /// `multipart/form-data`; parameters, files and binary blobs become parts.
    Multipart,
}

/// Form fields, attachments and custom headers accumulated for a call.
///
/// Keys are unique and the last write wins. Maps are ordered by key so the
/// encoded body is deterministic for a given store.
#[derive(Debug, Clone, Default)]
pub struct CallRequest {
    parameters: BTreeMap<String, String>,
    files: BTreeMap<String, PathBuf>,
    binary: BTreeMap<String, Vec<u8>>,
    headers: BTreeMap<String, String>,
}

impl CallRequest {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the API key.
    #[must_use]
    pub fn with_api_key(api_key: &str) -> Self {
        let mut request = Self::new();
        request.set(params::KEY, api_key);
        request
    }

    /// Sets a parameter, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Sets a boolean parameter (`True`/`False`).
    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.set(name, bool_param(value))
    }

    /// Sets a numeric parameter.
    pub fn set_int(&mut self, name: impl Into<String>, value: i64) -> &mut Self {
        self.set(name, value.to_string())
    }

    /// Removes a parameter.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.parameters.remove(name)
    }

    /// Returns a parameter value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Returns the API key parameter, or an empty string.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.get(params::KEY).unwrap_or_default()
    }

    /// Attaches a local file, read lazily when the body is encoded.
    pub fn attach_file(&mut self, field: impl Into<String>, path: impl Into<PathBuf>) -> &mut Self {
        self.files.insert(field.into(), path.into());
        self
    }

    /// Attaches an in-memory blob; the field name doubles as the filename.
    pub fn attach_bytes(&mut self, field: impl Into<String>, data: impl Into<Vec<u8>>) -> &mut Self {
        self.binary.insert(field.into(), data.into());
        self
    }

    /// Drops all file and binary attachments.
    pub fn clear_attachments(&mut self) {
        self.files.clear();
        self.binary.clear();
    }

    /// Sets a custom HTTP header, replacing any previous value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Removes a custom HTTP header.
    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        self.headers.remove(name)
    }

    /// Iterates over parameters in key order.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parameters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over file attachments in field order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// Iterates over binary attachments in field order.
    pub fn binary(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.binary.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Iterates over custom headers.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of file plus binary attachments.
    #[must_use]
    pub fn attachment_count(&self) -> usize {
        self.files.len() + self.binary.len()
    }
}
