use std::path::{Path, PathBuf};

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{GlassError, GlassResult};

/// Where an `image-src` value points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Local file; relative paths are resolved against a base directory.
    File(PathBuf),
    /// Remote URL. Recognized, but the core does not fetch.
    Url(String),
    /// Inline `data:` URI.
    DataUri(String),
}

impl ImageSource {
    /// Classify a locator string.
    ///
    /// - `data:...` is an inline data URI
    /// - `http://` / `https://` is a remote URL
    /// - `file://...` and anything else is a file path
    pub fn from_uri(uri: &str) -> Self {
        let uri = uri.trim();
        if starts_with_ignore_case(uri, "data:") {
            Self::DataUri(uri.to_string())
        } else if starts_with_ignore_case(uri, "http://") || starts_with_ignore_case(uri, "https://")
        {
            Self::Url(uri.to_string())
        } else if let Some(path) = uri.strip_prefix("file://") {
            Self::File(PathBuf::from(path))
        } else {
            Self::File(PathBuf::from(uri))
        }
    }

    /// Resolve the source to raw bytes.
    pub fn read_bytes(&self, base_dir: &Path) -> GlassResult<Vec<u8>> {
        match self {
            ImageSource::File(p) => {
                let path = if p.is_absolute() {
                    p.clone()
                } else {
                    base_dir.join(p)
                };
                std::fs::read(&path)
                    .with_context(|| format!("read image bytes from '{}'", path.display()))
                    .map_err(GlassError::from)
            }
            ImageSource::Url(url) => Err(GlassError::source(format!(
                "remote image sources are not fetched: '{url}'"
            ))),
            ImageSource::DataUri(uri) => decode_data_uri(uri).map(|d| d.bytes),
        }
    }
}

/// Decoded `data:` URI payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUri {
    /// Declared media type, if any.
    pub mime: Option<String>,
    /// Payload bytes.
    pub bytes: Vec<u8>,
}

/// Decode a `data:[<mime>][;base64],<payload>` URI.
pub fn decode_data_uri(uri: &str) -> GlassResult<DataUri> {
    if !starts_with_ignore_case(uri, "data:") {
        return Err(GlassError::source("not a data: URI"));
    }
    let (header, payload) = uri[5..]
        .split_once(',')
        .ok_or_else(|| GlassError::source("data: URI has no payload separator"))?;

    let mut is_base64 = false;
    let mut mime = None;
    for (idx, seg) in header.split(';').enumerate() {
        let seg = seg.trim();
        if seg.is_empty() {
            continue;
        }
        if seg.eq_ignore_ascii_case("base64") {
            is_base64 = true;
        } else if idx == 0 && seg.contains('/') {
            mime = Some(seg.to_ascii_lowercase());
        }
    }

    if let Some(m) = &mime
        && !m.starts_with("image/")
    {
        return Err(GlassError::source(format!(
            "data: URI media type '{m}' is not an image"
        )));
    }

    let bytes = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| GlassError::source(format!("invalid base64 in data: URI: {e}")))?
    } else {
        percent_decode(payload)?
    };

    Ok(DataUri { mime, bytes })
}

fn percent_decode(input: &str) -> GlassResult<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let hex = bytes
            .get(i + 1..i + 3)
            .ok_or_else(|| GlassError::source("incomplete percent-escape in data: URI"))?;
        let hi = hex_val(hex[0]);
        let lo = hex_val(hex[1]);
        match (hi, lo) {
            (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
            _ => return Err(GlassError::source("invalid percent-escape in data: URI")),
        }
        i += 3;
    }
    Ok(out)
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
