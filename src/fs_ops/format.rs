//! Read/write encodings.
//! - `text`: UTF-8 in, UTF-8 out.
//! - `base64`: a base64 payload (optionally a `data:...;base64,` URL) is decoded to raw
//!   bytes on write; reads come back as a data URL with a MIME type guessed from the
//!   file extension.

use base64::prelude::*;
use std::fmt;
use std::str::FromStr;

use crate::errors::{FsError, Result};
use crate::path::extname;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    #[default]
    Text,
    Base64,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileFormat::Text => "text",
            FileFormat::Base64 => "base64",
        })
    }
}

impl FromStr for FileFormat {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(FileFormat::Text),
            "base64" => Ok(FileFormat::Base64),
            _ => Err(FsError::InvalidFormat(s.to_string())),
        }
    }
}

/// Turn caller data into the bytes handed to the backend.
pub(crate) fn encode(data: &str, format: FileFormat) -> Result<Vec<u8>> {
    match format {
        FileFormat::Text => Ok(data.as_bytes().to_vec()),
        FileFormat::Base64 => BASE64_STANDARD
            .decode(strip_data_url_prefix(data).trim())
            .map_err(|e| FsError::InvalidData(format!("base64 payload: {e}"))),
    }
}

/// Turn stored bytes back into caller data. `name` picks the data URL MIME type.
pub(crate) fn decode(bytes: Vec<u8>, format: FileFormat, name: &str) -> Result<String> {
    match format {
        FileFormat::Text => String::from_utf8(bytes)
            .map_err(|e| FsError::InvalidData(format!("'{name}' is not valid UTF-8: {e}"))),
        FileFormat::Base64 => Ok(format!(
            "data:{};base64,{}",
            mime_for(name),
            BASE64_STANDARD.encode(bytes)
        )),
    }
}

/// Drop a leading `data:<anything>;base64,` header (first line only).
fn strip_data_url_prefix(data: &str) -> &str {
    if !data.starts_with("data:") {
        return data;
    }
    let header = data.split('\n').next().unwrap_or(data);
    match header.rfind(";base64,") {
        Some(i) => &data[i + ";base64,".len()..],
        None => data,
    }
}

fn mime_for(name: &str) -> &'static str {
    match extname(name).to_ascii_lowercase().as_str() {
        ".txt" | ".log" => "text/plain",
        ".md" => "text/markdown",
        ".html" | ".htm" => "text/html",
        ".css" => "text/css",
        ".csv" => "text/csv",
        ".js" => "text/javascript",
        ".json" => "application/json",
        ".xml" => "application/xml",
        ".pdf" => "application/pdf",
        ".zip" => "application/zip",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        ".svg" => "image/svg+xml",
        ".mp3" => "audio/mpeg",
        ".mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}
