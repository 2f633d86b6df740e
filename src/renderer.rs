//! # Response Renderer
//!
//! Prints the status line, the headers (first value per name), a blank line
//! and the body re-indented as JSON.

use std::io::Write;

use hyper::ext::ReasonPhrase;
use reqwest::blocking::Response;
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Version};
use serde_json::Value;

use crate::error::{HttpreqError, Result};

/// What happened to the response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyRendering {
    /// Body parsed as JSON and was printed indented
    Json,
    /// Body was not JSON; the parse error was reported instead
    NotJson { error: String },
}

/// Writes a response to any [`Write`] sink
pub struct Renderer<W: Write> {
    out: W,
    raw_fallback: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            raw_fallback: false,
        }
    }

    /// Print the raw body after the parse error instead of suppressing it
    pub fn with_raw_fallback(mut self, raw_fallback: bool) -> Self {
        self.raw_fallback = raw_fallback;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render the whole response, consuming its body
    pub fn render(&mut self, response: Response) -> Result<BodyRendering> {
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned());
        self.write_head(
            response.version(),
            response.status(),
            reason.as_deref(),
            response.headers(),
        )?;

        let body = response.bytes().map_err(HttpreqError::BodyRead)?;
        tracing::debug!(bytes = body.len(), "read response body");

        self.write_body(&body)
    }

    pub fn write_head(
        &mut self,
        version: Version,
        status: StatusCode,
        reason: Option<&str>,
        headers: &HeaderMap,
    ) -> Result<()> {
        writeln!(self.out, "{}", status_line(version, status, reason))?;
        for name in headers.keys() {
            if let Some(value) = headers.get(name) {
                writeln!(
                    self.out,
                    "{}: {}",
                    canonical_header_name(name.as_str()),
                    String::from_utf8_lossy(value.as_bytes())
                )?;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    pub fn write_body(&mut self, body: &[u8]) -> Result<BodyRendering> {
        match pretty_json(body) {
            Ok(pretty) => {
                writeln!(self.out, "{pretty}")?;
                Ok(BodyRendering::Json)
            }
            Err(e) => {
                tracing::warn!("response body is not JSON: {e}");
                writeln!(self.out, "Error parsing JSON response body: {e}")?;
                if self.raw_fallback {
                    writeln!(self.out, "{}", String::from_utf8_lossy(body))?;
                }
                Ok(BodyRendering::NotJson {
                    error: e.to_string(),
                })
            }
        }
    }
}

/// `HTTP/1.1 200 OK`. `reason` is the phrase the server sent; the canonical
/// phrase is used when it sent none.
pub fn status_line(version: Version, status: StatusCode, reason: Option<&str>) -> String {
    let version = match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/1.1",
    };
    match reason.or_else(|| status.canonical_reason()) {
        Some(reason) => format!("{version} {} {reason}", status.as_u16()),
        None => format!("{version} {}", status.as_u16()),
    }
}

/// `content-type` -> `Content-Type`
pub fn canonical_header_name(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            canonical.extend(c.to_uppercase());
        } else {
            canonical.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    canonical
}

/// Decode any JSON value and re-encode it with two-space indentation
pub fn pretty_json(body: &[u8]) -> std::result::Result<String, serde_json::Error> {
    let value: Value = serde_json::from_slice(body)?;
    serde_json::to_string_pretty(&value)
}
