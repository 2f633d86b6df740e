//! # Request Descriptor
//!
//! Turns validated command-line input into an immutable description of the
//! one request this process will send.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;

use crate::cmd_args::CommandLineArgs;
use crate::config::DEFAULT_METHOD;
use crate::error::{HttpreqError, Result};

/// Basic authentication credentials
#[derive(Clone, PartialEq, Eq)]
pub struct AuthCredentials {
    username: String,
    password: String,
}

impl AuthCredentials {
    /// Parse `username:password`, splitting on the first colon only
    pub fn parse(raw: &str) -> Result<Self> {
        let (username, password) = raw
            .split_once(':')
            .ok_or_else(|| HttpreqError::InvalidAuth(raw.to_string()))?;
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// Keep the password out of debug logs.
impl fmt::Debug for AuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// One `Name:Value` argument, trimmed and checked against HTTP header syntax
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    name: HeaderName,
    value: HeaderValue,
}

impl HeaderEntry {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| HttpreqError::InvalidHeader {
            header: raw.to_string(),
            reason: reason.to_string(),
        };

        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| invalid("expected 'Name: value'"))?;
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|_| invalid("invalid header name"))?;
        let value =
            HeaderValue::from_str(value.trim()).map_err(|_| invalid("invalid header value"))?;

        Ok(Self { name, value })
    }

    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    pub fn value(&self) -> &HeaderValue {
        &self.value
    }
}

/// Everything needed to send the request, built once and never mutated
#[derive(Debug)]
pub struct RequestDescriptor {
    method: String,
    url: Url,
    /// One value per name; a later header with the same name replaces an earlier one
    headers: HeaderMap,
    body: Option<BodySource>,
    follow_redirects: bool,
    auth: Option<AuthCredentials>,
}

/// Open request body file, streamed when the request is sent
#[derive(Debug)]
pub struct BodySource {
    path: PathBuf,
    file: File,
}

impl BodySource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| HttpreqError::BodyFile {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_file(self) -> File {
        self.file
    }
}

impl RequestDescriptor {
    /// A GET request to `url` with no headers, body, or credentials
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            method: DEFAULT_METHOD.to_string(),
            url: parse_url(url)?,
            headers: HeaderMap::new(),
            body: None,
            follow_redirects: false,
            auth: None,
        })
    }

    /// Validate the command line. The caller handles a missing `-url` first;
    /// an empty URL reaching here is still an error.
    pub fn from_args(args: &CommandLineArgs) -> Result<Self> {
        if args.url().is_empty() {
            return Err(HttpreqError::MissingUrl);
        }

        let mut descriptor = Self::new(args.url())?
            .with_method(args.method())
            .with_follow_redirects(args.follow());

        if let Some(path) = args.file() {
            descriptor = descriptor.with_body(BodySource::open(path)?);
        }

        if let Some(auth) = args.auth() {
            descriptor = descriptor.with_auth(AuthCredentials::parse(auth)?);
        }

        for header in args.headers() {
            descriptor = descriptor.with_header(HeaderEntry::parse(header)?);
        }

        tracing::debug!(
            method = %descriptor.method,
            url = %descriptor.url,
            headers = descriptor.headers.len(),
            body = descriptor.body.is_some(),
            follow_redirects = descriptor.follow_redirects,
            "validated request"
        );

        Ok(descriptor)
    }

    pub fn with_method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }

    pub fn with_header(mut self, entry: HeaderEntry) -> Self {
        self.headers.insert(entry.name, entry.value);
        self
    }

    pub fn with_body(mut self, body: BodySource) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    pub fn with_auth(mut self, auth: AuthCredentials) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&BodySource> {
        self.body.as_ref()
    }

    pub fn follow_redirects(&self) -> bool {
        self.follow_redirects
    }

    pub fn auth(&self) -> Option<&AuthCredentials> {
        self.auth.as_ref()
    }

    /// Split into the parts the executor consumes; the body file moves with them.
    pub(crate) fn into_parts(self) -> RequestParts {
        RequestParts {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            auth: self.auth,
        }
    }
}

pub(crate) struct RequestParts {
    pub method: String,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<BodySource>,
    pub auth: Option<AuthCredentials>,
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|source| HttpreqError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
