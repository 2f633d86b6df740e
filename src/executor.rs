//! # Request Executor
//!
//! Sends one request described by a [`RequestDescriptor`] with a blocking
//! reqwest client. No retries.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::blocking::{Body, Client, Request, Response};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::redirect::Policy;
use reqwest::Method;

use crate::config::REQUEST_TIMEOUT;
use crate::error::{HttpreqError, Result};
use crate::request::{AuthCredentials, RequestDescriptor};

/// Client configured for a single exchange
pub struct Executor {
    client: Client,
}

impl Executor {
    /// Build the client for `descriptor`'s redirect policy
    pub fn new(descriptor: &RequestDescriptor) -> Result<Self> {
        Self::with_redirects(descriptor.follow_redirects())
    }

    pub fn with_redirects(follow_redirects: bool) -> Result<Self> {
        Self::with_timeout(follow_redirects, REQUEST_TIMEOUT)
    }

    /// `timeout` bounds the whole exchange: connect, headers and body read
    pub fn with_timeout(follow_redirects: bool, timeout: Duration) -> Result<Self> {
        let policy = if follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        tracing::debug!(follow_redirects, ?timeout, "creating HTTP client");
        let client = Client::builder()
            .timeout(timeout)
            .redirect(policy)
            .build()
            .map_err(HttpreqError::Client)?;

        Ok(Self { client })
    }

    /// Turn the descriptor into a request. Explicit headers go on first, then
    /// `Authorization` from credentials, so the credentials win.
    pub fn build_request(&self, descriptor: RequestDescriptor) -> Result<Request> {
        let parts = descriptor.into_parts();

        let method = Method::from_bytes(parts.method.as_bytes())
            .map_err(|_| HttpreqError::InvalidMethod(parts.method.clone()))?;

        let mut request = self
            .client
            .request(method, parts.url)
            .build()
            .map_err(HttpreqError::Transport)?;

        let headers = request.headers_mut();
        for (name, value) in parts.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        if let Some(auth) = &parts.auth {
            headers.insert(AUTHORIZATION, basic_auth_header(auth)?);
        }

        if let Some(body) = parts.body {
            tracing::debug!(path = %body.path().display(), "streaming request body from file");
            *request.body_mut() = Some(Body::from(body.into_file()));
        }

        Ok(request)
    }

    /// Send the request and return the response with its body still unread
    pub fn send(&self, descriptor: RequestDescriptor) -> Result<Response> {
        let request = self.build_request(descriptor)?;
        tracing::info!(method = %request.method(), url = %request.url(), "sending request");

        let response = self
            .client
            .execute(request)
            .map_err(HttpreqError::Transport)?;

        tracing::info!(status = %response.status(), version = ?response.version(), "received response");
        Ok(response)
    }
}

/// `Basic base64(username:password)`, marked sensitive so it is never logged
pub fn basic_auth_header(auth: &AuthCredentials) -> Result<HeaderValue> {
    let encoded = STANDARD.encode(format!("{}:{}", auth.username(), auth.password()));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|_| HttpreqError::InvalidAuth(format!("{}:***", auth.username())))?;
    value.set_sensitive(true);
    Ok(value)
}
