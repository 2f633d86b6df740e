//! # httpreq - Minimal Command-Line HTTP Client
//!
//! Sends one HTTP request built from command-line flags and prints the
//! status line, the response headers and the body pretty-printed as JSON.
//!
//! ```text
//! CommandLineArgs ──▶ RequestDescriptor ──▶ Executor ──▶ Renderer ──▶ stdout
//!   (cmd_args)          (request)           (executor)   (renderer)
//! ```
//!
//! Every stage fails fast with an [`HttpreqError`]; nothing is retried.

pub mod cmd_args;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod renderer;
pub mod request;

use std::io::Write;

pub use cmd_args::CommandLineArgs;
pub use error::{HttpreqError, Result};
pub use executor::Executor;
pub use renderer::{BodyRendering, Renderer};
pub use request::{AuthCredentials, HeaderEntry, RequestDescriptor};

/// Validate `args`, send the request and render the response to `out`
pub fn run<W: Write>(args: &CommandLineArgs, out: W) -> Result<BodyRendering> {
    let descriptor = RequestDescriptor::from_args(args)?;
    let executor = Executor::new(&descriptor)?;
    let response = executor.send(descriptor)?;

    let mut renderer = Renderer::new(out).with_raw_fallback(args.raw());
    let outcome = renderer.render(response)?;
    renderer.into_inner().flush()?;
    Ok(outcome)
}
