use std::ffi::OsString;

pub use clap::Parser;
use clap::{builder::BoolishValueParser, CommandFactory};

/// Flags that may be written Go-style with a single dash (`-url`, `-follow=true`)
const LONG_FLAGS: &[&str] = &["url", "method", "file", "follow", "auth", "raw", "verbose"];

const USAGE: &str = "httpreq -url <url> [options] [NAME:VALUE]...";

#[derive(Parser, Debug)]
#[command(name = "httpreq", version, about, long_about = None, override_usage = USAGE)]
struct ClapArgs {
    /// The URL to make the request to
    #[clap(long, allow_hyphen_values = true, default_value = "", hide_default_value = true)]
    url: String,

    /// The HTTP method to use
    #[clap(long, allow_hyphen_values = true, default_value = crate::config::DEFAULT_METHOD)]
    method: String,

    /// The name of a file to use as the request body
    #[clap(long, allow_hyphen_values = true, default_value = "", hide_default_value = true)]
    file: String,

    /// Whether to follow redirects
    #[clap(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    follow: bool,

    /// The username and password for basic authentication in the format 'username:password'
    #[clap(long, allow_hyphen_values = true, default_value = "", hide_default_value = true)]
    auth: String,

    /// Print the raw body when the response is not JSON
    #[clap(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    raw: bool,

    /// Print debug logs to stderr
    #[clap(
        short = 'v',
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    verbose: bool,

    /// Request headers
    #[clap(value_name = "NAME:VALUE")]
    headers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    url: String,
    method: String,
    file: String,
    follow: bool,
    auth: String,
    raw: bool,
    verbose: bool,
    headers: Vec<String>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            url: args.url,
            method: args.method,
            file: args.file,
            follow: args.follow,
            auth: args.auth,
            raw: args.raw,
            verbose: args.verbose,
            headers: args.headers,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::parse_from(std::env::args_os())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(normalize_single_dash_flags(itr)).into()
    }

    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::try_parse_from(normalize_single_dash_flags(itr)).map(Into::into)
    }

    /// Full usage text, listing every flag
    pub fn usage() -> String {
        ClapArgs::command().render_help().to_string()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Body file path, `None` when `-file` was not given
    pub fn file(&self) -> Option<&str> {
        Some(self.file.as_str()).filter(|f| !f.is_empty())
    }

    pub fn follow(&self) -> bool {
        self.follow
    }

    /// Raw `-auth` value, `None` when not given
    pub fn auth(&self) -> Option<&str> {
        Some(self.auth.as_str()).filter(|a| !a.is_empty())
    }

    pub fn raw(&self) -> bool {
        self.raw
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

/// Rewrites `-url x` / `-follow=true` into the `--url x` / `--follow=true` form clap expects.
///
/// Only known flag names are rewritten, and nothing after a bare `--`.
fn normalize_single_dash_flags<I, T>(itr: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut after_terminator = false;
    itr.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if after_terminator {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                after_terminator = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                    if LONG_FLAGS.contains(&name) {
                        OsString::from(format!("-{text}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}
