//! Where input documents come from: a local file or an `http(s)` URL.
//!
//! URLs are fetched with a blocking `reqwest` client. There is no retry; a
//! failed fetch is reported to the caller, who turns it into an error panel.
//!
//! ```no_run
//! # use house_price_maps::source::Source;
//! let src = Source::from("https://example.org/england.json");
//! let text = src.read_to_string()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(s.to_string())
        } else {
            Source::Path(PathBuf::from(s))
        }
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        Source::from(s.as_str())
    }
}

impl From<PathBuf> for Source {
    fn from(p: PathBuf) -> Self {
        Source::Path(p)
    }
}

impl From<&Path> for Source {
    fn from(p: &Path) -> Self {
        Source::Path(p.to_path_buf())
    }
}

impl From<Source> for String {
    fn from(s: Source) -> Self {
        s.to_string()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Url(u) => f.write_str(u),
        }
    }
}

fn http_client() -> Result<&'static HttpClient> {
    static CLIENT: OnceLock<HttpClient> = OnceLock::new();
    if let Some(c) = CLIENT.get() {
        return Ok(c);
    }
    let client = HttpClient::builder()
        .timeout(Duration::from_secs(30)) // total request timeout
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(5))
        .user_agent(concat!("house_price_maps/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("build http client")?;
    Ok(CLIENT.get_or_init(|| client))
}

impl Source {
    /// Lower-cased file extension of the path or URL, ignoring any query string.
    pub fn extension(&self) -> Option<String> {
        let tail = match self {
            Source::Path(p) => return p.extension().and_then(|e| e.to_str()).map(str::to_lowercase),
            Source::Url(u) => u.split(['?', '#']).next().unwrap_or(u),
        };
        let file = tail.rsplit('/').next()?;
        let (_, ext) = file.rsplit_once('.')?;
        Some(ext.to_lowercase())
    }

    pub fn read_to_string(&self) -> Result<String> {
        match self {
            Source::Path(p) => {
                let text = fs::read_to_string(p)
                    .with_context(|| format!("Failed to read {}", p.display()))?;
                // byte-order mark, as left by spreadsheet exports
                Ok(match text.strip_prefix('\u{feff}') {
                    Some(rest) => rest.to_string(),
                    None => text,
                })
            }
            Source::Url(u) => {
                let resp = http_client()?
                    .get(u)
                    .send()
                    .with_context(|| format!("GET {u}"))?;
                if !resp.status().is_success() {
                    bail!("GET {u} failed with HTTP {}", resp.status());
                }
                resp.text().with_context(|| format!("read body of {u}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_and_paths_are_told_apart() {
        assert!(matches!(Source::from("https://x.org/a.json"), Source::Url(_)));
        assert!(matches!(Source::from("HTTP://x.org/a.json"), Source::Url(_)));
        assert!(matches!(Source::from("data/a.json"), Source::Path(_)));
        assert_eq!(Source::from("data/a.json").to_string(), "data/a.json");
    }

    #[test]
    fn extension_ignores_query() {
        assert_eq!(Source::from("x/prices.CSV").extension().as_deref(), Some("csv"));
        assert_eq!(
            Source::from("https://x.org/d/prices.csv?raw=1").extension().as_deref(),
            Some("csv")
        );
        assert_eq!(Source::from("https://x.org/data").extension(), None);
    }

    #[test]
    fn missing_file_is_an_error_with_path() {
        let err = Source::from("definitely/not/here.json").read_to_string().unwrap_err();
        assert!(format!("{err:#}").contains("definitely/not/here.json"));
    }
}
