//! Download request: validated URL plus the downloader tool to use.

use crate::config::{CredentialMap, HostCredential};
use std::ops::Range;
use thiserror::Error;
use url::Url;

/// Why a request could not be built from the command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("No URL given.")]
    NoUrl,
    #[error("Failed to parse host and path.")]
    Unparseable,
}

/// One download request, constructed and consumed within a single invocation.
///
/// Classification and credential injection work on the URL text as given;
/// the parsed [`Url`] is only consulted for the host.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    url: String,
    parsed: Url,
    raw: RawParts,
    tool: Option<String>,
}

/// Byte ranges into the raw URL.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawParts {
    /// `user:pass@host:port`, everything between `://` and the path.
    authority: Range<usize>,
    /// From the first `/` after the authority up to `?`, `#` or the end.
    path: Range<usize>,
}

impl DownloadRequest {
    /// Validates `url` and records the optional `tool`.
    ///
    /// The URL must carry a host and an explicit path: `http://host` without
    /// any `/` after the authority is rejected even though it would normalize
    /// to `/`. No configuration is needed to validate.
    pub fn parse(url: Option<&str>, tool: Option<&str>) -> Result<Self, RequestError> {
        let url = url.filter(|u| !u.is_empty()).ok_or(RequestError::NoUrl)?;
        let parsed = Url::parse(url).map_err(|_| RequestError::Unparseable)?;

        if parsed.cannot_be_a_base() {
            return Err(RequestError::Unparseable);
        }
        let raw = raw_parts(url).ok_or(RequestError::Unparseable)?;
        match parsed.host_str() {
            Some(host) if !host.is_empty() => {}
            _ => return Err(RequestError::Unparseable),
        }

        Ok(Self {
            url: url.to_string(),
            parsed,
            raw,
            tool: tool.filter(|t| !t.is_empty()).map(str::to_string),
        })
    }

    /// URL exactly as given.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Tool named on the command line, if any.
    pub fn tool(&self) -> Option<&str> {
        self.tool.as_deref()
    }

    pub fn tool_or<'a>(&'a self, default_tool: &'a str) -> &'a str {
        self.tool().unwrap_or(default_tool)
    }

    pub fn host(&self) -> &str {
        self.parsed.host_str().unwrap_or_default()
    }

    /// Path as typed, without dot-segment removal or `\` rewriting.
    pub fn path(&self) -> &str {
        &self.url[self.raw.path.clone()]
    }

    /// Directory-like URLs (path ends in `/`) are mirrored recursively.
    pub fn is_directory(&self) -> bool {
        self.path().ends_with('/')
    }

    /// URL to hand to the downloader.
    ///
    /// When the host has an entry in `credentials` and the URL carries no
    /// userinfo of its own, `user:password@` is spliced in right before the
    /// host. The rest of the text is left as typed. Any other URL is
    /// returned untouched.
    pub fn effective_url(&self, credentials: &CredentialMap) -> String {
        let Some(cred) = credentials.get(self.host()) else {
            return self.url.clone();
        };
        let authority = &self.url[self.raw.authority.clone()];
        if authority.contains('@') {
            tracing::debug!(host = %self.host(), "URL already carries userinfo");
            return self.url.clone();
        }
        let Some(userinfo) = encoded_userinfo(cred) else {
            tracing::warn!(host = %self.host(), "cannot embed credentials in URL");
            return self.url.clone();
        };

        let at = self.raw.authority.start;
        tracing::debug!(host = %self.host(), "embedded configured credentials");
        format!("{}{}@{}", &self.url[..at], userinfo, &self.url[at..])
    }
}

/// Split the raw input into authority and path. `None` when there is no
/// `scheme://` or nothing follows the authority.
fn raw_parts(raw: &str) -> Option<RawParts> {
    let start = raw.find("://")? + "://".len();
    let end = raw[start..]
        .find(['?', '#'])
        .map_or(raw.len(), |i| start + i);
    let slash = start + raw[start..end].find('/')?;
    Some(RawParts {
        authority: start..slash,
        path: slash..end,
    })
}

/// `user:password` percent-encoded the way URL userinfo must be.
fn encoded_userinfo(cred: &HostCredential) -> Option<String> {
    let mut scratch = Url::parse("http://host/").ok()?;
    scratch.set_username(&cred.username).ok()?;
    scratch.set_password(Some(&cred.password)).ok()?;
    Some(format!(
        "{}:{}",
        scratch.username(),
        scratch.password().unwrap_or_default()
    ))
}
