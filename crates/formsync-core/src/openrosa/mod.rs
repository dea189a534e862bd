//! OpenRosa server transport: form list, manifests, and file bodies.
//!
//! Uses the curl crate (libcurl). All calls block the current thread; run
//! them inside `spawn_blocking` from async code.

mod error;
mod transfer;

use anyhow::Context;
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::config::FormsyncConfig;
use crate::form_list::{self, FormListEntry};
use crate::manifest::{self, MediaFile};
use crate::retry::{run_with_retry, RetryPolicy};

pub use error::FetchError;
pub use transfer::Downloaded;

/// Client for one OpenRosa server.
#[derive(Debug, Clone)]
pub struct ServerClient {
    base_url: String,
    credentials: Option<(String, String)>,
    connect_timeout: Duration,
    timeout: Duration,
    retry: RetryPolicy,
}

impl ServerClient {
    /// Client for `server_url` with default timeouts and retry policy.
    pub fn new(server_url: &str) -> Result<Self, FetchError> {
        let trimmed = server_url.trim().trim_end_matches('/');
        let parsed =
            Url::parse(trimmed).map_err(|_| FetchError::InvalidUrl(server_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(server_url.to_string()));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
            credentials: None,
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(300),
            retry: RetryPolicy::default(),
        })
    }

    /// Build from config; `server_override` (e.g. `--server`) wins over `server_url`.
    pub fn from_config(cfg: &FormsyncConfig, server_override: Option<&str>) -> anyhow::Result<Self> {
        let server = server_override
            .or(cfg.server_url.as_deref())
            .context("no server configured: pass --server or set server_url in config.toml")?;
        let mut client = Self::new(server)?
            .with_timeouts(
                Duration::from_secs(cfg.connect_timeout_secs),
                Duration::from_secs(cfg.timeout_secs),
            )
            .with_retry_policy(cfg.retry_policy());
        if let Some(user) = &cfg.username {
            client = client.with_credentials(user, cfg.password.as_deref().unwrap_or(""));
        }
        Ok(client)
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some((username.to_string(), password.to_string()));
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<server>/formList`.
    pub fn form_list_url(&self) -> String {
        format!("{}/formList", self.base_url)
    }

    /// Fetch and parse the form list. Relative URLs in entries are resolved
    /// against the form list URL.
    pub fn fetch_form_list(&self) -> Result<Vec<FormListEntry>, FetchError> {
        let url = self.form_list_url();
        let (body, response) = run_with_retry(&self.retry, |_| self.get_text(&url))?;
        if response.header("X-OpenRosa-Version").is_none() {
            tracing::warn!(%url, "response has no X-OpenRosa-Version header");
        }

        let mut entries = form_list::parse_form_list(&body)?;
        for entry in &mut entries {
            entry.download_url = entry.download_url.take().map(|u| resolve_url(&url, u));
            entry.manifest_url = entry.manifest_url.take().map(|u| resolve_url(&url, u));
        }
        tracing::info!(%url, count = entries.len(), "fetched form list");
        Ok(entries)
    }

    /// Fetch and parse a form manifest.
    pub fn fetch_manifest(&self, url: &str) -> Result<Vec<MediaFile>, FetchError> {
        let (body, _) = run_with_retry(&self.retry, |_| self.get_text(url))?;
        let mut files = manifest::parse_manifest(&body)?;
        for file in &mut files {
            file.download_url = file.download_url.take().map(|u| resolve_url(url, u));
        }
        Ok(files)
    }

    /// Download `url` into `dest`, truncating it on every attempt.
    pub fn download_to(&self, url: &str, dest: &Path) -> Result<Downloaded, FetchError> {
        run_with_retry(&self.retry, |attempt| {
            if attempt > 1 {
                tracing::debug!(%url, attempt, "restarting download");
            }
            let mut file = File::create(dest)?;
            let downloaded = self.stream_to(url, &mut file)?;
            file.sync_all()?;
            Ok(downloaded)
        })
    }
}

/// Resolve `raw` against `base`; absolute URLs pass through unchanged.
fn resolve_url(base: &str, raw: String) -> String {
    match Url::parse(base).and_then(|b| b.join(&raw)) {
        Ok(u) => u.to_string(),
        Err(_) => raw,
    }
}
