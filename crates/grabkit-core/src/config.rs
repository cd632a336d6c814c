use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Tool that receives the segmented flag set when no other tool is named.
pub const DEFAULT_DOWNLOADER: &str = "aria2c";

/// Recursive mirroring tool used for directory-like URLs.
pub const DEFAULT_MIRROR_TOOL: &str = "wget";

/// Username/password injected into URLs for one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCredential {
    pub username: String,
    pub password: String,
}

/// Exact host string -> credential.
pub type CredentialMap = BTreeMap<String, HostCredential>;

/// Global configuration loaded from `~/.config/grabkit/config.toml`.
///
/// Every key is optional; missing ones take the values from `Default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabConfig {
    /// Downloader used when none is given on the command line.
    pub default_downloader: String,
    /// Program used to mirror directory-like URLs.
    pub mirror_tool: String,
    /// Connections per server requested from the segmented downloader (`-x`).
    pub connections: u32,
    /// Segments per file requested from the segmented downloader (`-s`).
    pub segments: u32,
    /// Wrap the segmented downloader in `stdbuf -o0`.
    pub unbuffered: bool,
    /// Per-host credentials embedded into matching URLs.
    pub credentials: CredentialMap,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            default_downloader: DEFAULT_DOWNLOADER.to_string(),
            mirror_tool: DEFAULT_MIRROR_TOOL.to_string(),
            connections: 16,
            segments: 16,
            unbuffered: true,
            credentials: CredentialMap::new(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("grabkit")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<GrabConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: GrabConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
