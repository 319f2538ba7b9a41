//! Storage layout and server settings for flamecheck.
//!
//! The configuration is resolved once at process start and handed to the
//! server explicitly; request handling never consults the environment.

use serde::Deserialize;
use std::env;
use std::fs;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};

pub const ENV_CONFIG: &str = "FLAMECHECK_CONFIG";
pub const ENV_ROOT: &str = "FLAMECHECK_ROOT";
pub const ENV_ADDR: &str = "FLAMECHECK_ADDR";
pub const ENV_MAX_UPLOAD_BYTES: &str = "FLAMECHECK_MAX_UPLOAD_BYTES";
pub const ENV_ENFORCE_EXTENSIONS: &str = "FLAMECHECK_ENFORCE_EXTENSIONS";

pub const DEFAULT_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 5000));
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Structs
// ─────────────────────────────────────────────────────────────────────────────

/// Resolved locations and limits for a running server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application root every relative directory is resolved against.
    pub root: PathBuf,
    /// Reference filenames classified as fire.
    pub fire_dir: PathBuf,
    /// Reference filenames classified as not fire.
    pub no_fire_dir: PathBuf,
    /// Write destination for uploads.
    pub upload_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
    /// Reject uploads whose extension is outside the image allow-list.
    pub enforce_extensions: bool,
}

/// On-disk JSON overrides. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    root: Option<PathBuf>,
    fire_dir: Option<PathBuf>,
    no_fire_dir: Option<PathBuf>,
    upload_dir: Option<PathBuf>,
    templates_dir: Option<PathBuf>,
    static_dir: Option<PathBuf>,
    bind_addr: Option<SocketAddr>,
    max_upload_bytes: Option<usize>,
    enforce_extensions: Option<bool>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl AppConfig {
    /// Default layout rooted at `root`: `fire/`, `not_fire/`, `uploads/`,
    /// `templates/` and `static/`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            fire_dir: root.join("fire"),
            no_fire_dir: root.join("not_fire"),
            upload_dir: root.join("uploads"),
            templates_dir: root.join("templates"),
            static_dir: root.join("static"),
            bind_addr: DEFAULT_ADDR,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            enforce_extensions: false,
            root,
        }
    }

    /// Loads `.env`, then resolves the configuration from process variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration from an arbitrary variable source.
    ///
    /// Precedence: variable, then JSON file named by `FLAMECHECK_CONFIG`,
    /// then the defaults of [`AppConfig::from_root`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match lookup(ENV_CONFIG) {
            Some(path) => FileConfig::load(Path::new(&path))?,
            None => FileConfig::default(),
        };

        let root = lookup(ENV_ROOT)
            .map(PathBuf::from)
            .or(file.root)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut config = Self::from_root(&root);

        let overrides = [
            (file.fire_dir, &mut config.fire_dir),
            (file.no_fire_dir, &mut config.no_fire_dir),
            (file.upload_dir, &mut config.upload_dir),
            (file.templates_dir, &mut config.templates_dir),
            (file.static_dir, &mut config.static_dir),
        ];
        for (value, slot) in overrides {
            if let Some(dir) = value {
                *slot = root.join(dir);
            }
        }

        if let Some(addr) = file.bind_addr {
            config.bind_addr = addr;
        }
        if let Some(limit) = file.max_upload_bytes {
            config.max_upload_bytes = limit;
        }
        if let Some(enforce) = file.enforce_extensions {
            config.enforce_extensions = enforce;
        }

        if let Some(raw) = lookup(ENV_ADDR) {
            config.bind_addr = raw.parse().map_err(|_| invalid(ENV_ADDR, &raw))?;
        }
        if let Some(raw) = lookup(ENV_MAX_UPLOAD_BYTES) {
            config.max_upload_bytes = raw
                .trim()
                .parse()
                .map_err(|_| invalid(ENV_MAX_UPLOAD_BYTES, &raw))?;
        }
        if let Some(raw) = lookup(ENV_ENFORCE_EXTENSIONS) {
            config.enforce_extensions =
                parse_bool(&raw).ok_or_else(|| invalid(ENV_ENFORCE_EXTENSIONS, &raw))?;
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
