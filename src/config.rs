use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Which store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreMode {
    /// One lock around every store operation.
    #[default]
    Locked,
    /// Racy check-then-act create. Compatibility testing only.
    Unsynchronized,
}

impl FromStr for StoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "locked" => Ok(StoreMode::Locked),
            "unsynchronized" => Ok(StoreMode::Unsynchronized),
            other => Err(format!("unknown store mode `{}`", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub snapshot_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub form_archive_path: PathBuf,
    pub max_upload_bytes: usize,
    pub request_timeout_secs: u64,
    pub store_mode: StoreMode,
    pub restore_snapshot: bool,
}

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 << 20;

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            log_level: "info".to_string(),
            snapshot_path: PathBuf::from("users.json"),
            uploads_dir: PathBuf::from("uploads"),
            form_archive_path: PathBuf::from("form_submissions.txt"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            request_timeout_secs: 30,
            store_mode: StoreMode::Locked,
            restore_snapshot: false,
        }
    }
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        Self {
            host: parsed("HOST").unwrap_or(defaults.host),
            port: parsed("PORT").unwrap_or(defaults.port),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            snapshot_path: env::var("SNAPSHOT_PATH").map(PathBuf::from).unwrap_or(defaults.snapshot_path),
            uploads_dir: env::var("UPLOADS_DIR").map(PathBuf::from).unwrap_or(defaults.uploads_dir),
            form_archive_path: env::var("FORM_ARCHIVE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.form_archive_path),
            max_upload_bytes: parsed("MAX_UPLOAD_BYTES").unwrap_or(defaults.max_upload_bytes),
            request_timeout_secs: parsed("REQUEST_TIMEOUT_SECS").unwrap_or(defaults.request_timeout_secs),
            store_mode: parsed("STORE_MODE").unwrap_or(defaults.store_mode),
            restore_snapshot: parsed("RESTORE_SNAPSHOT").unwrap_or(defaults.restore_snapshot),
        }
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
