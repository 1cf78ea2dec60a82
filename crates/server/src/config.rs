//! Server configuration loaded from the process environment.
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use directories::ProjectDirs;

/// Address used when `NAMEBATTLE_BIND` is unset or unparseable.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// File name of the snapshot under the platform data directory.
const SNAPSHOT_FILE: &str = "store.json";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Directory holding `names.ron` and `games.toml`. `None` uses the
    /// bundled sample content.
    pub data_dir: Option<PathBuf>,
    /// Explicit snapshot path. Takes precedence over `persist`.
    pub store_path: Option<PathBuf>,
    /// Persist to the platform data directory when no path is given.
    pub persist: bool,
    pub rng_seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            data_dir: None,
            store_path: None,
            persist: false,
            rng_seed: None,
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `NAMEBATTLE_BIND` - Listen address (default: 127.0.0.1:8080)
    /// - `NAMEBATTLE_DATA_DIR` - Seed content directory (default: bundled)
    /// - `NAMEBATTLE_STORE_PATH` - JSON snapshot file (default: in-memory only)
    /// - `NAMEBATTLE_PERSIST` - Snapshot to the platform data dir (default: false)
    /// - `NAMEBATTLE_RNG_SEED` - Seed for pair selection (default: OS entropy)
    /// - `NAMEBATTLE_LOG_DIR` - Also write `server.log` here (default: stderr only)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(bind) = read_var::<SocketAddr>(&lookup, "NAMEBATTLE_BIND") {
            config.bind = bind;
        }

        config.data_dir = read_path(&lookup, "NAMEBATTLE_DATA_DIR");
        config.store_path = read_path(&lookup, "NAMEBATTLE_STORE_PATH");

        if let Some(persist) = read_var::<bool>(&lookup, "NAMEBATTLE_PERSIST") {
            config.persist = persist;
        } else if lookup("NAMEBATTLE_PERSIST").is_some() {
            // A bare variable counts as enabled.
            config.persist = true;
        }

        config.rng_seed = read_var::<u64>(&lookup, "NAMEBATTLE_RNG_SEED");
        config.log_dir = read_path(&lookup, "NAMEBATTLE_LOG_DIR");

        config
    }

    /// Where the store snapshot lives, if the store is persistent at all.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.store_path {
            return Some(path.clone());
        }
        if self.persist {
            return default_snapshot_path();
        }
        None
    }
}

/// `<platform data dir>/namebattle/store.json`.
pub fn default_snapshot_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "namebattle").map(|dirs| dirs.data_dir().join(SNAPSHOT_FILE))
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    lookup(key)?.trim().parse().ok()
}

fn read_path(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<PathBuf> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}
