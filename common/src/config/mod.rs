use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::err::DbError;

/// Engine version stamped into every block header written from this build.
pub const ENGINE_VERSION: &str = "0.1.0";

/// Process-wide, read-only configuration (§6.3). Built once at startup and
/// threaded explicitly into `DatabaseManager::new` — never read from global
/// mutable state (see the DESIGN NOTES on avoiding a process-wide singleton).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding one file per database.
    pub storage_dir: String,

    /// Extension appended to each database file, including the leading dot.
    pub db_extension: String,

    /// Page (block) cache capacity, in blocks. 0 disables the cache.
    pub block_cache_capacity: usize,

    /// Row materialization cache capacity. 0 disables the cache.
    pub row_cache_capacity: usize,

    /// Result-view cache capacity. 0 disables the cache.
    pub view_cache_capacity: usize,

    /// Engine version string stamped into new block headers.
    pub engine_version: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            storage_dir: default_storage_dir(),
            db_extension: ".db".to_string(),
            block_cache_capacity: 256,
            row_cache_capacity: 0,
            view_cache_capacity: 0,
            engine_version: ENGINE_VERSION.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn new(storage_dir: impl Into<String>) -> Self {
        EngineConfig {
            storage_dir: storage_dir.into(),
            ..EngineConfig::default()
        }
    }
}

/// Platform default: `/tmp` on POSIX, the system temp dir elsewhere.
fn default_storage_dir() -> String {
    env::temp_dir().to_string_lossy().into_owned()
}

/// Loads an `EngineConfig` from a TOML file, falling back to field defaults
/// for anything the file omits (via `#[serde(default)]`-style deserialize
/// of a partial document is not attempted here; callers who want overlay
/// semantics should merge into `EngineConfig::default()` themselves).
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, DbError> {
    let mut file = File::open(path.as_ref())?;
    let mut s = String::new();
    file.read_to_string(&mut s)?;

    toml::from_str(&s).map_err(|e| DbError::UnknownError(format!("config parse error: {}", e)))
}
