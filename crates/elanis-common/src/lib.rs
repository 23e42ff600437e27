//! Directory structure management for the Elanis client
//!
//! Directory layout:
//! ```text
//! elanis/
//! ├── local/           # Credential file, client config
//! └── logs/            # Rolling log files written by the CLI
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

pub mod storage;

pub use storage::{FileArea, MemoryArea, StorageArea};

#[derive(Serialize, Deserialize, Debug)]
struct ElanisConfig {
    elanis_root: Option<PathBuf>,
}

/// Get the global configuration path
fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("elanis").join("config.json"))
}

/// Load the persistent root from config file
pub fn load_persistent_root() -> Option<PathBuf> {
    let path = get_config_path()?;
    if !path.exists() {
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str::<ElanisConfig>(&content) {
            Ok(config) => config.elanis_root,
            Err(e) => {
                warn!("Failed to parse config file at {:?}: {}", path, e);
                None
            }
        },
        Err(e) => {
            warn!("Failed to read config file at {:?}: {}", path, e);
            None
        }
    }
}

/// Save a path as the persistent Elanis root
pub fn save_persistent_root(root: PathBuf) -> anyhow::Result<()> {
    let path = get_config_path().ok_or_else(|| anyhow::anyhow!("Could not determine config dir"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = ElanisConfig {
        elanis_root: Some(root),
    };
    let json = serde_json::to_string_pretty(&config)?;
    fs::write(path, json)?;
    Ok(())
}

/// Get the ELANIS_ROOT directory from environment, persistent config, or default
pub fn elanis_root() -> PathBuf {
    // 1. Check environment variable
    if let Ok(val) = std::env::var("ELANIS_ROOT") {
        return PathBuf::from(val);
    }

    // 2. Check persistent config
    if let Some(root) = load_persistent_root() {
        // Set env var so subprocesses see it too
        std::env::set_var("ELANIS_ROOT", &root);
        return root;
    }

    // 3. Default fallback
    dirs::data_dir()
        .map(|d| d.join("elanis"))
        .unwrap_or_else(|| PathBuf::from("elanis_data"))
}

/// Set the ELANIS_ROOT directory at runtime
pub fn set_elanis_root(path: PathBuf) {
    info!("Setting ELANIS_ROOT to: {:?}", path);
    std::env::set_var("ELANIS_ROOT", path);
}

/// Local data directory (credentials, config)
pub fn local_dir() -> PathBuf {
    elanis_root().join("local")
}

/// Log file directory
pub fn logs_dir() -> PathBuf {
    elanis_root().join("logs")
}

/// Durable credential file written by the token store
pub fn credentials_path() -> PathBuf {
    local_dir().join("credentials.json")
}

/// Ensure a single directory exists
pub fn ensure_dir(path: &PathBuf) -> anyhow::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
        info!("Created directory: {:?}", path);
    }
    Ok(())
}

/// Initialize the complete directory structure
/// Call this once at app startup before any other operations
pub fn init_structure() -> anyhow::Result<PathBuf> {
    let root = elanis_root();

    // Ensure root exists first
    ensure_dir(&root)?;

    ensure_dir(&local_dir())?;
    ensure_dir(&logs_dir())?;

    // Canonicalize for absolute path
    let canonical = std::fs::canonicalize(&root).unwrap_or_else(|_| root.clone());

    info!("Elanis directory structure initialized at: {:?}", canonical);

    Ok(canonical)
}

/// Ensure a file's parent directory exists
pub fn ensure_parent(path: &PathBuf) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(&parent.to_path_buf())?;
    }
    Ok(())
}
