//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_commerce::CommerceStore;
use storefront_storage::FileStorage;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory holding the store files.
    pub data_dir: PathBuf,
}

impl Context {
    /// Load context from config file and flags.
    ///
    /// The data directory comes from `--data-dir`, then the config file,
    /// then the platform data directory.
    pub fn load(config_path: Option<&str>, data_dir: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            // Try to find config in current directory or parent directories
            None => match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        let data_dir = match (data_dir, config.data_dir.as_deref()) {
            (Some(dir), _) => resolve(&cwd, dir),
            (None, Some(dir)) => {
                let base = config_path
                    .as_deref()
                    .and_then(Path::parent)
                    .unwrap_or(cwd.as_path());
                resolve(base, dir)
            }
            (None, None) => dirs_path().join("storefront"),
        };

        output.debug(&format!("data directory: {}", data_dir.display()));
        if let Some(path) = &config_path {
            output.debug(&format!("config file: {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            data_dir,
        })
    }

    /// Open the store over the data directory.
    pub fn open_store(&self) -> Result<CommerceStore<FileStorage>> {
        let storage = FileStorage::open(&self.data_dir).with_context(|| {
            format!("Failed to open data directory: {}", self.data_dir.display())
        })?;
        Ok(CommerceStore::from_config(storage, &self.config.store))
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = CliConfig::load(&config_path) {
                    return Some((config, config_path));
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Resolve a path relative to `base`.
fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
