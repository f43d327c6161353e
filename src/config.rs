//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory, or the file given
//!    with `--config`
//! 3. `PIXELDUPE_*` environment variables (e.g. `PIXELDUPE_THREADS=8`)
//! 4. CLI flags
//!
//! ```toml
//! parallel_threshold = 1000
//! threads = 8
//! output = "json"
//! progress = false
//! ```

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{OutputFormat, ScanArgs};
use crate::duplicates::{default_threads, FinderConfig, DEFAULT_PARALLEL_THRESHOLD};

/// Environment variable prefix for configuration keys.
pub const ENV_PREFIX: &str = "PIXELDUPE_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directories with more files than this are scanned on a worker pool.
    pub parallel_threshold: usize,
    /// Worker pool size; `None` means one per logical CPU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    /// Default output format for `scan`.
    pub output: OutputFormat,
    /// Show progress bars.
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            threads: None,
            output: OutputFormat::default(),
            progress: true,
        }
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// `explicit` replaces the default config file location. A missing
    /// default file is not an error; a missing explicit file is.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file does not exist or any layer
    /// holds a value of the wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::default_path(),
        };

        match file {
            Some(ref path) => log::debug!("Loading config from {}", path.display()),
            None => log::debug!("No config directory available, using defaults"),
        }

        Self::figment(file.as_deref())
            .extract()
            .context("Invalid configuration")
    }

    /// Build the figment for the given config file.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Apply scan flags on top of the loaded configuration.
    #[must_use]
    pub fn with_scan_args(mut self, args: &ScanArgs) -> Self {
        if let Some(threshold) = args.threshold {
            self.parallel_threshold = threshold;
        }
        if let Some(threads) = args.threads {
            self.threads = Some(threads);
        }
        if let Some(output) = args.output {
            self.output = output;
        }
        if args.no_progress {
            self.progress = false;
        }
        self
    }

    /// Scheduler settings derived from this configuration.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_parallel_threshold(self.parallel_threshold)
            .with_threads(self.threads.unwrap_or_else(default_threads))
    }

    /// Save the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "pixeldupe", "pixeldupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
