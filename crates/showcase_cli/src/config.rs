//! Configuration file support for the showcase CLI.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `SHOWCASE_`, e.g., `SHOWCASE_GITHUB_TOKEN`)
//! 3. Config file (~/.config/showcase/config.toml or ./showcase.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."  # or use SHOWCASE_GITHUB_TOKEN env var
//!
//! [output]
//! directory = "src/content/showcase"  # optional, this is the default
//! ```

use std::path::{Path, PathBuf};

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;
use showcase::ScrapeError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration.
    pub github: GitHubConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub personal access token.
    /// Can also be set via SHOWCASE_GITHUB_TOKEN environment variable.
    pub token: Option<String>,
}

/// Output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the per-author records are written to.
    pub directory: Option<PathBuf>,
}

/// Load configuration from file and environment.
///
/// With an explicit path the file must exist; otherwise the XDG config file
/// and a local `showcase.toml` are both optional.
pub fn load(explicit_path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = ConfigBuilder::builder();

    if let Some(path) = explicit_path {
        builder = builder.add_source(File::from(path));
    } else {
        if let Some(dirs) = ProjectDirs::from("", "", "showcase") {
            builder = builder
                .add_source(File::from(dirs.config_dir().join("config.toml")).required(false));
        }
        builder = builder.add_source(File::new("showcase.toml", FileFormat::Toml).required(false));
    }

    builder = builder.add_source(Environment::with_prefix("SHOWCASE").separator("_"));

    builder.build()?.try_deserialize()
}

/// Resolve the GitHub token from flag or configuration.
///
/// A missing token is a configuration error raised before any network call.
pub fn resolve_token(flag: Option<String>, config: &Config) -> Result<String, ScrapeError> {
    flag.or_else(|| config.github.token.clone()).ok_or_else(|| {
        ScrapeError::config(
            "GitHub token not configured; set SHOWCASE_GITHUB_TOKEN, pass --token, \
             or add github.token to the config file",
        )
    })
}
