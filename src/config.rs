use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub backend: BackendConfig,
  pub stubs: StubsConfig,
  pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
  /// Base URL the operation paths are POSTed to
  pub url: String,
  /// When false, every operation is answered by the local stubs
  pub enabled: bool,
  /// Total attempts per call, including the first
  pub max_attempts: u32,
  /// Base retry delay; the wait before attempt n+1 is backoff_ms * n
  pub backoff_ms: u64,
  pub timeout_secs: u64,
}

impl Default for BackendConfig {
  fn default() -> Self {
    Self {
      url: "http://localhost:8000".to_string(),
      enabled: true,
      max_attempts: 2,
      backoff_ms: 250,
      timeout_secs: 30,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StubsConfig {
  /// Force stub outputs to be non-empty for demos
  pub guarantee_non_empty: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
  pub enabled: bool,
  /// Cache database location (defaults to the platform data dir)
  pub path: Option<PathBuf>,
  /// Age bound for serving cached responses on the fallback path.
  /// Unset means entries are served regardless of age.
  pub max_age_hours: Option<u64>,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      path: None,
      max_age_hours: None,
    }
  }
}

impl Config {
  /// Load configuration from file, then apply environment overrides.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./skillscope.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/skillscope/config.yaml
  ///
  /// A missing config file is not an error; defaults apply.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    config.apply_env_overrides();
    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("skillscope.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("skillscope").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    Ok(config)
  }

  /// Environment flags win over the config file.
  ///
  /// SKILLSCOPE_BACKEND_URL, SKILLSCOPE_USE_BACKEND and SKILLSCOPE_DEMO_MODE
  /// mirror what the front end reads at startup.
  fn apply_env_overrides(&mut self) {
    if let Ok(url) = std::env::var("SKILLSCOPE_BACKEND_URL") {
      self.backend.url = url;
    }
    if let Ok(flag) = std::env::var("SKILLSCOPE_USE_BACKEND") {
      self.backend.enabled = parse_flag(&flag);
    }
    if let Ok(flag) = std::env::var("SKILLSCOPE_DEMO_MODE") {
      self.stubs.guarantee_non_empty = parse_flag(&flag);
    }
  }
}

fn parse_flag(value: &str) -> bool {
  matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}
