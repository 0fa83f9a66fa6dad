/* src/config.rs */

// shipwright.toml parsing. Projects override the stock defaults by writing
// only the keys they care about; serde defaults supply the rest, which is
// what merges a project config over the built-in one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipwrightConfig {
  pub project: ProjectConfig,
  /// Locale used when no better match exists. Only meaningful when the
  /// project ships more than one locale file.
  #[serde(default = "default_locale")]
  pub default_locale: String,
  /// Poll interval for update checks, in milliseconds. Negative disables
  /// automatic polling entirely.
  #[serde(default = "default_check_update_interval_ms")]
  pub check_update_interval_ms: i64,
  /// Inactivity window before the app is marked idle and a downloaded
  /// update may be applied, in milliseconds.
  #[serde(default = "default_idle_timeout_ms")]
  pub idle_timeout_ms: u64,
  #[serde(default)]
  pub window: Option<WindowConfig>,
  /// Compile-time variables injected into the UI bundle.
  #[serde(default)]
  pub env: BTreeMap<String, String>,
  #[serde(default)]
  pub build: BuildSection,
  #[serde(default)]
  pub dev: DevSection,
  #[serde(default)]
  pub i18n: Option<I18nSection>,
  #[serde(default)]
  pub lint: LintSection,
  #[serde(default)]
  pub clean: CleanSection,
  #[serde(default)]
  pub pack: PackSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
  pub name: String,
}

/// Host window geometry, passed through to the browser-shell runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowConfig {
  pub width: Option<u32>,
  pub height: Option<u32>,
  pub x: Option<i32>,
  pub y: Option<i32>,
  pub fullscreen: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
  /// Whether JS and CSS sourcemaps are enabled in production builds.
  #[serde(default)]
  pub sourcemap: bool,
  /// Whether the linter runs as part of `shipwright build`.
  #[serde(default = "default_true")]
  pub linter: bool,
  pub out_dir: Option<String>,
  /// Bundler command for the sandboxed UI process.
  pub ui_command: Option<String>,
  /// Bundler command for the privileged host process.
  pub host_command: Option<String>,
}

impl Default for BuildSection {
  fn default() -> Self {
    Self { sourcemap: false, linter: true, out_dir: None, ui_command: None, host_command: None }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevSection {
  #[serde(default = "default_true")]
  pub sourcemap: bool,
  #[serde(default = "default_dev_port")]
  pub port: u16,
  /// Whether the host process restarts when its sources change.
  #[serde(default = "default_true")]
  pub reload_host: bool,
  pub ui_command: Option<String>,
  pub host_command: Option<String>,
}

impl Default for DevSection {
  fn default() -> Self {
    Self {
      sourcemap: true,
      port: default_dev_port(),
      reload_host: true,
      ui_command: None,
      host_command: None,
    }
  }
}

/// The manifest of known locales. A translation file is bundled only when
/// its code appears in `locales`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nSection {
  pub locales: Vec<String>,
  #[serde(default = "default_locale")]
  pub default: String,
  #[serde(default = "default_messages_dir")]
  pub messages_dir: String,
}

impl I18nSection {
  pub fn validate(&self) -> Result<()> {
    if self.locales.is_empty() {
      bail!("i18n.locales must not be empty");
    }
    if !self.locales.contains(&self.default) {
      bail!("i18n.default \"{}\" is not in i18n.locales {:?}", self.default, self.locales);
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintSection {
  #[serde(default)]
  pub commands: Vec<String>,
  /// Flag appended to each lint command when `--fix` is requested.
  pub fix_flag: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanSection {
  #[serde(default)]
  pub commands: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackSection {
  #[serde(default)]
  pub mac: Vec<String>,
  #[serde(default)]
  pub win: Vec<String>,
}

fn default_locale() -> String {
  "en".to_string()
}

fn default_check_update_interval_ms() -> i64 {
  60_000
}

fn default_idle_timeout_ms() -> u64 {
  60 * 60 * 1000
}

fn default_dev_port() -> u16 {
  8080
}

fn default_messages_dir() -> String {
  "config/locales".to_string()
}

fn default_true() -> bool {
  true
}

impl ShipwrightConfig {
  /// Stock configuration for a project that has no shipwright.toml yet.
  pub fn default_for(project_name: &str) -> Self {
    Self {
      project: ProjectConfig { name: project_name.to_string() },
      default_locale: default_locale(),
      check_update_interval_ms: default_check_update_interval_ms(),
      idle_timeout_ms: default_idle_timeout_ms(),
      window: None,
      env: BTreeMap::new(),
      build: BuildSection::default(),
      dev: DevSection::default(),
      i18n: None,
      lint: LintSection::default(),
      clean: CleanSection::default(),
      pack: PackSection::default(),
    }
  }
}

/// Walk upward from `start` to find `shipwright.toml`, like Cargo.toml discovery.
pub fn find_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join("shipwright.toml");
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("shipwright.toml not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_config(path: &Path) -> Result<ShipwrightConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: ShipwrightConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  if let Some(ref i18n) = config.i18n {
    i18n.validate()?;
  }
  Ok(config)
}

/// Resolve the project config: an explicit path must load, auto-discovery
/// falls back to the stock defaults when no shipwright.toml exists.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<(PathBuf, ShipwrightConfig)> {
  match explicit {
    Some(path) => {
      let config = load_config(path)?;
      Ok((path.to_path_buf(), config))
    }
    None => match find_config(cwd) {
      Ok(path) => {
        let config = load_config(&path)?;
        Ok((path, config))
      }
      Err(_) => {
        let name = cwd.file_name().and_then(|n| n.to_str()).unwrap_or("app");
        Ok((cwd.join("shipwright.toml"), ShipwrightConfig::default_for(name)))
      }
    },
  }
}
