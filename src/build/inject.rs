/* src/build/inject.rs */

// Assembly of the build-time injected globals consumed by the UI bundle:
// a config snapshot, the inferred route sequence, and the locale table.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::{ShipwrightConfig, WindowConfig};
use crate::locales::{self, LocaleSource, LocaleTable};
use crate::paths::ProjectPaths;
use crate::routes::{self, Route};

/// Subset of the project config the UI bundle is allowed to see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
  pub name: String,
  pub default_locale: String,
  pub check_update_interval_ms: i64,
  pub idle_timeout_ms: u64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub window: Option<WindowConfig>,
}

impl ConfigSnapshot {
  pub fn from_config(config: &ShipwrightConfig) -> Self {
    Self {
      name: config.project.name.clone(),
      default_locale: config.default_locale.clone(),
      check_update_interval_ms: config.check_update_interval_ms,
      idle_timeout_ms: config.idle_timeout_ms,
      window: config.window.clone(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildData {
  pub config: ConfigSnapshot,
  #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
  pub env: BTreeMap<String, String>,
  pub routes: Vec<Route>,
  pub locales: LocaleTable,
}

/// Locale source for this project: the `[i18n]` manifest when present,
/// otherwise every file in the stock locale directory (and an empty table
/// when that directory does not exist either).
pub fn locale_source(config: &ShipwrightConfig, paths: &ProjectPaths, live: bool) -> Result<LocaleSource> {
  let (dir, manifest) = match &config.i18n {
    Some(i18n) => {
      let dir = paths.base.join(&i18n.messages_dir);
      (dir, i18n.locales.clone())
    }
    None => {
      let dir = paths.base.join("config").join("locales");
      if !dir.is_dir() {
        return Ok(LocaleSource::Prebuilt(LocaleTable::new()));
      }
      let manifest = locales::codes_present(&dir)?;
      (dir, manifest)
    }
  };

  if live {
    Ok(LocaleSource::Live { dir, manifest })
  } else {
    Ok(LocaleSource::Prebuilt(locales::aggregate(&dir, &manifest)?))
  }
}

/// Run the inferencer and the aggregator once and assemble the injected
/// globals. `live` selects the dev-mode locale source that re-reads disk.
pub fn assemble(config: &ShipwrightConfig, paths: &ProjectPaths, live: bool) -> Result<BuildData> {
  let routes = routes::infer_routes(&paths.pages_dir())?;
  let locales = locale_source(config, paths, live)?.table()?;

  Ok(BuildData {
    config: ConfigSnapshot::from_config(config),
    env: config.env.clone(),
    routes,
    locales,
  })
}

/// Manifest written next to the injected data, recording what the build
/// contained and the per-locale content hashes.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildManifest {
  pub routes: usize,
  pub locales: Vec<String>,
  pub locale_versions: BTreeMap<String, String>,
}

/// Write the injected data into `<out>/shipwright/`: the combined
/// `build-data.json`, one JSON file per locale, and the build manifest.
pub fn write(data: &BuildData, out_dir: &Path) -> Result<BuildManifest> {
  let inject_dir = out_dir.join("shipwright");
  std::fs::create_dir_all(&inject_dir)
    .with_context(|| format!("failed to create {}", inject_dir.display()))?;

  let json = serde_json::to_string_pretty(data).context("failed to serialize build data")?;
  let data_file = inject_dir.join("build-data.json");
  std::fs::write(&data_file, json)
    .with_context(|| format!("failed to write {}", data_file.display()))?;

  let locales_dir = inject_dir.join("locales");
  std::fs::create_dir_all(&locales_dir)
    .with_context(|| format!("failed to create {}", locales_dir.display()))?;
  for (code, table) in &data.locales {
    let path = locales_dir.join(format!("{code}.json"));
    let json = serde_json::to_string_pretty(table)
      .with_context(|| format!("failed to serialize locale {code}"))?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
  }

  let manifest = BuildManifest {
    routes: data.routes.len(),
    locales: data.locales.keys().cloned().collect(),
    locale_versions: locales::content_versions(&data.locales),
  };
  let manifest_file = inject_dir.join("manifest.json");
  let json = serde_json::to_string_pretty(&manifest).context("failed to serialize build manifest")?;
  std::fs::write(&manifest_file, json)
    .with_context(|| format!("failed to write {}", manifest_file.display()))?;

  Ok(manifest)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  fn project(name: &str) -> (ShipwrightConfig, ProjectPaths, PathBuf) {
    let tmp = std::env::temp_dir().join(format!("shipwright-test-inject-{name}"));
    let _ = std::fs::remove_dir_all(&tmp);

    let pages = tmp.join("src/ui/pages");
    std::fs::create_dir_all(&pages).unwrap();
    std::fs::write(pages.join("index.js"), "//").unwrap();
    std::fs::write(pages.join("About.js"), "//").unwrap();
    std::fs::write(pages.join("404.js"), "//").unwrap();

    let locales = tmp.join("config/locales");
    std::fs::create_dir_all(&locales).unwrap();
    std::fs::write(locales.join("en.json"), r#"{"hello": "Hello"}"#).unwrap();
    std::fs::write(locales.join("xx.json"), r#"{"hello": "???"}"#).unwrap();

    let mut config = ShipwrightConfig::default_for("demo");
    config.i18n = Some(crate::config::I18nSection {
      locales: vec!["en".to_string()],
      default: "en".to_string(),
      messages_dir: "config/locales".to_string(),
    });
    let paths = ProjectPaths::resolve(&tmp, "src", "dist");
    (config, paths, tmp)
  }

  #[test]
  fn assemble_collects_routes_env_and_locales() {
    let (mut config, paths, tmp) = project("assemble");
    config.env.insert("API".to_string(), "x".to_string());

    let data = assemble(&config, &paths, false).unwrap();

    assert_eq!(data.config.name, "demo");
    assert_eq!(data.env.get("API").map(String::as_str), Some("x"));
    let paths_list: Vec<&str> = data.routes.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths_list, vec!["/about", "/", "*"]);
    assert!(data.locales.contains_key("en"));
    assert!(!data.locales.contains_key("xx"));

    let _ = std::fs::remove_dir_all(&tmp);
  }

  #[test]
  fn write_emits_data_locales_and_manifest() {
    let (config, paths, tmp) = project("write");
    let data = assemble(&config, &paths, false).unwrap();

    let manifest = write(&data, &paths.output).unwrap();
    assert_eq!(manifest.routes, 3);
    assert_eq!(manifest.locales, vec!["en"]);
    assert!(manifest.locale_versions.contains_key("en"));

    assert!(paths.output.join("shipwright/build-data.json").is_file());
    assert!(paths.output.join("shipwright/locales/en.json").is_file());
    assert!(paths.output.join("shipwright/manifest.json").is_file());

    let raw = std::fs::read_to_string(paths.output.join("shipwright/build-data.json")).unwrap();
    let parsed: BuildData = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.routes, data.routes);

    let _ = std::fs::remove_dir_all(&tmp);
  }

  #[test]
  fn missing_i18n_section_uses_files_present() {
    let (mut config, paths, tmp) = project("no-i18n");
    config.i18n = None;

    let data = assemble(&config, &paths, false).unwrap();
    // Without a manifest every file present is known.
    assert!(data.locales.contains_key("en"));
    assert!(data.locales.contains_key("xx"));

    let _ = std::fs::remove_dir_all(&tmp);
  }
}
