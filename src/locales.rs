/* src/locales.rs */

// Locale aggregation. One translation file per locale code lives in the
// messages directory; a file is bundled only when its code appears in the
// known-locale manifest. Files without a manifest entry (and manifest
// entries without a file) are silently excluded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Locale code -> opaque translation dictionary.
pub type LocaleTable = BTreeMap<String, serde_json::Value>;

/// Where locale data comes from at runtime. Production builds reuse the
/// table injected at build time; dev mode re-reads matching files from disk
/// on every invocation so translations can be live-reloaded.
#[derive(Debug, Clone)]
pub enum LocaleSource {
  Prebuilt(LocaleTable),
  Live { dir: PathBuf, manifest: Vec<String> },
}

impl LocaleSource {
  pub fn table(&self) -> Result<LocaleTable> {
    match self {
      Self::Prebuilt(table) => Ok(table.clone()),
      Self::Live { dir, manifest } => aggregate(dir, manifest),
    }
  }
}

/// Build the locale table: non-hidden files of `dir` whose stem appears in
/// `manifest`. Output keys are exactly manifest codes ∩ files present.
pub fn aggregate(dir: &Path, manifest: &[String]) -> Result<LocaleTable> {
  let mut table = LocaleTable::new();

  let entries = std::fs::read_dir(dir)
    .with_context(|| format!("failed to read locale directory {}", dir.display()))?;

  for entry in entries {
    let entry = entry.with_context(|| format!("failed to read locale directory {}", dir.display()))?;
    let path = entry.path();
    if path.is_dir() {
      continue;
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else { continue };
    if name.starts_with('.') {
      continue;
    }
    let Some(code) = path.file_stem().and_then(|s| s.to_str()) else { continue };
    if !manifest.iter().any(|m| m == code) {
      continue;
    }

    let content = std::fs::read_to_string(&path)
      .with_context(|| format!("failed to read locale file {}", path.display()))?;
    let parsed: serde_json::Value = serde_json::from_str(&content)
      .with_context(|| format!("invalid JSON in locale file {}", path.display()))?;
    table.insert(code.to_string(), parsed);
  }

  Ok(table)
}

/// List the locale codes present in a messages directory. Used as the
/// manifest when the project has no `[i18n]` section, in which case every
/// file present is considered known.
pub fn codes_present(dir: &Path) -> Result<Vec<String>> {
  let entries = std::fs::read_dir(dir)
    .with_context(|| format!("failed to read locale directory {}", dir.display()))?;

  let mut codes = Vec::new();
  for entry in entries {
    let entry = entry?;
    let path = entry.path();
    if path.is_dir() {
      continue;
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else { continue };
    if name.starts_with('.') {
      continue;
    }
    if let Some(code) = path.file_stem().and_then(|s| s.to_str()) {
      codes.push(code.to_string());
    }
  }
  codes.sort();
  Ok(codes)
}

/// Per-locale content hash (first 8 bytes of SHA-256, hex-encoded), recorded
/// in the build manifest so hosts can detect stale translation bundles.
pub fn content_versions(table: &LocaleTable) -> BTreeMap<String, String> {
  let mut versions = BTreeMap::new();
  for (code, value) in table {
    let json = serde_json::to_string(value).unwrap_or_default();
    let hash = Sha256::digest(json.as_bytes());
    versions.insert(code.clone(), hex::encode(&hash[..8]));
  }
  versions
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fixture(name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("shipwright-test-locales-{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    for (file, content) in files {
      std::fs::write(dir.join(file), content).unwrap();
    }
    dir
  }

  #[test]
  fn output_is_manifest_intersect_files() {
    let dir = fixture(
      "intersect",
      &[
        ("en.json", r#"{"hello": "Hello"}"#),
        ("fr.json", r#"{"hello": "Bonjour"}"#),
        ("xx.json", r#"{"hello": "???"}"#),
      ],
    );
    // "de" has a manifest entry but no file; "xx" has a file but no entry.
    let manifest = vec!["en".to_string(), "fr".to_string(), "de".to_string()];
    let table = aggregate(&dir, &manifest).unwrap();
    let codes: Vec<&str> = table.keys().map(String::as_str).collect();
    assert_eq!(codes, vec!["en", "fr"]);
    assert_eq!(table["en"]["hello"], "Hello");
    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn hidden_files_and_subdirs_are_skipped() {
    let dir = fixture("hidden", &[(".en.json.swp", "junk"), ("en.json", "{}")]);
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    let table = aggregate(&dir, &["en".to_string(), "nested".to_string()]).unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.contains_key("en"));
    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn invalid_json_is_an_error() {
    let dir = fixture("invalid", &[("en.json", "{not json")]);
    let err = aggregate(&dir, &["en".to_string()]).unwrap_err();
    assert!(err.to_string().contains("invalid JSON"));
    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn missing_directory_is_fatal() {
    let dir = std::env::temp_dir().join("shipwright-test-locales-missing");
    let _ = std::fs::remove_dir_all(&dir);
    let err = aggregate(&dir, &["en".to_string()]).unwrap_err();
    assert!(err.to_string().contains("locale directory"));
  }

  #[test]
  fn live_source_sees_edits_prebuilt_does_not() {
    let dir = fixture("live", &[("en.json", r#"{"title": "One"}"#)]);
    let manifest = vec!["en".to_string()];

    let live = LocaleSource::Live { dir: dir.clone(), manifest: manifest.clone() };
    let prebuilt = LocaleSource::Prebuilt(live.table().unwrap());

    std::fs::write(dir.join("en.json"), r#"{"title": "Two"}"#).unwrap();

    assert_eq!(live.table().unwrap()["en"]["title"], "Two");
    assert_eq!(prebuilt.table().unwrap()["en"]["title"], "One");
    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn codes_present_lists_stems_sorted() {
    let dir = fixture("codes", &[("fr.json", "{}"), ("en.json", "{}"), (".hidden.json", "{}")]);
    assert_eq!(codes_present(&dir).unwrap(), vec!["en", "fr"]);
    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn content_versions_change_with_content() {
    let mut table = LocaleTable::new();
    table.insert("en".to_string(), serde_json::json!({"a": 1}));
    let before = content_versions(&table);

    table.insert("en".to_string(), serde_json::json!({"a": 2}));
    let after = content_versions(&table);

    assert_ne!(before["en"], after["en"]);
    assert_eq!(before["en"].len(), 16);
  }
}
