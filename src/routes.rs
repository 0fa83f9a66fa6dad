/* src/routes.rs */

// Route inference. The URL layout of the UI is derived from the shape of the
// pages directory: each page file becomes one route, nested directories
// become nested paths, and a root-level `404.*` file becomes the trailing
// wildcard route.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Segments whose kebab-cased form collapses to the parent path when they
/// are the last segment (`pages/settings/index.js` -> `/settings`).
const INDEX_KEYWORDS: [&str; 3] = ["index", "home", "landing"];

/// Stem reserved for the wildcard route; never crawled as a normal page.
const NOT_FOUND_STEM: &str = "404";

/// One inferred route: a leading-slash URL pattern (`*` allowed for the
/// trailing wildcard) and an opaque module identifier relative to the pages
/// root. The identifier is resolved by the UI bundle's registry, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
  pub path: String,
  pub component: String,
}

/// Crawl `pages_dir` and produce the ordered route sequence. Ordering among
/// non-wildcard routes follows directory enumeration order (sorted per
/// directory here, but callers must not rely on precedence beyond "wildcard
/// last"). A missing pages directory is a fatal configuration error.
pub fn infer_routes(pages_dir: &Path) -> Result<Vec<Route>> {
  let mut routes = Vec::new();
  crawl(pages_dir, pages_dir, &mut routes)?;

  // The wildcard route redirecting to the 404 page is always appended last.
  if let Some(component) = find_not_found(pages_dir)? {
    routes.push(Route { path: "*".to_string(), component });
  }

  Ok(routes)
}

fn crawl(dir: &Path, base: &Path, out: &mut Vec<Route>) -> Result<()> {
  let mut entries: Vec<_> = std::fs::read_dir(dir)
    .with_context(|| format!("failed to read pages directory {}", dir.display()))?
    .collect::<std::io::Result<_>>()
    .with_context(|| format!("failed to read pages directory {}", dir.display()))?;
  entries.sort_by_key(std::fs::DirEntry::file_name);

  for entry in entries {
    let name = entry.file_name();
    let Some(name) = name.to_str() else { continue };
    if is_hidden(name) {
      continue;
    }

    let path = entry.path();
    if path.is_dir() {
      crawl(&path, base, out)?;
      continue;
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    if stem == NOT_FOUND_STEM {
      continue;
    }

    out.push(Route { path: infer_path(&path, base), component: component_id(&path, base) });
  }

  Ok(())
}

/// Derive the URL path for a page file: relative segments, kebab-cased, with
/// a trailing index keyword collapsing to the parent path.
fn infer_path(file: &Path, base: &Path) -> String {
  let rel = file.with_extension("");
  let rel = rel.strip_prefix(base).unwrap_or(&rel);

  let segments: Vec<String> =
    rel.iter().filter_map(|s| s.to_str()).filter(|s| !s.is_empty()).map(kebab_case).collect();
  let last = segments.len().saturating_sub(1);

  let url: Vec<&str> = segments
    .iter()
    .enumerate()
    .filter(|(i, seg)| !(*i == last && INDEX_KEYWORDS.contains(&seg.as_str())))
    .map(|(_, seg)| seg.as_str())
    .collect();

  format!("/{}", url.join("/"))
}

/// Module identifier: the file's path relative to the pages root, separators
/// normalized to `/`, extension kept.
fn component_id(file: &Path, base: &Path) -> String {
  let rel = file.strip_prefix(base).unwrap_or(file);
  rel.iter().filter_map(|s| s.to_str()).collect::<Vec<_>>().join("/")
}

/// Look for a `404.*` page at the root of the pages directory.
fn find_not_found(pages_dir: &Path) -> Result<Option<String>> {
  let mut entries: Vec<_> = std::fs::read_dir(pages_dir)
    .with_context(|| format!("failed to read pages directory {}", pages_dir.display()))?
    .collect::<std::io::Result<_>>()?;
  entries.sort_by_key(std::fs::DirEntry::file_name);

  for entry in entries {
    let path = entry.path();
    if path.is_dir() {
      continue;
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else { continue };
    if is_hidden(name) {
      continue;
    }
    if path.file_stem().and_then(|s| s.to_str()) == Some(NOT_FOUND_STEM) {
      return Ok(Some(name.to_string()));
    }
  }
  Ok(None)
}

fn is_hidden(name: &str) -> bool {
  name.starts_with('.')
}

/// Kebab-case a path segment the way routes appear in URLs: word breaks at
/// lower-to-upper case boundaries, at the end of an uppercase run followed
/// by a lowercase letter (`HTTPServer` -> `http-server`), at letter/digit
/// boundaries, and at any run of non-alphanumeric characters.
pub fn kebab_case(s: &str) -> String {
  let mut out = String::with_capacity(s.len() + 4);
  let chars: Vec<char> = s.chars().collect();
  let mut prev: Option<char> = None;

  for (i, &c) in chars.iter().enumerate() {
    if !c.is_ascii_alphanumeric() {
      prev = Some(c);
      continue;
    }
    let next = chars.get(i + 1).copied();
    let boundary = match prev {
      None => false,
      Some(p) if !p.is_ascii_alphanumeric() => !out.is_empty(),
      Some(p) => {
        (p.is_ascii_lowercase() && c.is_ascii_uppercase())
          || (p.is_ascii_uppercase()
            && c.is_ascii_uppercase()
            && next.is_some_and(|n| n.is_ascii_lowercase()))
          || (p.is_ascii_alphabetic() && c.is_ascii_digit())
          || (p.is_ascii_digit() && c.is_ascii_alphabetic())
      }
    };
    if boundary {
      out.push('-');
    }
    out.push(c.to_ascii_lowercase());
    prev = Some(c);
  }

  out
}
