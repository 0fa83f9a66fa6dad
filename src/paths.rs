/* src/paths.rs */

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Resolved project paths, threaded through every command.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
  /// Project root (directory of shipwright.toml, or the cwd).
  pub base: PathBuf,
  /// Source directory holding `host/` and `ui/`.
  pub input: PathBuf,
  /// Bundler output directory.
  pub output: PathBuf,
  /// Static assets copied verbatim into the bundle.
  pub static_dir: PathBuf,
  /// Packaged artifacts directory.
  pub build: PathBuf,
}

impl ProjectPaths {
  pub fn resolve(base: &Path, input_dir: &str, output_dir: &str) -> Self {
    Self {
      base: base.to_path_buf(),
      input: base.join(input_dir),
      output: base.join(output_dir),
      static_dir: base.join("static"),
      build: base.join("build"),
    }
  }

  /// Directory whose tree shape determines the UI routes.
  pub fn pages_dir(&self) -> PathBuf {
    self.input.join("ui").join("pages")
  }
}

/// Missing input directory is a fatal configuration error for every command
/// that reads project sources.
pub fn ensure_input_exists(paths: &ProjectPaths) -> Result<()> {
  if !paths.input.is_dir() {
    bail!("input directory {} does not exist", paths.input.display());
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolve_joins_against_base() {
    let paths = ProjectPaths::resolve(Path::new("/proj"), "src", "dist");
    assert_eq!(paths.input, Path::new("/proj/src"));
    assert_eq!(paths.output, Path::new("/proj/dist"));
    assert_eq!(paths.static_dir, Path::new("/proj/static"));
    assert_eq!(paths.build, Path::new("/proj/build"));
    assert_eq!(paths.pages_dir(), Path::new("/proj/src/ui/pages"));
  }

  #[test]
  fn ensure_input_exists_errors_on_missing() {
    let tmp = std::env::temp_dir().join("shipwright-test-paths-missing");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(&tmp).unwrap();

    let paths = ProjectPaths::resolve(&tmp, "src", "dist");
    let err = ensure_input_exists(&paths).unwrap_err();
    assert!(err.to_string().contains("does not exist"));

    std::fs::create_dir_all(&paths.input).unwrap();
    assert!(ensure_input_exists(&paths).is_ok());

    let _ = std::fs::remove_dir_all(&tmp);
  }
}
