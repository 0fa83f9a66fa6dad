/* src/init.rs */

// `shipwright init`: scaffolds a new project from the embedded template.
// Template files carry `{{=key}}` placeholders that are filled from the
// CLI flags; dotfiles are stored without their leading dot so the template
// directory itself stays inert.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rust_embed::RustEmbed;

use crate::routes::kebab_case;
use crate::ui;

#[derive(RustEmbed)]
#[folder = "template/"]
struct Template;

#[derive(Debug, Clone)]
pub struct InitOptions {
  pub name: String,
  pub product_name: String,
  pub description: Option<String>,
  pub author: Option<String>,
  pub repository: Option<String>,
}

// Files stored without a leading dot so they do not affect this repo.
const DOT_RENAMES: &[&str] = &["gitignore", "editorconfig"];

pub fn run_init(base_dir: &Path, opts: &InitOptions) -> Result<PathBuf> {
  validate_name(&opts.name)?;

  let target = base_dir.join(&opts.name);
  if target.exists() {
    bail!("{} already exists, refusing to overwrite", target.display());
  }

  ui::arrow(&format!("creating {}", target.display()));
  for file in Template::iter() {
    let rel = file.as_ref();
    let content = match Template::get(rel) {
      Some(content) => content,
      None => continue,
    };
    let rendered = interpolate(&String::from_utf8_lossy(content.data.as_ref()), opts);

    let rel = if DOT_RENAMES.contains(&rel) { format!(".{rel}") } else { rel.to_string() };
    let dest = target.join(&rel);
    if let Some(parent) = dest.parent() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&dest, rendered).with_context(|| format!("failed to write {}", dest.display()))?;
    ui::detail(&rel);
  }

  ui::blank();
  ui::ok(&format!("project {} created", opts.name));
  ui::detail(&format!("cd {}", opts.name));
  ui::detail("npm install");
  ui::detail("shipwright dev");
  Ok(target)
}

/// Replace the template code stubs a project may have edited. Used by
/// `shipwright patch` after an upgrade changes the generated glue.
pub fn write_stub(target: &Path, rel: &str, opts: &InitOptions) -> Result<()> {
  let content = Template::get(rel)
    .with_context(|| format!("template does not contain {rel}"))?;
  let rendered = interpolate(&String::from_utf8_lossy(content.data.as_ref()), opts);
  let dest = target.join(rel);
  if let Some(parent) = dest.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  std::fs::write(&dest, rendered).with_context(|| format!("failed to write {}", dest.display()))?;
  Ok(())
}

pub fn stub_files() -> Vec<String> {
  Template::iter()
    .map(|f| f.as_ref().to_string())
    .filter(|f| f.starts_with("src/host/") || f.starts_with("src/ui/"))
    .collect()
}

fn validate_name(name: &str) -> Result<()> {
  if name.is_empty() {
    bail!("project name must not be empty");
  }
  let kebab = kebab_case(name);
  if kebab != name {
    bail!("project name must be kebab-case, try \"{kebab}\"");
  }
  Ok(())
}

fn interpolate(template: &str, opts: &InitOptions) -> String {
  template
    .replace("{{=projectName}}", &opts.name)
    .replace("{{=productName}}", &opts.product_name)
    .replace("{{=description}}", opts.description.as_deref().unwrap_or(""))
    .replace("{{=author}}", opts.author.as_deref().unwrap_or(""))
    .replace("{{=repository}}", opts.repository.as_deref().unwrap_or(""))
}
