//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Creates a secure template when the default file is missing (never for an
//!   explicit FS_MANAGER_CONFIG path).
//!
//! Unknown XML fields are rejected so misconfigurations surface early.

use anyhow::{anyhow, bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor, CONFIG_ENV};
use super::types::{Config, LogLevel};
use crate::backend::StorageArea;
use crate::platform::{set_dir_mode_0700, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "root_path")]
    root_path: Option<String>,
    #[serde(rename = "root_area")]
    root_area: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

/// Outcome of `load_or_init`.
#[derive(Debug)]
pub enum LoadResult {
    /// Parsed from the file at this path.
    Loaded(Config, PathBuf),
    /// No config existed; a template was written here for the user to edit.
    CreatedTemplate(PathBuf),
    /// No config at this path and none was created.
    Missing(PathBuf),
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    cfg.root_path = non_empty(parsed.root_path.as_deref()).map(PathBuf::from);
    if let Some(area) = non_empty(parsed.root_area.as_deref()) {
        cfg.root_area = Some(area.parse::<StorageArea>().map_err(|e| anyhow!(e))?);
    }
    if let Some(level) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = level.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    if let Some(file) = non_empty(parsed.log_file.as_deref()) {
        cfg.log_file = Some(PathBuf::from(file));
    }
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig =
        from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Load the config named by `FS_MANAGER_CONFIG` or the default location.
///
/// When the default file does not exist and `create_template` is set, a template
/// is written and reported as `CreatedTemplate`.
pub fn load_or_init(create_template: bool) -> Result<LoadResult> {
    let path = default_config_path()
        .ok_or_else(|| anyhow!("could not determine a config path; set {CONFIG_ENV}"))?;

    if path.exists() {
        let cfg = load_config_from_xml_path(&path)?;
        return Ok(LoadResult::Loaded(cfg, path));
    }

    let explicit = env::var_os(CONFIG_ENV).is_some_and(|p| !p.is_empty());
    if explicit || !create_template {
        return Ok(LoadResult::Missing(path));
    }

    create_template_config(&path)?;
    Ok(LoadResult::CreatedTemplate(path))
}

/// Create default template config file and parent directory (best-effort permissions).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!("Refusing to create config: ancestor of {} is a symlink", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/fs_manager.log".into());

    let content = format!(
        "<!--\n  fs_manager configuration (XML)\n\n  Root (one of):\n    root_path  -> directory every operation is relative to\n    root_area  -> private_www | private_doc | public_documents | public_downloads\n  root_path wins when both are set.\n\n  Logging:\n    log_level  -> quiet | normal | info | debug\n    log_file   -> path to log file (optional; stderr is still used)\n\n  CLI flags override XML values.\n-->\n<config>\n  <root_area>private_doc</root_area>\n  <log_level>normal</log_level>\n  <log_file>{suggested_log}</log_file>\n</config>\n"
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    info!("Created template config at {}", path.display());
    Ok(())
}
