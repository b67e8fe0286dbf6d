//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Unknown XML fields are rejected so typos surface early.
//! - A missing default file means "use defaults"; a missing `$PATHTREE_CONFIG` file is an error.

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::{CONFIG_ENV, default_config_path};
use super::types::{Config, LogLevel, parse_mode};
use crate::path::RootStyle;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "root_style")]
    root_style: Option<String>,
    #[serde(rename = "path_capacity", default, deserialize_with = "de_usize_trimmed_opt")]
    path_capacity: Option<usize>,
    #[serde(rename = "dir_mode")]
    dir_mode: Option<String>,
    #[serde(rename = "file_mode")]
    file_mode: Option<String>,
}

// Trims surrounding whitespace; anything non-numeric is treated as absent.
fn de_usize_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<usize>().ok()))
}

fn trimmed(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

// Map XmlConfig -> Config, starting from defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = trimmed(&parsed.log_level) {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(|e| anyhow!("config log_level: {e}"))?;
    }
    if let Some(s) = trimmed(&parsed.log_file) {
        cfg.log_file = Some(PathBuf::from(s));
    }
    if let Some(s) = trimmed(&parsed.root_style) {
        cfg.root_style = s
            .parse::<RootStyle>()
            .map_err(|e| anyhow!("config root_style: {e}"))?;
    }
    if let Some(n) = parsed.path_capacity {
        cfg.path_capacity = n;
    }
    if let Some(s) = trimmed(&parsed.dir_mode) {
        cfg.dir_mode = parse_mode(s).ok_or_else(|| anyhow!("config dir_mode: not an octal mode: '{s}'"))?;
    }
    if let Some(s) = trimmed(&parsed.file_mode) {
        cfg.file_mode =
            parse_mode(s).ok_or_else(|| anyhow!("config file_mode: not an octal mode: '{s}'"))?;
    }

    Ok(cfg)
}

/// Parse a Config from XML text.
pub fn parse_config_xml(contents: &str) -> Result<Config> {
    let parsed: XmlConfig = from_xml_str(contents).context("parse config xml")?;
    xml_to_config(parsed)
}

/// Load a Config from a specific XML file path (quick_xml).
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid config '{}'", path.display()))
}

/// Resolve and load the effective configuration file, then validate it.
///
/// Returns the config and the path it was read from (None when defaults were used).
pub fn load_config() -> Result<(Config, Option<PathBuf>)> {
    let env_set = env::var_os(CONFIG_ENV).is_some();
    let path = default_config_path().context("resolve config path")?;

    if !path.exists() {
        if env_set {
            return Err(anyhow!(
                "{CONFIG_ENV} points to '{}', which does not exist",
                path.display()
            ));
        }
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok((Config::default(), None));
    }

    let cfg = load_config_from_xml_path(&path)?;
    cfg.validate()
        .with_context(|| format!("invalid config '{}'", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok((cfg, Some(path)))
}
