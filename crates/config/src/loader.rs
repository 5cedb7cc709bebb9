use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, warn},
};

use crate::{env_subst::substitute_env, schema::ZincConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "zincsaver.toml",
    "zincsaver.yaml",
    "zincsaver.yml",
    "zincsaver.json",
];

/// Load config from the given path (any supported format).
///
/// Environment overrides are applied on top of the parsed file.
pub fn load_config(path: &Path) -> anyhow::Result<ZincConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    let mut config = parse_config(&raw, path)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./zincsaver.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/zincsaver/zincsaver.{toml,yaml,yml,json}` (user-global)
///
/// Falls back to defaults (plus env overrides) if no file is found or the
/// file fails to parse.
pub fn discover_and_load() -> ZincConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    let mut config = ZincConfig::default();
    apply_env_overrides(&mut config);
    config
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    let config_dir = config_dir()?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| config_dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/zincsaver/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "zincsaver").map(|d| d.config_dir().to_path_buf())
}

/// Apply `ZINCSAVER_*` environment overrides.
pub fn apply_env_overrides(config: &mut ZincConfig) {
    apply_env_overrides_with(config, |name| std::env::var(name).ok());
}

fn apply_env_overrides_with(config: &mut ZincConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(token) = lookup("ZINCSAVER_TELEGRAM_TOKEN") {
        debug!("telegram token overridden from environment");
        config.telegram.token = Secret::new(token);
    }
    if let Some(url) = lookup("ZINCSAVER_COBALT_URL") {
        config.cobalt.url = url;
    }
    if let Some(key) = lookup("ZINCSAVER_COBALT_API_KEY") {
        config.cobalt.api_key = Some(Secret::new(key));
    }
    if let Some(agent) = lookup("ZINCSAVER_COBALT_USER_AGENT") {
        config.cobalt.user_agent = agent;
    }
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<ZincConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}
