//! Configuration loading, validation, and env substitution.
//!
//! Config files: `zincsaver.toml`, `zincsaver.yaml`, or `zincsaver.json`
//! Searched in `./` then `~/.config/zincsaver/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values, plus a small set
//! of `ZINCSAVER_*` overrides applied after parsing.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{apply_env_overrides, config_dir, discover_and_load, load_config},
    schema::{CobaltConfig, TelegramConfig, ZincConfig},
    validate::{Diagnostic, Severity, ValidationResult, validate},
};
