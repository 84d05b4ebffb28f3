//! Extension metadata resolution
//!
//! Pulls the display name out of the source manifest, following a
//! `__MSG_<key>__` localization reference through the default locale's
//! message table. Lookup failures degrade to the configured default name
//! instead of aborting the build.

use crate::config::BuildConfig;
use crate::models::{LocaleMessages, Manifest};
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref MSG_PATTERN: Regex = Regex::new(r"^__MSG_(.+)__$").unwrap();
}

/// Resolve the extension's display name from `<source_root>/manifest.json`.
pub fn resolve_name(config: &BuildConfig, source_root: &Path) -> Result<String> {
    let manifest = read_manifest(&source_root.join("manifest.json"))?;
    let name = manifest
        .name
        .clone()
        .unwrap_or_else(|| config.default_name.clone());

    let Some(caps) = MSG_PATTERN.captures(&name) else {
        return Ok(name);
    };
    let key = &caps[1];

    let locale = manifest.default_locale.as_deref().unwrap_or("en_US");
    let messages_path = source_root
        .join("_locales")
        .join(locale)
        .join("messages.json");

    Ok(lookup_message(&messages_path, key).unwrap_or_else(|| config.default_name.clone()))
}

/// Parse a manifest, tolerating a UTF-8 BOM and JSON5-isms like comments.
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    json5::from_str(raw.trim_start_matches('\u{feff}'))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Missing file, bad JSON, missing key: all yield `None`.
fn lookup_message(path: &Path, key: &str) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let messages: LocaleMessages = json5::from_str(raw.trim_start_matches('\u{feff}')).ok()?;
    messages.get(key).map(|m| m.message.clone())
}
