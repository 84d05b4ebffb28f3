//! Browser extension packager
//!
//! Stages a whitelisted copy of an extension source tree, scrubs
//! test-only resources from the staged manifest, resolves the
//! extension's display name, and drives Chrome's `--pack-extension` to
//! produce a signed archive named after the extension.

pub mod config;
pub mod metadata;
pub mod models;
pub mod packager;
pub mod sanitizer;
pub mod stager;
pub mod utils;

pub use config::BuildConfig;
pub use packager::PackagerError;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// What a completed build produced.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Resolved display name the archive was renamed after.
    pub name: String,
    /// Number of files copied into staging.
    pub files_staged: usize,
    /// Final archive path.
    pub archive: PathBuf,
}

/// Run the full packaging pipeline against `source_root`.
pub fn build_package(config: &BuildConfig, source_root: &Path) -> Result<BuildSummary> {
    let staging = source_root.join(&config.build_dir);

    // 1. Copy the shippable files into a clean staging directory
    let files_staged = stager::build_staging(config, source_root)?;

    // 2. Drop manifest references to files that did not ship
    sanitizer::sanitize_manifest(&staging)?;

    // 3. Resolve the name the archive should carry
    let name = metadata::resolve_name(config, source_root)?;

    // 4. Pack the staging directory into a signed archive
    let executable = match &config.packager_override {
        Some(path) => path.clone(),
        None => packager::locate_packager()?,
    };
    let key = if config.private_key.is_absolute() {
        config.private_key.clone()
    } else {
        source_root.join(&config.private_key)
    };
    packager::pack(&executable, &staging, &key)?;

    // 5. The tool names its archive after the staging directory; rename
    //    it after the extension
    let build_name = staging
        .file_name()
        .and_then(|n| n.to_str())
        .context("Staging directory has no usable name")?;
    let produced = source_root.join(format!("{build_name}.{}", config.source_ext));
    let archive = source_root.join(format!("{name}.{}", config.target_ext));
    fs::rename(&produced, &archive).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            produced.display(),
            archive.display()
        )
    })?;

    Ok(BuildSummary {
        name,
        files_staged,
        archive,
    })
}
