//! Staging builder
//!
//! Assembles a clean copy of every shippable file under the staging
//! directory, mirroring each file's path relative to the source root.
//! The staging directory is erased first so nothing from a previous run
//! survives.

use crate::config::BuildConfig;
use crate::utils::paths::{create_dir_retrying, split_compound_ext};
use anyhow::{Context, Result};
use glob::{glob, Pattern};
use std::fs;
use std::path::Path;

const MKDIR_RETRIES: u32 = 10;

/// Erase and rebuild the staging directory from the inclusion list.
/// Returns the number of files copied.
pub fn build_staging(config: &BuildConfig, source_root: &Path) -> Result<usize> {
    let staging = source_root.join(&config.build_dir);

    if staging.exists() {
        fs::remove_dir_all(&staging).with_context(|| {
            format!("Failed to clear staging directory {}", staging.display())
        })?;
    }
    create_dir_retrying(&staging, MKDIR_RETRIES).with_context(|| {
        format!("Failed to create staging directory {}", staging.display())
    })?;

    // The root itself is a literal path, not pattern syntax: a source
    // directory like "v[1]" must not corrupt the glob.
    let root_prefix = Pattern::escape(&source_root.to_string_lossy());
    let root_prefix = root_prefix.trim_end_matches(|c| c == '/' || c == '\\');

    let mut copied = 0;
    for include in &config.includes {
        let pattern = format!("{root_prefix}/{include}");

        let matches = glob(&pattern)
            .with_context(|| format!("Invalid include pattern {include}"))?;

        for entry in matches {
            let path = entry.context("Failed to read glob match")?;
            if !path.is_file() {
                continue;
            }
            // A broad pattern like **/*LICENSE must not pick up files
            // already copied into staging earlier in this run.
            if path.starts_with(&staging) {
                continue;
            }
            if is_ignored(config, &path) {
                continue;
            }

            let relative = path
                .strip_prefix(source_root)
                .context("Glob match escaped the source root")?;
            let dest = staging.join(relative);

            if let Some(parent) = dest.parent() {
                create_dir_retrying(parent, MKDIR_RETRIES)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::copy(&path, &dest)
                .with_context(|| format!("Failed to copy {}", path.display()))?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Ignore suffixes match against the lower-cased compound extension.
fn is_ignored(config: &BuildConfig, path: &Path) -> bool {
    let (_, ext) = split_compound_ext(&path.to_string_lossy());
    let ext = ext.to_lowercase();
    config.ignore_types.iter().any(|t| *t == ext)
}
