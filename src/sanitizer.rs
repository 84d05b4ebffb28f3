//! Manifest sanitizer
//!
//! Strips `web_accessible_resources` entries whose files did not make it
//! into staging (typically debug-only pages). This is deliberate text
//! surgery rather than a parse/re-serialize pass: the manifest is
//! hand-formatted and every other byte must survive untouched. Arrays in
//! the MV3 object form do not match the pattern and are left as-is;
//! only plain quoted-string arrays are supported.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;

const BOM: &str = "\u{feff}";

lazy_static! {
    /// Matches the `web_accessible_resources` key, its quoted-string
    /// array, and the comma separating it from the preceding field, so an
    /// emptied field can be dropped without leaving a dangling comma.
    static ref RESOURCE_PATTERN: Regex = Regex::new(
        r#",[^"}]+("web_accessible_resources"\s*:\s*\[\s*((".+"\s*,\s*)*(".+")?)\s*\])"#
    )
    .unwrap();
}

/// Rewrite the staged manifest in place so it only references files that
/// exist under `staging_dir`.
pub fn sanitize_manifest(staging_dir: &Path) -> Result<()> {
    let manifest_path = staging_dir.join("manifest.json");
    let raw = fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;

    // Tolerate a UTF-8 BOM and put it back if it was there.
    let (bom, text) = match raw.strip_prefix(BOM) {
        Some(rest) => (BOM, rest),
        None => ("", raw.as_str()),
    };

    let fixed = filter_resources(text, staging_dir);
    fs::write(&manifest_path, format!("{bom}{fixed}"))
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    Ok(())
}

/// Filter the resource list down to files that exist under `staging_dir`.
/// Pure text transform; no other part of the manifest changes.
pub fn filter_resources(manifest: &str, staging_dir: &Path) -> String {
    RESOURCE_PATTERN
        .replace_all(manifest, |caps: &Captures| {
            let listed = caps.get(2).map_or("", |m| m.as_str());

            let kept: Vec<&str> = listed
                .split(',')
                .map(|f| f.trim().trim_matches('"'))
                .filter(|f| !f.is_empty() && staging_dir.join(f).exists())
                .collect();

            if kept.is_empty() {
                // Drop key, array, and the leading comma in one go
                String::new()
            } else {
                let filestring = kept
                    .iter()
                    .map(|f| format!("\"{f}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                caps.get(0).unwrap().as_str().replacen(listed, &filestring, 1)
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn staging_with(files: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for file in files {
            let path = tmp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "x").unwrap();
        }
        tmp
    }

    const MANIFEST: &str = r#"{
  "name": "Test",
  "version": "1.0",
  "web_accessible_resources": ["debug.html", "img/icon.png"],
  "permissions": ["tabs"]
}"#;

    #[test]
    fn test_missing_files_are_dropped() {
        let staging = staging_with(&["img/icon.png"]);
        let fixed = filter_resources(MANIFEST, staging.path());

        assert!(fixed.contains(r#""web_accessible_resources": ["img/icon.png"]"#));
        assert!(!fixed.contains("debug.html"));
    }

    #[test]
    fn test_field_is_removed_when_nothing_survives() {
        let staging = staging_with(&[]);
        let fixed = filter_resources(MANIFEST, staging.path());

        assert!(!fixed.contains("web_accessible_resources"));
        // The separating comma goes with the field
        assert!(fixed.contains("\"version\": \"1.0\",\n  \"permissions\""));
    }

    #[test]
    fn test_all_existing_files_are_kept() {
        let staging = staging_with(&["debug.html", "img/icon.png"]);
        let fixed = filter_resources(MANIFEST, staging.path());

        assert!(fixed.contains(r#"["debug.html", "img/icon.png"]"#));
    }

    #[test]
    fn test_other_fields_are_untouched() {
        let staging = staging_with(&["img/icon.png"]);
        let fixed = filter_resources(MANIFEST, staging.path());

        assert!(fixed.contains("\"name\": \"Test\""));
        assert!(fixed.contains("\"permissions\": [\"tabs\"]"));
    }

    #[test]
    fn test_idempotent() {
        let staging = staging_with(&["img/icon.png"]);
        let once = filter_resources(MANIFEST, staging.path());
        let twice = filter_resources(&once, staging.path());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_idempotent_after_full_removal() {
        let staging = staging_with(&[]);
        let once = filter_resources(MANIFEST, staging.path());
        let twice = filter_resources(&once, staging.path());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_tolerates_loose_whitespace() {
        let staging = staging_with(&["a.html"]);
        let manifest = "{\n  \"name\": \"T\",\n  \"web_accessible_resources\"  :  [  \"a.html\" ,  \"b.html\"  ]\n}";
        let fixed = filter_resources(manifest, staging.path());

        assert!(fixed.contains("\"a.html\""));
        assert!(!fixed.contains("b.html"));
    }

    #[test]
    fn test_manifest_without_field_is_unchanged() {
        let staging = staging_with(&[]);
        let manifest = "{\n  \"name\": \"T\",\n  \"version\": \"1.0\"\n}";
        assert_eq!(filter_resources(manifest, staging.path()), manifest);
    }

    #[test]
    fn test_object_entries_are_left_alone() {
        // MV3-style arrays of objects fall outside the supported form
        let staging = staging_with(&[]);
        let manifest = r#"{
  "name": "T",
  "web_accessible_resources": [{"resources": ["a.html"], "matches": ["<all_urls>"]}]
}"#;
        assert_eq!(filter_resources(manifest, staging.path()), manifest);
    }

    #[test]
    fn test_sanitize_preserves_bom() {
        let staging = staging_with(&[]);
        let manifest_path = staging.path().join("manifest.json");
        fs::write(&manifest_path, format!("\u{feff}{MANIFEST}")).unwrap();

        sanitize_manifest(staging.path()).unwrap();

        let raw = fs::read_to_string(&manifest_path).unwrap();
        assert!(raw.starts_with('\u{feff}'));
        assert!(!raw.contains("web_accessible_resources"));
    }

    #[test]
    fn test_sanitize_without_bom_adds_none() {
        let staging = staging_with(&["img/icon.png"]);
        let manifest_path = staging.path().join("manifest.json");
        fs::write(&manifest_path, MANIFEST).unwrap();

        sanitize_manifest(staging.path()).unwrap();

        let raw = fs::read_to_string(&manifest_path).unwrap();
        assert!(raw.starts_with('{'));
        assert!(raw.contains("img/icon.png"));
    }
}
