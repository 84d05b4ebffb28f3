//! Build configuration
//!
//! The original build script ran off ambient module constants; here they
//! live in an explicit `BuildConfig` handed to every stage, so tests (and
//! the CLI) can redirect paths without touching globals.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Staging directory name, relative to the source root.
    pub build_dir: String,

    /// Name used when the manifest has no usable `name`.
    pub default_name: String,

    /// Signing key handed to the packaging tool. Relative paths are
    /// resolved against the source root.
    pub private_key: PathBuf,

    /// Glob patterns selecting the files that ship.
    pub includes: Vec<String>,

    /// Compound extensions excluded even when an include pattern matches.
    pub ignore_types: Vec<String>,

    /// Extension the packaging tool gives the archive it produces.
    pub source_ext: String,

    /// Extension the final renamed archive gets.
    pub target_ext: String,

    /// Use this executable instead of the platform lookup.
    pub packager_override: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_dir: "build".to_string(),
            default_name: "EXTENSION_NAME".to_string(),
            private_key: PathBuf::from("../[Keys]/ClassicTabs.pem"),
            includes: [
                "_locales/**/messages.json",
                "css/**/*.css",
                "img/**/*.gif",
                "img/**/*.jpg",
                "img/**/*.png",
                "img/**/*.svg",
                "js/**/*.js",
                "**/*LICENSE",
                "manifest.json",
                "LICENSE",
                "README.md",
                "options-page.html",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ignore_types: vec![".min.css".to_string(), ".min.js".to_string()],
            source_ext: "crx".to_string(),
            target_ext: "nex".to_string(),
            packager_override: None,
        }
    }
}
