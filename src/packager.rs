//! External packager location and invocation
//!
//! Chrome does the actual packing via `--pack-extension` (Opera ignores
//! the flag, so the installed Chrome binary is used even for .nex
//! output). On Windows the executable is found through the registry; no
//! other platform has a lookup, and those fail explicitly instead of
//! running an empty path.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackagerError {
    #[error("no packager lookup is implemented for this platform")]
    UnsupportedPlatform,

    #[error("failed to locate the packager executable")]
    Lookup(#[source] std::io::Error),

    #[error("failed to run {executable}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("packager failed ({status}):\n{output}")]
    ToolFailed {
        status: std::process::ExitStatus,
        /// Combined stdout and stderr of the tool.
        output: String,
    },
}

#[cfg(windows)]
pub fn locate_packager() -> Result<PathBuf, PackagerError> {
    use winreg::enums::HKEY_LOCAL_MACHINE;
    use winreg::RegKey;

    const CHROME_KEY: &str =
        r"Software\Clients\StartMenuInternet\Google Chrome\shell\open\command";

    let key = RegKey::predef(HKEY_LOCAL_MACHINE)
        .open_subkey(CHROME_KEY)
        .map_err(PackagerError::Lookup)?;
    let command: String = key.get_value("").map_err(PackagerError::Lookup)?;

    Ok(PathBuf::from(command.trim_matches('"')))
}

#[cfg(not(windows))]
pub fn locate_packager() -> Result<PathBuf, PackagerError> {
    Err(PackagerError::UnsupportedPlatform)
}

/// Run the packager over the staging directory, producing an archive
/// named `<staging dir>.<ext>` next to it. Both paths are handed to the
/// tool as absolute paths.
pub fn pack(executable: &Path, staging_dir: &Path, key: &Path) -> Result<(), PackagerError> {
    let staging_dir = absolutize(staging_dir);
    let key = absolutize(key);

    let output = Command::new(executable)
        .arg(format!("--pack-extension={}", staging_dir.display()))
        .arg(format!("--pack-extension-key={}", key.display()))
        .output()
        .map_err(|source| PackagerError::Spawn {
            executable: executable.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(PackagerError::ToolFailed {
            status: output.status,
            output: combined,
        });
    }

    Ok(())
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
