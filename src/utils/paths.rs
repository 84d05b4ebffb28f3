//! Path helper functions

use std::io;
use std::path::Path;

/// Split off an extension at the last dot of the final path component.
/// A component that is nothing but leading dots has no extension.
fn splitext(path: &str) -> (&str, &str) {
    let base_start = path.rfind(|c| c == '/' || c == '\\').map_or(0, |i| i + 1);
    let base = &path[base_start..];

    if let Some(dot) = base.rfind('.') {
        if base[..dot].chars().any(|c| c != '.') {
            let split = base_start + dot;
            return (&path[..split], &path[split..]);
        }
    }

    (path, "")
}

/// Split a path into its stem and compound extension, where a compound
/// extension is up to two trailing dot-segments (`foo.min.js` splits into
/// `foo` and `.min.js`).
pub fn split_compound_ext(path: &str) -> (String, String) {
    let (rest, ext1) = splitext(path);
    let (stem, ext2) = splitext(rest);
    (stem.to_string(), format!("{ext2}{ext1}"))
}

/// Create `dir` and any missing parents, retrying on permission errors.
///
/// Windows can report `PermissionDenied` when two creations race on the
/// same parent, so a bounded number of retries is allowed before the
/// error becomes fatal. `create_dir_all` itself is idempotent.
pub fn create_dir_retrying(dir: &Path, max_retries: u32) -> io::Result<()> {
    let mut attempts = 0;
    loop {
        match std::fs::create_dir_all(dir) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied && attempts < max_retries => {
                attempts += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
