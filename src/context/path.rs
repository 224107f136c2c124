//! Path normalization utilities for context cache keys.

use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Normalize a path string into a cache key.
///
/// This function:
/// 1. Normalizes Unicode to NFC
/// 2. Converts backslashes to forward slashes
/// 3. Lower-cases the whole string (hosts on case-insensitive filesystems
///    report the same file with varying case)
/// 4. Removes trailing slashes (except root)
///
/// It is a pure string transformation with no filesystem access, so the same
/// key is produced whether or not the path exists on this machine. The exact
/// same function must run on both cache writes and cache reads or lookups
/// silently miss.
pub fn normalize_key(path: &str) -> String {
    let normalized: String = path.nfc().collect();

    let mut result: String = normalized
        .chars()
        .map(|c| if c == '\\' { '/' } else { c })
        .collect::<String>()
        .to_lowercase();

    while result.len() > 1 && result.ends_with('/') {
        result.pop();
    }

    result
}

/// Canonicalize an on-disk path (resolves symlinks, `..`, `.`).
///
/// Uses `dunce` so Windows paths come back without the `\\?\` prefix.
/// Falls back to the input joined onto the current directory when the path
/// does not exist, so resolution of not-yet-saved documents still yields an
/// absolute candidate.
pub fn to_absolute(path: &Path) -> PathBuf {
    match dunce::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(_) => {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        }
    }
}

/// Absolute string form of a document path, the form contexts are recorded
/// and looked up under.
///
/// Every cache writer and every resolver lookup must go through this: a
/// context recorded under a symlinked or relative spelling of a path would
/// otherwise miss when a later event reports the canonical form.
pub fn absolute_key(path: &str) -> String {
    to_absolute(Path::new(path)).to_string_lossy().into_owned()
}

/// Joins a document directory and document name into one absolute path
/// string, the form the host reports active documents in.
pub fn document_path(directory: &str, name: &str) -> String {
    let joined = Path::new(directory).join(name);
    to_absolute(&joined).to_string_lossy().into_owned()
}
