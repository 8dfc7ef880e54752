//! Mapping of catalog and request paths onto the local video mount.
//!
//! Plex reports paths as its own host sees them, for example
//! `Y:\Movies\Heat (1995)\Heat.mkv` on a Windows server or
//! `/data/media/Movies/...` on another machine. This service sees the same
//! library under a single local root (by default `/video`), so those paths are
//! re-rooted before the file is opened.

use std::path::{Path, PathBuf};

/// Re-roots paths under the local video mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a path reported by the catalog onto the local root.
    ///
    /// - already under the root: unchanged
    /// - `X:\...` or `X:/...`: drive stripped, remainder re-rooted
    /// - `/...` or `\...`: leading separators stripped, remainder re-rooted
    /// - anything else: only the file name is kept and re-rooted
    pub fn map_catalog_path(&self, catalog_path: &str) -> PathBuf {
        let original = Path::new(catalog_path);
        if original.is_absolute() && original.starts_with(&self.root) {
            return original.to_path_buf();
        }

        let normalized = catalog_path.replace('\\', "/");

        let relative = if let Some(rest) = strip_drive_letter(&normalized) {
            rest
        } else if normalized.starts_with('/') {
            normalized.as_str()
        } else {
            let name = normalized.rsplit('/').find(|part| !part.is_empty());
            return match name {
                Some(name) => self.root.join(name),
                None => self.root.clone(),
            };
        };

        self.join_components(relative)
    }

    /// Resolves a path given in a request: absolute paths are kept, relative
    /// ones are joined onto the root.
    pub fn resolve_request_path(&self, request_path: &str) -> PathBuf {
        let path = Path::new(request_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.join_components(request_path)
        }
    }

    fn join_components(&self, relative: &str) -> PathBuf {
        // `.` and `..` are dropped so a mapped path cannot leave the root.
        relative
            .split(['/', '\\'])
            .filter(|part| !part.is_empty() && *part != "." && *part != "..")
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

/// Returns the remainder after a leading `X:` drive designator.
fn strip_drive_letter(path: &str) -> Option<&str> {
    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => Some(&path[2..]),
        _ => None,
    }
}
