//! Snapshot source discovery
//!
//! Walks a directory tree and collects every file with the snapshot
//! extension, sorted by path so runs are reproducible.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A snapshot file and the label it is reported under
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotSource {
    pub path: PathBuf,
    /// File stem, e.g. `xnas-20240102` for `Data/aapl/xnas-20240102.csv`
    pub label: String,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, label }
    }
}

/// Recursively find files under `root` whose extension matches `extension`
///
/// The match ignores ASCII case and a leading dot in `extension`.
pub fn discover_sources(root: impl AsRef<Path>, extension: &str) -> Result<Vec<SnapshotSource>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::InvalidRoot(root.display().to_string()));
    }

    let extension = extension.trim_start_matches('.');
    let mut sources = Vec::new();
    walk(root, extension, &mut sources)?;
    sources.sort();

    debug!(
        "discovered {} .{} snapshot(s) under {}",
        sources.len(),
        extension,
        root.display()
    );
    Ok(sources)
}

fn walk(dir: &Path, extension: &str, sources: &mut Vec<SnapshotSource>) -> Result<()> {
    let io_err = |e| Error::Io {
        path: dir.display().to_string(),
        source: e,
    };

    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            walk(&path, extension, sources)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
        {
            sources.push(SnapshotSource::new(path));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_recursive_discovery_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b/2024-01-03.csv"));
        touch(&dir.path().join("a/nested/2024-01-02.CSV"));
        touch(&dir.path().join("a/2024-01-01.csv"));
        touch(&dir.path().join("a/notes.txt"));

        let sources = discover_sources(dir.path(), "csv").unwrap();
        let labels: Vec<&str> = sources.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn test_leading_dot_in_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("snap.csv"));

        let sources = discover_sources(dir.path(), ".csv").unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].label, "snap");
    }

    #[test]
    fn test_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_sources(dir.path(), "csv").unwrap().is_empty());
    }

    #[test]
    fn test_missing_root() {
        let err = discover_sources("/definitely/not/a/dir", "csv").unwrap_err();
        assert!(matches!(err, Error::InvalidRoot(_)));
    }
}
