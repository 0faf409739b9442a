//! Prioritized search directories for logical filename resolution.
//!
//! A [`SearchPathList`] holds directories in insertion order and resolves
//! logical filenames by scanning from the most-recently-added entry backwards.
//! Later registrations (user overrides, mod directories) shadow earlier ones
//! (built-in defaults) without the earlier entries being removed or reordered.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::trace;

/// A single directory consulted during filename resolution.
///
/// Wraps the directory's filesystem path and knows how to join a logical
/// filename onto it using the host's native path semantics. Immutable once
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    root: PathBuf,
}

impl SearchPath {
    /// Create a search path rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Full on-disk path for a logical filename under this directory
    pub fn join(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// The directory this search path is rooted at
    pub fn as_path(&self) -> &Path {
        &self.root
    }

    /// Whether `filename` names an existing, stat-able entry under this directory.
    ///
    /// Existence only; the entry type (regular file, directory, ...) is not
    /// checked. The probe is a metadata query, the analogue of `stat(2)`.
    pub fn contains(&self, filename: &str) -> bool {
        fs::metadata(self.join(filename)).is_ok()
    }
}

impl AsRef<Path> for SearchPath {
    fn as_ref(&self) -> &Path {
        &self.root
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.display().fmt(f)
    }
}

/// Append-only, ordered collection of search paths.
///
/// Insertion order defines priority: later-added entries shadow earlier ones.
/// The list is never reordered or deduplicated; duplicates are legal and the
/// most-recently-added duplicate wins.
#[derive(Debug, Default)]
pub struct SearchPathList {
    paths: Vec<SearchPath>,
}

impl SearchPathList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one search path at the highest priority
    pub fn add(&mut self, path: SearchPath) {
        trace!("search path added: {}", path);
        self.paths.push(path);
    }

    /// Append search paths in order; the last one added ends up highest priority.
    ///
    /// Accumulates across repeated calls, never deduplicates.
    pub fn add_all(&mut self, paths: impl IntoIterator<Item = SearchPath>) {
        for path in paths {
            self.add(path);
        }
    }

    /// Number of registered search paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no search paths are registered
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Registered search paths in insertion (reverse-priority) order
    pub fn iter(&self) -> impl Iterator<Item = &SearchPath> {
        self.paths.iter()
    }

    /// First search path containing `filename`, scanning in reverse insertion
    /// order so the most-recently-added containing path wins.
    pub fn find(&self, filename: &str) -> Option<&SearchPath> {
        self.paths.iter().rev().find(|path| path.contains(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    /// Create a directory containing the named files
    fn create_asset_dir(files: &[&str]) -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp directory");
        for name in files {
            let mut file =
                std::fs::File::create(dir.path().join(name)).expect("Failed to create asset");
            file.write_all(b"content").expect("Failed to write asset");
        }
        dir
    }

    #[test]
    fn test_join_uses_native_semantics() {
        let path = SearchPath::new("/data/assets");
        assert_eq!(path.join("terrain.png"), PathBuf::from("/data/assets/terrain.png"));
    }

    #[test]
    fn test_contains_checks_existence_only() {
        let dir = create_asset_dir(&["present.cfg"]);
        let path = SearchPath::new(dir.path());

        assert!(path.contains("present.cfg"));
        assert!(!path.contains("absent.cfg"));

        // A subdirectory is also an existing, stat-able entry.
        std::fs::create_dir(dir.path().join("textures")).unwrap();
        assert!(path.contains("textures"));
    }

    #[test]
    fn test_find_prefers_most_recently_added() {
        let base = create_asset_dir(&["unit.cfg"]);
        let mods = create_asset_dir(&["unit.cfg"]);

        let mut list = SearchPathList::new();
        list.add(SearchPath::new(base.path()));
        list.add(SearchPath::new(mods.path()));

        let resolved = list.find("unit.cfg").expect("file present in both dirs");
        assert_eq!(resolved.as_path(), mods.path());
    }

    #[test]
    fn test_find_falls_back_to_earlier_paths() {
        let base = create_asset_dir(&["base_only.cfg"]);
        let mods = create_asset_dir(&["mod_only.cfg"]);

        let mut list = SearchPathList::new();
        list.add_all([SearchPath::new(base.path()), SearchPath::new(mods.path())]);

        let resolved = list.find("base_only.cfg").expect("present in base dir");
        assert_eq!(resolved.as_path(), base.path());
    }

    #[test]
    fn test_find_missing_returns_none() {
        let base = create_asset_dir(&["unit.cfg"]);

        let mut list = SearchPathList::new();
        list.add(SearchPath::new(base.path()));

        assert!(list.find("no_such_file.cfg").is_none());
    }

    #[test]
    fn test_duplicates_accumulate() {
        let dir = create_asset_dir(&["unit.cfg"]);

        let mut list = SearchPathList::new();
        list.add(SearchPath::new(dir.path()));
        list.add(SearchPath::new(dir.path()));

        assert_eq!(list.len(), 2);
        let resolved = list.find("unit.cfg").expect("duplicate paths still resolve");
        assert_eq!(resolved.as_path(), dir.path());
    }

    #[test]
    fn test_empty_list_finds_nothing() {
        let list = SearchPathList::new();
        assert!(list.is_empty());
        assert!(list.find("anything").is_none());
    }
}
