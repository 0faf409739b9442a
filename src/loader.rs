//! Asset loading: filename resolution plus mapped, copied, and line-split reads.
//!
//! This module provides the [`AssetLoader`], the crate's entry point. It owns
//! the prioritized search path list and layers three read shapes over it:
//!
//! - zero-copy access through a consumer callback ([`AssetLoader::with_mapped_file`])
//!   or a retained handle ([`AssetLoader::map_file`])
//! - whole-buffer copy-out into a NUL-terminated allocation
//!   ([`AssetLoader::read_whole_file`])
//! - newline-delimited record extraction ([`AssetLoader::file_get_lines`])
//!
//! No state persists across read calls: each one resolves, maps, and releases
//! independently. The loader never interprets the bytes it hands out; images,
//! configs, and scripts are the embedding application's concern.

pub mod buffer;
pub mod lines;
pub mod mapping;
pub mod search_path;

pub use buffer::OwnedBuffer;
pub use mapping::{MappedFile, RetentionPolicy};
pub use search_path::{SearchPath, SearchPathList};

use crate::error::{AssetError, Result};
use log::debug;
use std::path::Path;

/// Resolves logical filenames against prioritized search directories and
/// exposes their contents through memory-mapped reads.
///
/// Strictly synchronous: every operation blocks the calling thread for the
/// full duration of directory scanning, mapping setup and teardown, and any
/// caller-supplied consumer logic. Search paths are appended through
/// `&mut self` and read through `&self`, so setup-then-resolve discipline is
/// enforced by the borrow rules; there is no internal locking.
#[derive(Debug, Default)]
pub struct AssetLoader {
    search_paths: SearchPathList,
}

impl AssetLoader {
    /// Create a loader with no search paths registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader pre-populated with search paths, in priority order of
    /// the iterator (the last path yielded shadows all others).
    pub fn with_paths(paths: impl IntoIterator<Item = SearchPath>) -> Self {
        let mut loader = Self::new();
        loader.add_paths(paths);
        loader
    }

    /// Append search paths at the highest priority.
    ///
    /// Accumulates across repeated calls; never deduplicates or reorders.
    pub fn add_paths(&mut self, paths: impl IntoIterator<Item = SearchPath>) {
        self.search_paths.add_all(paths);
        debug!("search path list now has {} entries", self.search_paths.len());
    }

    /// The registered search paths, in insertion order
    pub fn search_paths(&self) -> &SearchPathList {
        &self.search_paths
    }

    /// Search path containing `filename`, preferring the most recently added.
    ///
    /// # Errors
    /// `NotFound` if no registered search path contains the file.
    pub fn resolve(&self, filename: &str) -> Result<&SearchPath> {
        self.search_paths
            .find(filename)
            .ok_or_else(|| AssetError::not_found(filename))
    }

    /// Byte length of `filename` resolved against the search paths.
    ///
    /// # Errors
    /// `NotFound` if no search path contains the file, `StatFailed` if the
    /// metadata probe on the resolved path errors.
    pub fn file_size(&self, filename: &str) -> Result<u64> {
        let dir = self.resolve(filename)?;
        probe_size(&dir.join(filename))
    }

    /// Byte length of `filename` within one explicit search path, bypassing
    /// resolution.
    ///
    /// # Errors
    /// `StatFailed` if the metadata probe errors.
    pub fn file_size_in(&self, filename: &str, path: &SearchPath) -> Result<u64> {
        probe_size(&path.join(filename))
    }

    /// Resolve `filename` and hand its mapped contents to `consumer`.
    ///
    /// The `&[u8]` view is valid only for the duration of the consumer call;
    /// the mapping and its descriptor are released before this method
    /// returns. The consumer's return value becomes the success value.
    pub fn with_mapped_file<T>(
        &self,
        filename: &str,
        consumer: impl FnOnce(&[u8]) -> T,
    ) -> Result<T> {
        self.with_mapped_file_policy(filename, consumer, RetentionPolicy::ImmediateUnload)
    }

    /// [`with_mapped_file`](Self::with_mapped_file) with an explicit
    /// retention policy.
    ///
    /// # Errors
    /// `NotImplemented` for [`RetentionPolicy::DeferredUnload`], before any
    /// filesystem work happens; retained mappings go through
    /// [`map_file`](Self::map_file) instead. Otherwise the resolution and
    /// mapping errors of [`map_file`](Self::map_file).
    pub fn with_mapped_file_policy<T>(
        &self,
        filename: &str,
        consumer: impl FnOnce(&[u8]) -> T,
        policy: RetentionPolicy,
    ) -> Result<T> {
        if policy == RetentionPolicy::DeferredUnload {
            return Err(AssetError::NotImplemented {
                feature: "deferred unload through the callback interface (use map_file)",
            });
        }

        let mapped = self.map_file(filename)?;
        let value = consumer(mapped.as_bytes());
        mapped.close();
        Ok(value)
    }

    /// Resolve `filename` and return its mapping as an owned handle.
    ///
    /// The handle keeps the mapping and descriptor alive past this call and
    /// releases both exactly once, on drop or explicit
    /// [`close`](MappedFile::close).
    ///
    /// # Errors
    /// `NotFound` from resolution; `StatFailed`, `SizeUnrepresentable`,
    /// `OpenFailed`, or `MapFailed` from mapping setup.
    pub fn map_file(&self, filename: &str) -> Result<MappedFile> {
        let dir = self.resolve(filename)?;
        debug!("loading {} from {}", filename, dir);
        MappedFile::open(dir.join(filename))
    }

    /// Resolve `filename` and copy its full contents into a caller-owned,
    /// NUL-terminated buffer.
    ///
    /// The mapping is released before this method returns; the buffer is an
    /// independent allocation of content length plus one trailing zero byte.
    pub fn read_whole_file(&self, filename: &str) -> Result<OwnedBuffer> {
        self.with_mapped_file(filename, OwnedBuffer::copy_from)
    }

    /// Resolve `filename` and split its contents into `'\n'`-terminated
    /// records.
    ///
    /// Returns independent string copies; the intermediate buffer is released
    /// before returning. An unterminated trailing segment is not emitted (see
    /// [`lines::split_lines`] for the exact scan semantics).
    pub fn file_get_lines(&self, filename: &str) -> Result<Vec<String>> {
        let buffer = self.read_whole_file(filename)?;
        Ok(lines::split_lines(&buffer))
    }
}

/// Metadata probe for a file's byte length
fn probe_size(path: &Path) -> Result<u64> {
    let metadata =
        std::fs::metadata(path).map_err(|e| AssetError::stat_failed(path.to_path_buf(), e))?;
    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    /// Create a directory containing the given (name, content) pairs
    fn create_asset_dir(files: &[(&str, &[u8])]) -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp directory");
        for (name, content) in files {
            let mut file =
                std::fs::File::create(dir.path().join(name)).expect("Failed to create asset");
            file.write_all(content).expect("Failed to write asset");
        }
        dir
    }

    #[test]
    fn test_resolve_reports_not_found() {
        let dir = create_asset_dir(&[("unit.cfg", b"infantry")]);
        let loader = AssetLoader::with_paths([SearchPath::new(dir.path())]);

        let err = loader.resolve("missing.cfg").unwrap_err();
        match err {
            AssetError::NotFound { filename } => assert_eq!(filename, "missing.cfg"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_prefers_later_registration() {
        let base = create_asset_dir(&[("unit.cfg", b"base")]);
        let mods = create_asset_dir(&[("unit.cfg", b"modded")]);

        let mut loader = AssetLoader::with_paths([SearchPath::new(base.path())]);
        loader.add_paths([SearchPath::new(mods.path())]);

        let buffer = loader.read_whole_file("unit.cfg").unwrap();
        assert_eq!(buffer.as_bytes(), b"modded");
    }

    #[test]
    fn test_with_mapped_file_returns_consumer_value() {
        let dir = create_asset_dir(&[("unit.cfg", b"abcdef")]);
        let loader = AssetLoader::with_paths([SearchPath::new(dir.path())]);

        let length = loader.with_mapped_file("unit.cfg", |bytes| bytes.len()).unwrap();
        assert_eq!(length, 6);
    }

    #[test]
    fn test_deferred_policy_is_rejected_up_front() {
        // Rejected even for files that do not exist: the policy check comes
        // before any filesystem work.
        let loader = AssetLoader::new();

        let result = loader.with_mapped_file_policy(
            "anything.bin",
            |_| unreachable!("consumer must not run"),
            RetentionPolicy::DeferredUnload,
        );

        match result {
            Err(AssetError::NotImplemented { .. }) => {}
            other => panic!("expected NotImplemented, got {other:?}"),
        }
    }

    #[test]
    fn test_map_file_outlives_the_call() {
        let dir = create_asset_dir(&[("unit.cfg", b"retained contents")]);
        let loader = AssetLoader::with_paths([SearchPath::new(dir.path())]);

        let mapped = loader.map_file("unit.cfg").unwrap();
        assert_eq!(mapped.as_bytes(), b"retained contents");
        assert_eq!(mapped.path(), dir.path().join("unit.cfg"));
    }

    #[test]
    fn test_file_size_and_explicit_path_probe() {
        let base = create_asset_dir(&[("unit.cfg", b"12345")]);
        let mods = create_asset_dir(&[("unit.cfg", b"123456789")]);

        let loader =
            AssetLoader::with_paths([SearchPath::new(base.path()), SearchPath::new(mods.path())]);

        // Resolution-backed size follows shadowing.
        assert_eq!(loader.file_size("unit.cfg").unwrap(), 9);

        // Explicit-path probe bypasses resolution.
        let base_path = SearchPath::new(base.path());
        assert_eq!(loader.file_size_in("unit.cfg", &base_path).unwrap(), 5);

        let err = loader.file_size_in("missing.cfg", &base_path).unwrap_err();
        assert!(matches!(err, AssetError::StatFailed { .. }));
    }

    #[test]
    fn test_file_get_lines_end_to_end() {
        let dir = create_asset_dir(&[("terrain.txt", b"grass\nwater\nrock\n")]);
        let loader = AssetLoader::with_paths([SearchPath::new(dir.path())]);

        let lines = loader.file_get_lines("terrain.txt").unwrap();
        assert_eq!(lines, vec!["grass", "water", "rock"]);
    }

    #[test]
    fn test_each_call_is_independent() {
        let dir = create_asset_dir(&[("unit.cfg", b"stable")]);
        let loader = AssetLoader::with_paths([SearchPath::new(dir.path())]);

        for _ in 0..10 {
            let buffer = loader.read_whole_file("unit.cfg").unwrap();
            assert_eq!(buffer.as_bytes(), b"stable");
        }
    }
}
