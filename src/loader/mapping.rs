//! Memory mapping of resolved asset files.
//!
//! This module provides the MappedFile handle that establishes a read-only,
//! shared memory mapping over one file's full contents. The mapping and its
//! backing descriptor are owned exclusively by the handle and released exactly
//! once, on drop or via [`MappedFile::close`].

use crate::error::{AssetError, Result};
use log::{trace, warn};
use memmap2::Mmap;
use std::fs::File;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// When a mapping and its backing file descriptor are released after use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetentionPolicy {
    /// Release the mapping and close the descriptor before the loading call
    /// returns. The only policy the callback interface supports.
    #[default]
    ImmediateUnload,

    /// Keep the mapping alive past the triggering call.
    ///
    /// Not available through the callback interface; selecting it there fails
    /// with `NotImplemented`. Callers that need a retained mapping use
    /// [`AssetLoader::map_file`](crate::AssetLoader::map_file), which returns
    /// an owned [`MappedFile`] instead.
    DeferredUnload,
}

/// An established read-only mapping over one asset file.
///
/// Dereferences to the mapped bytes. Exclusive owner of both the mapping and
/// the backing file handle; dropping the value (or calling
/// [`close`](MappedFile::close)) unmaps the region and closes the descriptor,
/// guaranteed and exactly once.
///
/// Pages are loaded on demand by the OS as the mapped region is read.
#[derive(Debug)]
pub struct MappedFile {
    mmap: Mmap,

    /// Resolved on-disk path the mapping was established over
    path: PathBuf,

    /// Held so the descriptor lives exactly as long as the mapping
    _file: File,
}

impl MappedFile {
    /// Probe, open, and map the file at `path`.
    ///
    /// # Process
    /// 1. Metadata probe for the byte length (`StatFailed` on error,
    ///    `SizeUnrepresentable` if the length does not fit `usize`)
    /// 2. Open read-only (`OpenFailed`)
    /// 3. Establish a read-only shared mapping over the full length
    ///    (`MapFailed`)
    ///
    /// A handle opened in step 2 is closed on any later failure; nothing
    /// leaks from a partially-established mapping. Zero-length files map to
    /// an empty view.
    pub(crate) fn open(path: PathBuf) -> Result<Self> {
        let metadata =
            std::fs::metadata(&path).map_err(|e| AssetError::stat_failed(path.clone(), e))?;

        let size = metadata.len();
        if usize::try_from(size).is_err() {
            return Err(AssetError::SizeUnrepresentable { path, size });
        }

        let file = File::open(&path).map_err(|e| AssetError::open_failed(path.clone(), e))?;

        let mmap = unsafe {
            Mmap::map(&file).map_err(|e| AssetError::map_failed(path.clone(), e))?
        };

        // Advise kernel about our access pattern on Unix systems
        #[cfg(unix)]
        {
            if let Err(e) = mmap.advise(memmap2::Advice::Sequential) {
                // Non-fatal - log and continue
                warn!("failed to set mmap advice for {}: {}", path.display(), e);
            }
        }

        trace!("mapped {} ({} bytes)", path.display(), mmap.len());

        Ok(Self {
            mmap,
            path,
            _file: file,
        })
    }

    /// Resolved on-disk path the mapping was established over
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Length of the mapped region in bytes
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    /// Whether the mapped file is empty
    pub fn is_empty(&self) -> bool {
        self.mmap.len() == 0
    }

    /// The mapped bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap[..]
    }

    /// Release the mapping and close the backing descriptor.
    ///
    /// Equivalent to dropping the value; provided so call sites can make the
    /// release point explicit. Release cannot fail.
    pub fn close(self) {
        trace!("unmapping {}", self.path.display());
    }
}

impl Deref for MappedFile {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.mmap[..]
    }
}

impl AsRef<[u8]> for MappedFile {
    fn as_ref(&self) -> &[u8] {
        &self.mmap[..]
    }
}
