//! Error types and handling infrastructure for assetmap.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types covering filename resolution and memory-mapped file access.
//!
//! ## Design Principles
//!
//! - **Context preservation**: every filesystem failure names the path involved
//!   and carries the underlying `std::io::Error` as its source
//! - **No internal recovery**: all failures surface synchronously to the
//!   immediate caller; retry and fallback belong to the embedding application
//! - **Consistency**: standardized Result type across all modules

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for assetmap operations.
///
/// This enum covers all failure conditions of filename resolution, metadata
/// probing, and memory mapping. Unmapping and descriptor release cannot fail:
/// both happen on drop and are guaranteed, so no teardown variants exist.
#[derive(Error, Debug)]
pub enum AssetError {
    /// No search path contains the requested file
    #[error("file not found in any search path: {filename}")]
    NotFound { filename: String },

    /// Metadata probe on a resolved path failed
    #[error("failed to stat file: {path}")]
    StatFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The reported file length does not fit in an in-memory size
    ///
    /// Only reachable on targets where `usize` is narrower than the
    /// filesystem's length type.
    #[error("file size {size} of {path} is not representable in memory")]
    SizeUnrepresentable { path: PathBuf, size: u64 },

    /// A read-only handle could not be obtained
    #[error("failed to open file: {path}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Memory mapping setup failed
    #[error("failed to memory map file: {path}")]
    MapFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A requested behavior exists in the interface but has no implementation
    #[error("not implemented: {feature}")]
    NotImplemented { feature: &'static str },
}

/// Standard Result type for assetmap operations.
///
/// This type alias provides a consistent error handling interface across
/// all modules in the assetmap codebase.
pub type Result<T> = std::result::Result<T, AssetError>;

impl AssetError {
    /// Create a NotFound error for the given logical filename
    pub fn not_found(filename: impl Into<String>) -> Self {
        Self::NotFound {
            filename: filename.into(),
        }
    }

    /// Create a StatFailed error naming the probed path
    pub fn stat_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StatFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an OpenFailed error naming the path that could not be opened
    pub fn open_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OpenFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a MapFailed error naming the path that could not be mapped
    pub fn map_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::MapFailed {
            path: path.into(),
            source,
        }
    }
}
