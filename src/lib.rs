//! # assetmap - Memory-Mapped Asset File Loading
//!
//! A small, synchronous file-access layer for asset pipelines: logical
//! filenames are resolved against an ordered collection of search directories
//! and exposed to the caller through zero-copy memory mappings.
//!
//! ## Features
//!
//! - **Prioritized Search Paths**: later-registered directories (user
//!   overrides, mod directories) shadow earlier ones without removal or
//!   reordering
//! - **Zero-Copy Reads**: consumers receive a direct view over a read-only
//!   shared mapping, valid for the duration of the callback
//! - **Retained Mappings**: an owned handle keeps a mapping alive past the
//!   loading call, with guaranteed end-of-scope release
//! - **Owned Copy-Out**: NUL-terminated buffers whose lifetime is independent
//!   of any mapping
//! - **Line Splitting**: newline-delimited record extraction from raw bytes
//!
//! Interpreting the bytes (images, text configs, scripts) is the embedding
//! application's responsibility; this layer never parses content beyond
//! newline splitting and never mutates the filesystem.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`loader`] - Search path resolution and memory-mapped file access

// Core modules
pub mod error;
pub mod loader;

// Re-export commonly used types for convenience
pub use error::{AssetError, Result};

// Public API surface for external usage
pub use loader::{AssetLoader, MappedFile, OwnedBuffer, RetentionPolicy, SearchPath, SearchPathList};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
