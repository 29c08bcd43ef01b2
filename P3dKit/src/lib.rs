//! # `P3dKit`
//!
//! A pure-Rust decoder for `Pure3D` (`.p3d`) chunk files.
//!
//! A `.p3d` file is a tree of typed, length-delimited chunks. Decoding runs
//! in two stages:
//!
//! 1. [`formats::p3d::parser`] turns the byte buffer into a [`P3dChunk`] tree
//!    without interpreting any payload.
//! 2. A [`LoaderRegistry`] maps each chunk type to a [`Loader`] that decodes
//!    it into a domain object, such as a [`Skeleton`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use p3dkit::prelude::*;
//!
//! let data = std::fs::read("character.p3d")?;
//! let registry = LoaderRegistry::with_defaults();
//! let report = decode_p3d(&data, &registry)?;
//!
//! for skeleton in report.skeletons() {
//!     println!("{}: {} joints", skeleton.name(), skeleton.len());
//! }
//! for failed in report.failures() {
//!     println!("chunk {} failed", failed.index);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Adding a loader
//!
//! Implement [`Loader`] for the new chunk type and register it; the
//! dispatch code does not change.
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `p3dkit` command-line binary

pub mod error;
pub mod formats;
pub mod loaders;
pub mod skeleton;
pub mod decoder;

// Re-exports for convenience
pub use error::{Error, Result};
pub use formats::p3d::{ChunkType, P3dChunk, P3dFile};
pub use loaders::{Loader, LoaderRegistry};
pub use skeleton::{Skeleton, SkeletonJoint};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::p3d::{
        ChunkBuilder, ChunkType, MemoryStream, P3dChunk, P3dFile, parse_chunk_tree,
    };
    pub use crate::loaders::{
        Diagnostic, DiagnosticKind, LoadContext, LoadedAsset, Loader, LoaderRegistry,
        SkeletonJointLoader, SkeletonLoader, expect_chunk_type,
    };
    pub use crate::skeleton::{ROOT_PARENT, Skeleton, SkeletonInfo, SkeletonJoint};
    pub use crate::decoder::{
        AssetEntry, DecodeOptions, DecodeReport, decode_p3d, decode_p3d_with_options,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
