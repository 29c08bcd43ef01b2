//! Chunk loaders
//!
//! A [`Loader`] turns one chunk type into a domain object. Loaders are
//! collected in a [`LoaderRegistry`], which dispatches on the chunk type tag.
//! Each loader checks the tag itself as well, so calling one directly on
//! the wrong chunk is an error rather than garbage.

pub mod context;
pub mod registry;
pub mod skeleton;
pub mod skeleton_joint;

pub use context::{Diagnostic, DiagnosticKind, LoadContext};
pub use registry::{LoadedAsset, Loader, LoaderRegistry};
pub use skeleton::SkeletonLoader;
pub use skeleton_joint::SkeletonJointLoader;

use crate::error::{Error, Result};
use crate::formats::p3d::{ChunkType, P3dChunk};

/// Check that `chunk` has the type a loader expects.
///
/// # Errors
/// Returns [`Error::PreconditionViolation`] on mismatch.
pub fn expect_chunk_type(chunk: &P3dChunk<'_>, expected: ChunkType) -> Result<()> {
    if chunk.is_type(expected) {
        Ok(())
    } else {
        Err(Error::PreconditionViolation {
            expected,
            found: chunk.chunk_type(),
        })
    }
}
