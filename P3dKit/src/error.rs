//! Error types for `P3dKit`

use thiserror::Error;

use crate::formats::p3d::ChunkType;

/// The error type for `P3dKit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Chunk Structure Errors ====================
    /// A chunk header is truncated, inconsistent, or declares a size that
    /// runs past its enclosing span. The rest of the stream cannot be trusted.
    #[error("malformed chunk at offset {offset:#x}: {reason}")]
    MalformedChunk {
        /// Absolute byte offset of the offending chunk header.
        offset: usize,
        /// What is wrong with the header.
        reason: String,
    },

    /// The root chunk does not carry the P3D file signature.
    #[error("invalid P3D signature: expected 0xFF443350, found {0:#010X}")]
    InvalidP3dSignature(u32),

    // ==================== Field Decoding Errors ====================
    /// A fixed-field read ran past the end of a chunk's payload.
    #[error("stream exhausted: requested {requested} bytes, {remaining} remaining")]
    StreamExhausted {
        /// Number of bytes the read needed.
        requested: usize,
        /// Number of bytes left in the stream.
        remaining: usize,
    },

    // ==================== Loader Errors ====================
    /// A loader was handed a chunk of the wrong type.
    #[error("loader expected {expected} chunk, got {found}")]
    PreconditionViolation {
        /// The chunk type the loader decodes.
        expected: ChunkType,
        /// The chunk type it was given.
        found: ChunkType,
    },

    /// No loader is registered for the chunk type.
    #[error("no loader registered for chunk type {0}")]
    UnregisteredChunkType(ChunkType),

    // ==================== Skeleton Errors ====================
    /// A joint's parent index does not reference an earlier joint.
    #[error("malformed skeleton: joint {joint} references parent {parent}")]
    MalformedSkeleton {
        /// Position of the offending joint.
        joint: usize,
        /// The parent index it declared.
        parent: u32,
    },

    /// A joint inside a skeleton chunk failed to decode.
    #[error("failed to load joint {index}: {source}")]
    JointLoadFailed {
        /// Position of the joint among the skeleton's joint chunks.
        index: usize,
        /// The underlying decode failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a [`Error::MalformedChunk`].
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Self::MalformedChunk {
            offset,
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for `P3dKit` operations.
pub type Result<T> = std::result::Result<T, Error>;
