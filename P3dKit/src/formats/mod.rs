//! File format handlers
//!
//! Only the `Pure3D` chunk format lives here for now; other engine formats
//! would sit alongside it as sibling modules.

pub mod p3d;

// Re-export the common entry points
pub use p3d::{ChunkType, P3dChunk, P3dFile, parse_chunk_tree};
