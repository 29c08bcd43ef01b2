//! `Pure3D` (`.p3d`) chunk format support
//!
//! A `.p3d` file is a single root chunk whose children are asset chunks,
//! each of which may nest further chunks. This module covers the format
//! layer only: reading fields, building the chunk tree, and writing it back.
//! Turning chunks into assets is the job of [`crate::loaders`].

pub mod chunk;
pub mod chunk_type;
pub mod parser;
pub mod stream;
pub mod writer;

// Public API exports
pub use chunk::{CHUNK_HEADER_SIZE, P3dChunk};
pub use chunk_type::ChunkType;
pub use parser::{MAX_CHUNK_DEPTH, P3dFile, parse_chunk_tree};
pub use stream::{FixedWidth, MAT4_SIZE, MemoryStream};
pub use writer::{ChunkBuilder, joint_chunk, skeleton_chunk};
