//! Parsed chunk tree nodes

use super::chunk_type::ChunkType;
use super::stream::MemoryStream;

/// Size of a chunk header: type, data size, total size.
pub const CHUNK_HEADER_SIZE: usize = 12;

/// One node of a parsed chunk tree.
///
/// The payload borrows the source buffer; children are owned in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct P3dChunk<'a> {
    pub(crate) chunk_type: ChunkType,
    pub(crate) offset: usize,
    pub(crate) data: &'a [u8],
    pub(crate) total_size: usize,
    pub(crate) children: Vec<P3dChunk<'a>>,
}

impl<'a> P3dChunk<'a> {
    pub fn chunk_type(&self) -> ChunkType {
        self.chunk_type
    }

    pub fn is_type(&self, chunk_type: ChunkType) -> bool {
        self.chunk_type == chunk_type
    }

    /// Absolute offset of the chunk header in the source buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The chunk's own fixed-layout fields, header excluded.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Header plus payload, as stored in the header's second field.
    pub fn data_size(&self) -> usize {
        CHUNK_HEADER_SIZE + self.data.len()
    }

    /// Header, payload and all descendants.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn children(&self) -> &[P3dChunk<'a>] {
        &self.children
    }

    pub fn children_of_type(&self, chunk_type: ChunkType) -> impl Iterator<Item = &P3dChunk<'a>> {
        self.children.iter().filter(move |c| c.chunk_type == chunk_type)
    }

    /// A reader over this chunk's payload.
    pub fn stream(&self) -> MemoryStream<'a> {
        MemoryStream::new(self.data)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(P3dChunk::node_count).sum::<usize>()
    }
}
