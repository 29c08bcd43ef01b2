//! Chunk tree parser
//!
//! Turns a flat buffer into a [`P3dChunk`] tree without looking at any
//! payload. Layout of every chunk:
//!
//! ```text
//! u32 type
//! u32 data_size    header + own fields
//! u32 total_size   data_size + nested chunks
//! [data_size - 12 bytes of fields]
//! [nested chunks, back-to-back]
//! ```

use byteorder::{ByteOrder, LittleEndian};

use super::chunk::{CHUNK_HEADER_SIZE, P3dChunk};
use super::chunk_type::ChunkType;
use crate::error::{Error, Result};

/// Deepest nesting accepted before the file is treated as corrupt.
pub const MAX_CHUNK_DEPTH: usize = 64;

/// A parsed `.p3d` buffer.
#[derive(Debug, Clone)]
pub struct P3dFile<'a> {
    root: P3dChunk<'a>,
}

impl<'a> P3dFile<'a> {
    /// Parse a complete P3D file, checking the root signature.
    ///
    /// # Errors
    /// Returns [`Error::MalformedChunk`] for any structural problem and
    /// [`Error::InvalidP3dSignature`] if the root chunk is not a file chunk.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        if data.len() >= 4 {
            let tag = LittleEndian::read_u32(&data[..4]);
            if tag != ChunkType::P3D_FILE.value() {
                return Err(Error::InvalidP3dSignature(tag));
            }
        }

        let root = parse_chunk_tree(data)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &P3dChunk<'a> {
        &self.root
    }

    /// Top-level asset chunks.
    pub fn chunks(&self) -> &[P3dChunk<'a>] {
        self.root.children()
    }
}

/// Parse the chunk at the start of `data` and everything nested in it.
///
/// Bytes after the first chunk are ignored.
///
/// # Errors
/// Returns [`Error::MalformedChunk`] if any header is truncated or declares a
/// size that does not fit its enclosing span.
pub fn parse_chunk_tree(data: &[u8]) -> Result<P3dChunk<'_>> {
    let root = read_chunk(data, 0, data.len(), 0)?;

    let trailing = data.len() - root.total_size;
    if trailing > 0 {
        tracing::warn!(
            "{} trailing bytes after root chunk {}",
            trailing,
            root.chunk_type
        );
    }

    tracing::debug!(
        "Parsed chunk tree: root {} with {} nodes",
        root.chunk_type,
        root.node_count()
    );
    Ok(root)
}

/// Read the chunk starting at `offset`, which must end at or before `end`.
fn read_chunk(buf: &[u8], offset: usize, end: usize, depth: usize) -> Result<P3dChunk<'_>> {
    if depth > MAX_CHUNK_DEPTH {
        return Err(Error::malformed(
            offset,
            format!("nesting deeper than {MAX_CHUNK_DEPTH} chunks"),
        ));
    }

    let available = end - offset;
    if available < CHUNK_HEADER_SIZE {
        return Err(Error::malformed(
            offset,
            format!("truncated chunk header: {available} of {CHUNK_HEADER_SIZE} bytes"),
        ));
    }

    let header = &buf[offset..offset + CHUNK_HEADER_SIZE];
    let chunk_type = ChunkType(LittleEndian::read_u32(&header[0..4]));
    let data_size = LittleEndian::read_u32(&header[4..8]) as usize;
    let total_size = LittleEndian::read_u32(&header[8..12]) as usize;

    if data_size < CHUNK_HEADER_SIZE {
        return Err(Error::malformed(
            offset,
            format!("{chunk_type}: data size {data_size} smaller than header"),
        ));
    }
    if total_size < data_size {
        return Err(Error::malformed(
            offset,
            format!("{chunk_type}: total size {total_size} smaller than data size {data_size}"),
        ));
    }
    if total_size > available {
        return Err(Error::malformed(
            offset,
            format!("{chunk_type}: total size {total_size} exceeds {available} remaining bytes"),
        ));
    }

    let data = &buf[offset + CHUNK_HEADER_SIZE..offset + data_size];
    let chunk_end = offset + total_size;

    let mut children = Vec::new();
    let mut pos = offset + data_size;
    while pos < chunk_end {
        let child = read_chunk(buf, pos, chunk_end, depth + 1)?;
        pos += child.total_size;
        children.push(child);
    }

    Ok(P3dChunk {
        chunk_type,
        offset,
        data,
        total_size,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::p3d::writer::ChunkBuilder;

    fn header(tag: u32, data_size: u32, total_size: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&tag.to_le_bytes());
        bytes.extend_from_slice(&data_size.to_le_bytes());
        bytes.extend_from_slice(&total_size.to_le_bytes());
        bytes
    }

    #[test]
    fn test_total_size_past_buffer() {
        let mut bytes = header(0x4501, 16, 64);
        bytes.extend_from_slice(&[0; 4]);
        let err = parse_chunk_tree(&bytes).unwrap_err();
        assert!(matches!(err, Error::MalformedChunk { offset: 0, .. }));
    }

    #[test]
    fn test_child_past_parent() {
        let child = header(0x4503, 12, 40);
        let mut bytes = header(0x4501, 12, 24);
        bytes.extend_from_slice(&child);
        // room in the buffer, but not inside the parent
        bytes.extend_from_slice(&[0; 28]);
        let err = parse_chunk_tree(&bytes).unwrap_err();
        assert!(matches!(err, Error::MalformedChunk { offset: 12, .. }));
    }

    #[test]
    fn test_truncated_header() {
        let bytes = [0x01, 0x45, 0x00];
        assert!(matches!(
            parse_chunk_tree(&bytes),
            Err(Error::MalformedChunk { offset: 0, .. })
        ));
        assert!(matches!(
            parse_chunk_tree(&[]),
            Err(Error::MalformedChunk { offset: 0, .. })
        ));
    }

    #[test]
    fn test_data_size_smaller_than_header() {
        let bytes = header(0x4501, 4, 12);
        assert!(matches!(
            parse_chunk_tree(&bytes),
            Err(Error::MalformedChunk { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut chunk = ChunkBuilder::new(ChunkType(1));
        for _ in 0..=MAX_CHUNK_DEPTH {
            chunk = ChunkBuilder::new(ChunkType(1)).with_child(chunk);
        }
        let bytes = chunk.to_bytes();
        assert!(matches!(
            parse_chunk_tree(&bytes),
            Err(Error::MalformedChunk { .. })
        ));
    }

    #[test]
    fn test_payload_and_children() {
        let bytes = ChunkBuilder::new(ChunkType::SKELETON_JOINT)
            .with_u32(7)
            .with_child(ChunkBuilder::new(ChunkType(0xAAAA)).with_u32(1))
            .with_child(ChunkBuilder::new(ChunkType(0xBBBB)))
            .to_bytes();

        let root = parse_chunk_tree(&bytes).unwrap();
        assert_eq!(root.chunk_type(), ChunkType::SKELETON_JOINT);
        assert_eq!(root.data(), &7u32.to_le_bytes());
        assert_eq!(root.total_size(), bytes.len());
        let tags: Vec<_> = root.children().iter().map(P3dChunk::chunk_type).collect();
        assert_eq!(tags, vec![ChunkType(0xAAAA), ChunkType(0xBBBB)]);
        assert_eq!(root.children()[0].offset(), 16);
        assert_eq!(root.children()[1].offset(), 32);
    }

    #[test]
    fn test_file_signature() {
        let bytes = ChunkBuilder::new(ChunkType::SKELETON).to_bytes();
        assert!(matches!(
            P3dFile::parse(&bytes),
            Err(Error::InvalidP3dSignature(0x4500))
        ));

        let bytes = ChunkBuilder::p3d_file()
            .with_child(ChunkBuilder::new(ChunkType::SKELETON))
            .to_bytes();
        let file = P3dFile::parse(&bytes).unwrap();
        assert_eq!(file.chunks().len(), 1);
    }
}
