//! Chunk tree encoding
//!
//! Produces the same header/body layout the parser reads, so anything built
//! here parses back to an identical tree.

use byteorder::{ByteOrder, LittleEndian};
use glam::Mat4;

use super::chunk::CHUNK_HEADER_SIZE;
use super::chunk_type::ChunkType;
use crate::skeleton::{Skeleton, SkeletonJoint};

/// Longest string a `u8` length prefix can describe.
const MAX_LP_STRING_LEN: usize = u8::MAX as usize;

/// An in-memory chunk being assembled for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkBuilder {
    chunk_type: ChunkType,
    data: Vec<u8>,
    children: Vec<ChunkBuilder>,
}

impl ChunkBuilder {
    pub fn new(chunk_type: ChunkType) -> Self {
        Self {
            chunk_type,
            data: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The root chunk of a `.p3d` file.
    pub fn p3d_file() -> Self {
        Self::new(ChunkType::P3D_FILE)
    }

    pub fn chunk_type(&self) -> ChunkType {
        self.chunk_type
    }

    #[must_use]
    pub fn with_u32(mut self, value: u32) -> Self {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, value);
        self.data.extend_from_slice(&buf);
        self
    }

    #[must_use]
    pub fn with_i32(mut self, value: i32) -> Self {
        let mut buf = [0u8; 4];
        LittleEndian::write_i32(&mut buf, value);
        self.data.extend_from_slice(&buf);
        self
    }

    #[must_use]
    pub fn with_f32(mut self, value: f32) -> Self {
        let mut buf = [0u8; 4];
        LittleEndian::write_f32(&mut buf, value);
        self.data.extend_from_slice(&buf);
        self
    }

    /// Append a `u8`-length-prefixed string, truncated to 255 bytes.
    #[must_use]
    pub fn with_lp_string(mut self, value: &str) -> Self {
        let bytes = &value.as_bytes()[..value.len().min(MAX_LP_STRING_LEN)];
        self.data.push(bytes.len() as u8);
        self.data.extend_from_slice(bytes);
        self
    }

    /// Append a matrix as 16 column-major `f32` values.
    #[must_use]
    pub fn with_mat4(mut self, value: &Mat4) -> Self {
        let mut buf = [0u8; 64];
        LittleEndian::write_f32_into(&value.to_cols_array(), &mut buf);
        self.data.extend_from_slice(&buf);
        self
    }

    #[must_use]
    pub fn with_bytes(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: ChunkBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: ChunkBuilder) {
        self.children.push(child);
    }

    /// Header plus own fields.
    pub fn data_size(&self) -> usize {
        CHUNK_HEADER_SIZE + self.data.len()
    }

    /// Header, fields and all nested chunks.
    pub fn total_size(&self) -> usize {
        self.data_size() + self.children.iter().map(ChunkBuilder::total_size).sum::<usize>()
    }

    /// Encode this chunk and its descendants.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_size());
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        let mut header = [0u8; CHUNK_HEADER_SIZE];
        LittleEndian::write_u32_into(
            &[
                self.chunk_type.value(),
                self.data_size() as u32,
                self.total_size() as u32,
            ],
            &mut header,
        );
        out.extend_from_slice(&header);
        out.extend_from_slice(&self.data);
        for child in &self.children {
            child.encode_into(out);
        }
    }
}

/// Encode a joint, including its auxiliary chunks.
pub fn joint_chunk(joint: &SkeletonJoint) -> ChunkBuilder {
    let mut chunk = ChunkBuilder::new(ChunkType::SKELETON_JOINT)
        .with_lp_string(&joint.name)
        .with_u32(joint.parent)
        .with_i32(joint.dof)
        .with_i32(joint.free_axis)
        .with_i32(joint.primary_axis)
        .with_i32(joint.secondary_axis)
        .with_i32(joint.twist_axis)
        .with_mat4(&joint.rest_pose);

    if let Some(mirror) = &joint.mirror_map {
        chunk.push_child(
            ChunkBuilder::new(ChunkType::SKELETON_JOINT_MIRROR_MAP)
                .with_u32(mirror.mapped_joint)
                .with_f32(mirror.x_axis_map)
                .with_f32(mirror.y_axis_map)
                .with_f32(mirror.z_axis_map),
        );
    }
    if let Some(preserve) = &joint.bone_preserve {
        chunk.push_child(
            ChunkBuilder::new(ChunkType::SKELETON_JOINT_BONE_PRESERVE)
                .with_u32(preserve.preserve_bone_lengths),
        );
    }
    chunk
}

/// Encode a skeleton container with all of its joints.
pub fn skeleton_chunk(skeleton: &Skeleton) -> ChunkBuilder {
    let mut chunk = ChunkBuilder::new(ChunkType::SKELETON)
        .with_lp_string(skeleton.name())
        .with_u32(skeleton.version())
        .with_u32(skeleton.len() as u32);
    for joint in skeleton.joints() {
        chunk.push_child(joint_chunk(joint));
    }
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::p3d::parser::parse_chunk_tree;
    use crate::formats::p3d::P3dChunk;

    /// Compare a parsed node against the builder that produced it.
    fn assert_same_tree(parsed: &P3dChunk<'_>, built: &ChunkBuilder) {
        assert_eq!(parsed.chunk_type(), built.chunk_type);
        assert_eq!(parsed.data(), built.data.as_slice());
        assert_eq!(parsed.data_size(), built.data_size());
        assert_eq!(parsed.total_size(), built.total_size());
        assert_eq!(parsed.children().len(), built.children.len());
        for (p, b) in parsed.children().iter().zip(&built.children) {
            assert_same_tree(p, b);
        }
    }

    #[test]
    fn test_round_trip_tree() {
        let tree = ChunkBuilder::p3d_file()
            .with_child(
                ChunkBuilder::new(ChunkType::SKELETON)
                    .with_lp_string("biped")
                    .with_u32(0)
                    .with_u32(2)
                    .with_child(
                        ChunkBuilder::new(ChunkType::SKELETON_JOINT)
                            .with_lp_string("root")
                            .with_child(ChunkBuilder::new(ChunkType(0x1234)).with_bytes(&[9, 8, 7])),
                    )
                    .with_child(ChunkBuilder::new(ChunkType::SKELETON_JOINT).with_f32(1.5)),
            )
            .with_child(ChunkBuilder::new(ChunkType::TEXTURE).with_i32(-4))
            .with_child(ChunkBuilder::new(ChunkType::HISTORY));

        let bytes = tree.to_bytes();
        assert_eq!(bytes.len(), tree.total_size());

        let parsed = parse_chunk_tree(&bytes).unwrap();
        assert_same_tree(&parsed, &tree);
    }

    #[test]
    fn test_header_layout() {
        let bytes = ChunkBuilder::new(ChunkType::SKELETON_JOINT)
            .with_u32(0xAABBCCDD)
            .with_child(ChunkBuilder::new(ChunkType::SKELETON_JOINT_BONE_PRESERVE))
            .to_bytes();
        assert_eq!(&bytes[0..4], &[0x01, 0x45, 0x00, 0x00]);
        assert_eq!(&bytes[4..8], &16u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &28u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &[0xDD, 0xCC, 0xBB, 0xAA]);
    }

    #[test]
    fn test_lp_string_truncated() {
        let long = "x".repeat(300);
        let chunk = ChunkBuilder::new(ChunkType(1)).with_lp_string(&long);
        assert_eq!(chunk.data[0], 255);
        assert_eq!(chunk.data.len(), 256);
    }
}
