//! `Skeleton` chunk loader
//!
//! Payload: name (`u8`-prefixed text), version (`u32`), joint count (`u32`).
//! Children: one `SkeletonJoint` chunk per joint, in parent-first order.

use super::context::{Diagnostic, DiagnosticKind, LoadContext};
use super::expect_chunk_type;
use super::registry::Loader;
use super::skeleton_joint::SkeletonJointLoader;
use crate::error::{Error, Result};
use crate::formats::p3d::{ChunkType, P3dChunk};
use crate::skeleton::Skeleton;

/// Loads a `Skeleton` chunk and its joints.
///
/// A joint that fails to decode fails the whole skeleton with
/// [`Error::JointLoadFailed`] rather than becoming a failed entry of its own:
/// later joints address their parents by position, so a gap would rebind them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkeletonLoader {
    joints: SkeletonJointLoader,
}

impl SkeletonLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Loader for SkeletonLoader {
    type Asset = Skeleton;

    fn chunk_type(&self) -> ChunkType {
        ChunkType::SKELETON
    }

    fn load(&self, chunk: &P3dChunk<'_>, ctx: &mut LoadContext) -> Result<Skeleton> {
        expect_chunk_type(chunk, ChunkType::SKELETON)?;

        let mut stream = chunk.stream();
        let name = stream.read_lp_string()?;
        let version = stream.read_u32()?;
        let declared = stream.read_u32()?;

        let mut joints = Vec::with_capacity(chunk.children_of_type(ChunkType::SKELETON_JOINT).count());
        for child in chunk.children() {
            if child.is_type(ChunkType::SKELETON_JOINT) {
                // Later parent indices depend on position, so one bad joint
                // sinks the whole skeleton.
                let joint = self.joints.load(child, ctx).map_err(|e| Error::JointLoadFailed {
                    index: joints.len(),
                    source: Box::new(e),
                })?;
                joints.push(joint);
            } else {
                ctx.unrecognized_child(chunk, child);
            }
        }

        if declared as usize != joints.len() {
            ctx.report(Diagnostic {
                kind: DiagnosticKind::CountMismatch {
                    declared,
                    found: joints.len(),
                },
                chunk_type: chunk.chunk_type(),
                parent_type: None,
                offset: chunk.offset(),
            });
        }

        tracing::debug!("Skeleton '{}': {} joints", name, joints.len());
        Skeleton::assemble(name, version, joints)
    }
}
