//! `SkeletonJoint` chunk loader
//!
//! Payload layout:
//!
//! | Field          | Type               |
//! |----------------|--------------------|
//! | name           | `u8`-prefixed text |
//! | parent         | `u32`              |
//! | dof            | `i32`              |
//! | free axis      | `i32`              |
//! | primary axis   | `i32`              |
//! | secondary axis | `i32`              |
//! | twist axis     | `i32`              |
//! | rest pose      | 16 x `f32`         |
//!
//! Followed by optional `SkeletonJointMirrorMap` and
//! `SkeletonJointBonePreserve` children.

use super::context::LoadContext;
use super::expect_chunk_type;
use super::registry::Loader;
use crate::error::Result;
use crate::formats::p3d::{ChunkType, P3dChunk};
use crate::skeleton::{BonePreserve, MirrorMap, SkeletonJoint};

#[derive(Debug, Clone, Copy, Default)]
pub struct SkeletonJointLoader;

impl SkeletonJointLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Loader for SkeletonJointLoader {
    type Asset = SkeletonJoint;

    fn chunk_type(&self) -> ChunkType {
        ChunkType::SKELETON_JOINT
    }

    fn load(&self, chunk: &P3dChunk<'_>, ctx: &mut LoadContext) -> Result<SkeletonJoint> {
        expect_chunk_type(chunk, ChunkType::SKELETON_JOINT)?;

        let mut stream = chunk.stream();
        let name = stream.read_lp_string()?;
        let parent = stream.read_u32()?;
        let dof = stream.read_i32()?;
        let free_axis = stream.read_i32()?;
        let primary_axis = stream.read_i32()?;
        let secondary_axis = stream.read_i32()?;
        let twist_axis = stream.read_i32()?;
        let rest_pose = stream.read_mat4()?;

        let mut joint = SkeletonJoint {
            name,
            parent,
            dof,
            free_axis,
            primary_axis,
            secondary_axis,
            twist_axis,
            rest_pose,
            mirror_map: None,
            bone_preserve: None,
        };

        for child in chunk.children() {
            match child.chunk_type() {
                ChunkType::SKELETON_JOINT_MIRROR_MAP => {
                    joint.mirror_map = Some(read_mirror_map(child)?);
                }
                ChunkType::SKELETON_JOINT_BONE_PRESERVE => {
                    joint.bone_preserve = Some(read_bone_preserve(child)?);
                }
                _ => ctx.unrecognized_child(chunk, child),
            }
        }

        Ok(joint)
    }
}

fn read_mirror_map(chunk: &P3dChunk<'_>) -> Result<MirrorMap> {
    let mut stream = chunk.stream();
    Ok(MirrorMap {
        mapped_joint: stream.read_u32()?,
        x_axis_map: stream.read_f32()?,
        y_axis_map: stream.read_f32()?,
        z_axis_map: stream.read_f32()?,
    })
}

fn read_bone_preserve(chunk: &P3dChunk<'_>) -> Result<BonePreserve> {
    let mut stream = chunk.stream();
    Ok(BonePreserve {
        preserve_bone_lengths: stream.read_u32()?,
    })
}
