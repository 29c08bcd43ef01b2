//! Skeleton joint data

use glam::Mat4;

/// Parent index marking a joint with no parent.
pub const ROOT_PARENT: u32 = 0xFFFF_FFFF;

/// Rotation axis referenced by a joint's axis codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Map a raw axis code; codes outside 0..=2 have no known axis.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            _ => None,
        }
    }
}

/// Which joint mirrors this one, and how each axis maps across
/// (`SkeletonJointMirrorMap` child chunk).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorMap {
    pub mapped_joint: u32,
    pub x_axis_map: f32,
    pub y_axis_map: f32,
    pub z_axis_map: f32,
}

/// `SkeletonJointBonePreserve` child chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonePreserve {
    pub preserve_bone_lengths: u32,
}

impl BonePreserve {
    pub fn preserves_lengths(&self) -> bool {
        self.preserve_bone_lengths != 0
    }
}

/// A decoded `SkeletonJoint` chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonJoint {
    pub name: String,
    /// Index of the parent joint, or [`ROOT_PARENT`].
    pub parent: u32,
    /// Degrees-of-freedom code.
    pub dof: i32,
    pub free_axis: i32,
    pub primary_axis: i32,
    pub secondary_axis: i32,
    pub twist_axis: i32,
    /// Bind-time local transform, relative to the parent joint.
    pub rest_pose: Mat4,
    pub mirror_map: Option<MirrorMap>,
    pub bone_preserve: Option<BonePreserve>,
}

impl SkeletonJoint {
    /// A root joint with identity rest pose and zeroed constraint codes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: ROOT_PARENT,
            dof: 0,
            free_axis: 0,
            primary_axis: 0,
            secondary_axis: 0,
            twist_axis: 0,
            rest_pose: Mat4::IDENTITY,
            mirror_map: None,
            bone_preserve: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: u32) -> Self {
        self.parent = parent;
        self
    }

    #[must_use]
    pub fn with_rest_pose(mut self, rest_pose: Mat4) -> Self {
        self.rest_pose = rest_pose;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent == ROOT_PARENT
    }

    /// Parent index, `None` for roots.
    pub fn parent_index(&self) -> Option<usize> {
        (!self.is_root()).then_some(self.parent as usize)
    }

    pub fn twist(&self) -> Option<Axis> {
        Axis::from_code(self.twist_axis)
    }
}
