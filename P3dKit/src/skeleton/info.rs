//! Serializable skeleton summaries

use serde::Serialize;

use super::{BonePreserve, Skeleton};

/// Flattened view of a joint for JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct JointInfo {
    pub name: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub dof: i32,
    /// Free, primary, secondary, twist.
    pub axes: [i32; 4],
    /// Column-major.
    pub rest_pose: [f32; 16],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirrored_joint: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_bone_lengths: Option<bool>,
}

/// Summary of an assembled skeleton.
#[derive(Debug, Clone, Serialize)]
pub struct SkeletonInfo {
    pub name: String,
    pub version: u32,
    pub roots: Vec<usize>,
    pub joints: Vec<JointInfo>,
}

impl From<&Skeleton> for SkeletonInfo {
    fn from(skeleton: &Skeleton) -> Self {
        let joints = skeleton
            .joints()
            .iter()
            .enumerate()
            .map(|(i, joint)| JointInfo {
                name: joint.name.clone(),
                parent: joint.parent_index(),
                children: skeleton.children(i).to_vec(),
                dof: joint.dof,
                axes: [
                    joint.free_axis,
                    joint.primary_axis,
                    joint.secondary_axis,
                    joint.twist_axis,
                ],
                rest_pose: joint.rest_pose.to_cols_array(),
                mirrored_joint: joint.mirror_map.map(|m| m.mapped_joint),
                preserve_bone_lengths: joint.bone_preserve.as_ref().map(BonePreserve::preserves_lengths),
            })
            .collect();

        Self {
            name: skeleton.name().to_string(),
            version: skeleton.version(),
            roots: skeleton.roots().to_vec(),
            joints,
        }
    }
}
