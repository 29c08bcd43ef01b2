//! Skeleton assembly from an ordered joint list

use glam::Mat4;

use super::joint::SkeletonJoint;
use crate::error::{Error, Result};

/// An assembled joint hierarchy.
///
/// Immutable once built; adjacency is derived from the joints' parent
/// indices during [`Skeleton::assemble`].
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    name: String,
    version: u32,
    joints: Vec<SkeletonJoint>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl Skeleton {
    /// Build the hierarchy in one forward pass.
    ///
    /// Every parent index must be [`super::ROOT_PARENT`] or point at an
    /// earlier joint.
    ///
    /// # Errors
    /// Returns [`Error::MalformedSkeleton`] for the first joint whose parent
    /// index is at or after its own position.
    pub fn assemble(name: impl Into<String>, version: u32, joints: Vec<SkeletonJoint>) -> Result<Self> {
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); joints.len()];
        let mut roots = Vec::new();

        for (i, joint) in joints.iter().enumerate() {
            match joint.parent_index() {
                None => roots.push(i),
                Some(parent) if parent < i => children[parent].push(i),
                Some(_) => {
                    return Err(Error::MalformedSkeleton {
                        joint: i,
                        parent: joint.parent,
                    });
                }
            }
        }

        let name = name.into();
        if roots.len() > 1 {
            tracing::debug!("Skeleton '{}' has {} roots", name, roots.len());
        }

        Ok(Self {
            name,
            version,
            joints,
            children,
            roots,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn joints(&self) -> &[SkeletonJoint] {
        &self.joints
    }

    pub fn joint(&self, index: usize) -> Option<&SkeletonJoint> {
        self.joints.get(index)
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Root joints in source order.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// The first root, if any.
    pub fn root(&self) -> Option<usize> {
        self.roots.first().copied()
    }

    /// Direct children of a joint, in source order.
    pub fn children(&self, index: usize) -> &[usize] {
        self.children.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.joints.get(index).and_then(SkeletonJoint::parent_index)
    }

    pub fn find_joint(&self, name: &str) -> Option<usize> {
        self.joints.iter().position(|j| j.name == name)
    }

    /// Joint indices in depth-first order, roots and siblings in source order.
    pub fn depth_first_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.joints.len());
        // Push in reverse so the first root / child is visited first
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            order.push(idx);
            stack.extend(self.children[idx].iter().rev());
        }
        order
    }

    /// Model-space rest transform of every joint.
    ///
    /// Parents always precede children, so one pass in source order suffices.
    pub fn world_rest_poses(&self) -> Vec<Mat4> {
        let mut world: Vec<Mat4> = Vec::with_capacity(self.joints.len());
        for joint in &self.joints {
            let pose = match joint.parent_index() {
                Some(parent) => world[parent] * joint.rest_pose,
                None => joint.rest_pose,
            };
            world.push(pose);
        }
        world
    }
}
