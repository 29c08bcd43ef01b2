//! Skeleton domain types
//!
//! [`SkeletonJoint`] is what the joint loader produces; [`Skeleton`] folds an
//! ordered joint list into a hierarchy.

mod assemble;
mod info;
mod joint;

pub use assemble::Skeleton;
pub use info::{JointInfo, SkeletonInfo};
pub use joint::{Axis, BonePreserve, MirrorMap, ROOT_PARENT, SkeletonJoint};
