//! `Pure3D` chunk type identifiers

use std::fmt;

/// A chunk type tag, the first `u32` of every chunk header.
///
/// Kept open (a newtype rather than an enum) so files containing chunk
/// types this crate has no loader for still parse and can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkType(pub u32);

impl ChunkType {
    /// Root chunk of every `.p3d` file (`"P3D\xFF"` read little-endian).
    pub const P3D_FILE: Self = Self(0xFF443350);

    pub const MESH: Self = Self(0x10000);
    pub const SKIN: Self = Self(0x10001);
    pub const SHADER: Self = Self(0x11000);
    pub const TEXTURE: Self = Self(0x19000);
    pub const IMAGE: Self = Self(0x19001);
    pub const ANIMATION: Self = Self(0x121000);

    pub const SKELETON: Self = Self(0x4500);
    pub const SKELETON_JOINT: Self = Self(0x4501);
    pub const SKELETON_JOINT_MIRROR_MAP: Self = Self(0x4503);
    pub const SKELETON_JOINT_BONE_PRESERVE: Self = Self(0x4504);

    pub const HISTORY: Self = Self(0x7000);
    pub const EXPORT_INFO: Self = Self(0x7030);

    /// Raw tag value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Human-readable name for known tags.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::P3D_FILE => "P3DFile",
            Self::MESH => "Mesh",
            Self::SKIN => "Skin",
            Self::SHADER => "Shader",
            Self::TEXTURE => "Texture",
            Self::IMAGE => "Image",
            Self::ANIMATION => "Animation",
            Self::SKELETON => "Skeleton",
            Self::SKELETON_JOINT => "SkeletonJoint",
            Self::SKELETON_JOINT_MIRROR_MAP => "SkeletonJointMirrorMap",
            Self::SKELETON_JOINT_BONE_PRESERVE => "SkeletonJointBonePreserve",
            Self::HISTORY => "History",
            Self::EXPORT_INFO => "ExportInfo",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u32> for ChunkType {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} (0x{:X})", self.0),
            None => write!(f, "0x{:X}", self.0),
        }
    }
}
