use p3dkit::prelude::*;
use p3dkit::formats::p3d::{joint_chunk, skeleton_chunk};
use glam::{Mat4, Vec3};
use pretty_assertions::assert_eq;

/// Route `tracing` output through the test harness's captured stdout.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn biped() -> Skeleton {
    let joints = vec![
        SkeletonJoint::new("pelvis"),
        SkeletonJoint::new("spine")
            .with_parent(0)
            .with_rest_pose(Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0))),
        SkeletonJoint::new("head")
            .with_parent(1)
            .with_rest_pose(Mat4::from_translation(Vec3::new(0.0, 0.7, 0.0))),
        SkeletonJoint::new("l_thigh")
            .with_parent(0)
            .with_rest_pose(Mat4::from_translation(Vec3::new(0.2, -0.1, 0.0))),
    ];
    Skeleton::assemble("biped", 1, joints).unwrap()
}

/// A joint chunk whose rest pose is cut short.
fn truncated_joint() -> ChunkBuilder {
    ChunkBuilder::new(ChunkType::SKELETON_JOINT)
        .with_lp_string("broken")
        .with_u32(ROOT_PARENT)
        .with_i32(0)
}

fn sample_file() -> Vec<u8> {
    ChunkBuilder::p3d_file()
        .with_child(ChunkBuilder::new(ChunkType::HISTORY).with_lp_string("exported"))
        .with_child(skeleton_chunk(&biped()))
        .with_child(truncated_joint())
        .with_child(joint_chunk(&SkeletonJoint::new("prop_root")))
        .to_bytes()
}

#[test]
fn test_decode_full_file() {
    init_tracing();
    let report = decode_p3d(&sample_file(), &LoaderRegistry::with_defaults()).unwrap();

    // History has no loader, so three entries
    assert_eq!(report.assets.len(), 3);
    let indices: Vec<_> = report.assets.iter().map(|e| e.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);

    let skeletons: Vec<_> = report.skeletons().collect();
    assert_eq!(skeletons.len(), 1);
    assert_eq!(skeletons[0], &biped());

    let head = skeletons[0].find_joint("head").unwrap();
    let world = skeletons[0].world_rest_poses();
    let head_pos = world[head].transform_point3(Vec3::ZERO);
    assert!((head_pos - Vec3::new(0.0, 1.2, 0.0)).length() < 1e-6);

    let joints: Vec<_> = report.assets_of::<SkeletonJoint>().map(|j| j.name.as_str()).collect();
    assert_eq!(joints, vec!["prop_root"]);
}

#[test]
fn test_corrupt_asset_does_not_stop_siblings() {
    init_tracing();
    let report = decode_p3d(&sample_file(), &LoaderRegistry::with_defaults()).unwrap();

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].index, 2);
    assert_eq!(failures[0].chunk_type, ChunkType::SKELETON_JOINT);
    assert!(matches!(
        failures[0].result,
        Err(Error::StreamExhausted { .. })
    ));

    assert_eq!(report.successes().count(), 2);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::UnregisteredChunk);
    assert_eq!(report.diagnostics[0].chunk_type, ChunkType::HISTORY);
}

#[test]
fn test_parallel_matches_sequential() {
    init_tracing();
    let mut file = ChunkBuilder::p3d_file();
    for i in 0..32 {
        if i % 5 == 0 {
            file.push_child(truncated_joint());
        } else if i % 7 == 0 {
            file.push_child(ChunkBuilder::new(ChunkType::MESH));
        } else {
            file.push_child(skeleton_chunk(&biped()));
        }
    }
    let bytes = file.to_bytes();
    let registry = LoaderRegistry::with_defaults();

    let sequential = decode_p3d(&bytes, &registry).unwrap();
    let parallel = decode_p3d_with_options(
        &bytes,
        &registry,
        &DecodeOptions::default().with_parallel(true),
    )
    .unwrap();

    let summary = |report: &DecodeReport| -> Vec<(usize, bool)> {
        report.assets.iter().map(|e| (e.index, e.is_ok())).collect()
    };
    assert_eq!(summary(&sequential), summary(&parallel));
    assert_eq!(sequential.diagnostics, parallel.diagnostics);

    let seq_skeletons: Vec<_> = sequential.skeletons().collect();
    let par_skeletons: Vec<_> = parallel.skeletons().collect();
    assert_eq!(seq_skeletons, par_skeletons);
}

#[test]
fn test_malformed_file_aborts() {
    init_tracing();
    let mut bytes = sample_file();
    // Inflate the skeleton chunk's total size past the end of the file
    let skeleton_offset = 12 + ChunkBuilder::new(ChunkType::HISTORY)
        .with_lp_string("exported")
        .total_size();
    bytes[skeleton_offset + 8..skeleton_offset + 12].copy_from_slice(&u32::MAX.to_le_bytes());

    let err = decode_p3d(&bytes, &LoaderRegistry::with_defaults()).unwrap_err();
    assert!(matches!(err, Error::MalformedChunk { offset, .. } if offset == skeleton_offset));
}

#[test]
fn test_not_a_p3d_file() {
    init_tracing();
    let bytes = skeleton_chunk(&biped()).to_bytes();
    let err = decode_p3d(&bytes, &LoaderRegistry::with_defaults()).unwrap_err();
    assert!(matches!(err, Error::InvalidP3dSignature(0x4500)));
}

/// Reads a texture chunk's name and dimensions.
struct TextureLoader;

#[derive(Debug, PartialEq)]
struct Texture {
    name: String,
    width: u32,
    height: u32,
}

impl Loader for TextureLoader {
    type Asset = Texture;

    fn chunk_type(&self) -> ChunkType {
        ChunkType::TEXTURE
    }

    fn load(&self, chunk: &P3dChunk<'_>, ctx: &mut LoadContext) -> Result<Texture> {
        expect_chunk_type(chunk, ChunkType::TEXTURE)?;
        let mut stream = chunk.stream();
        let texture = Texture {
            name: stream.read_lp_string()?,
            width: stream.read_u32()?,
            height: stream.read_u32()?,
        };
        for child in chunk.children() {
            ctx.unrecognized_child(chunk, child);
        }
        Ok(texture)
    }
}

#[test]
fn test_registering_new_loader() {
    init_tracing();
    let bytes = ChunkBuilder::p3d_file()
        .with_child(
            ChunkBuilder::new(ChunkType::TEXTURE)
                .with_lp_string("skin.bmp")
                .with_u32(64)
                .with_u32(32)
                .with_child(ChunkBuilder::new(ChunkType::IMAGE)),
        )
        .with_child(skeleton_chunk(&biped()))
        .to_bytes();

    let mut registry = LoaderRegistry::with_defaults();
    registry.register(TextureLoader);

    let report = decode_p3d(&bytes, &registry).unwrap();
    let textures: Vec<_> = report.assets_of::<Texture>().collect();
    assert_eq!(
        textures,
        vec![&Texture {
            name: "skin.bmp".to_string(),
            width: 64,
            height: 32,
        }]
    );
    assert_eq!(report.skeletons().count(), 1);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].chunk_type, ChunkType::IMAGE);
}

#[test]
fn test_loader_rejects_wrong_chunk() {
    init_tracing();
    let bytes = ChunkBuilder::new(ChunkType::SKELETON).to_bytes();
    let chunk = parse_chunk_tree(&bytes).unwrap();
    let err = SkeletonJointLoader::new()
        .load(&chunk, &mut LoadContext::new())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::PreconditionViolation {
            expected: ChunkType::SKELETON_JOINT,
            found: ChunkType::SKELETON,
        }
    ));
}
