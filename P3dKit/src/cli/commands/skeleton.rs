//! Skeleton CLI commands

use std::path::Path;

use crate::decoder::{DecodeOptions, DecodeReport, decode_p3d_with_options};
use crate::loaders::LoaderRegistry;
use crate::skeleton::{Skeleton, SkeletonInfo};

fn decode_file(path: &Path, parallel: bool) -> anyhow::Result<DecodeReport> {
    let data = std::fs::read(path)?;
    let registry = LoaderRegistry::with_defaults();
    let options = DecodeOptions::default().with_parallel(parallel);
    Ok(decode_p3d_with_options(&data, &registry, &options)?)
}

/// Print every skeleton in a P3D file as an indented hierarchy.
pub fn print(path: &Path, parallel: bool) -> anyhow::Result<()> {
    println!("Decoding P3D file: {}", path.display());
    println!();

    let report = decode_file(path, parallel)?;

    let mut found = 0;
    for skeleton in report.skeletons() {
        found += 1;
        print_skeleton(skeleton);
        println!();
    }
    if found == 0 {
        println!("Skeletons: None");
    }

    if report.has_failures() {
        println!("Failed chunks:");
        for entry in report.failures() {
            if let Err(e) = &entry.result {
                println!("  [{:3}] {} @ 0x{:08x}: {}", entry.index, entry.chunk_type, entry.offset, e);
            }
        }
        println!();
    }

    if !report.diagnostics.is_empty() {
        println!("Diagnostics ({}):", report.diagnostics.len());
        for diagnostic in &report.diagnostics {
            println!("  - {diagnostic}");
        }
    }

    Ok(())
}

fn print_skeleton(skeleton: &Skeleton) {
    println!(
        "Skeleton: {} (version {}, {} joints, {} root(s))",
        skeleton.name(),
        skeleton.version(),
        skeleton.len(),
        skeleton.roots().len()
    );
    println!("--------");

    // Depth of each joint; parents come first so one pass is enough
    let mut depths = vec![0usize; skeleton.len()];
    for (i, joint) in skeleton.joints().iter().enumerate() {
        if let Some(parent) = joint.parent_index() {
            depths[i] = depths[parent] + 1;
        }
    }

    for idx in skeleton.depth_first_order() {
        let Some(joint) = skeleton.joint(idx) else {
            continue;
        };
        let t = joint.rest_pose.w_axis;
        println!(
            "  {:indent$}[{idx:3}] {} (dof {}) at ({:.3}, {:.3}, {:.3})",
            "",
            joint.name,
            joint.dof,
            t.x,
            t.y,
            t.z,
            indent = depths[idx] * 2
        );
    }
}

/// Write skeleton summaries to JSON.
pub fn export_json(path: &Path, output: &Path) -> anyhow::Result<()> {
    println!("Exporting skeletons to JSON: {}", path.display());

    let report = decode_file(path, false)?;
    let skeletons: Vec<SkeletonInfo> = report.skeletons().map(SkeletonInfo::from).collect();
    let json = serde_json::to_string_pretty(&skeletons)?;
    std::fs::write(output, json)?;

    println!("Written {} skeleton(s) to: {}", skeletons.len(), output.display());
    Ok(())
}
