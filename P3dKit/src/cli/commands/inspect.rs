//! Chunk tree inspection

use std::path::Path;

use crate::formats::p3d::{P3dChunk, P3dFile};

/// Print the chunk tree of a P3D file.
pub fn execute(path: &Path, max_depth: Option<usize>) -> anyhow::Result<()> {
    let data = std::fs::read(path)?;
    let file = P3dFile::parse(&data)?;

    println!("P3D file: {}", path.display());
    println!("Size:     {} bytes", data.len());
    println!("Chunks:   {}", file.root().node_count());
    println!();

    print_chunk(file.root(), 0, max_depth.unwrap_or(usize::MAX));
    Ok(())
}

fn print_chunk(chunk: &P3dChunk<'_>, depth: usize, max_depth: usize) {
    println!(
        "{:indent$}{} | data {} / total {} bytes @ 0x{:08x}",
        "",
        chunk.chunk_type(),
        chunk.data_size(),
        chunk.total_size(),
        chunk.offset(),
        indent = depth * 2
    );

    if depth >= max_depth {
        if !chunk.children().is_empty() {
            println!("{:indent$}... {} children", "", chunk.children().len(), indent = (depth + 1) * 2);
        }
        return;
    }
    for child in chunk.children() {
        print_chunk(child, depth + 1, max_depth);
    }
}
