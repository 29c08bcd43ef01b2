//! Whole-file decoding
//!
//! Parses a `.p3d` buffer and runs every top-level chunk through a
//! [`LoaderRegistry`]. Structural damage aborts the decode; a failing asset
//! only marks its own entry as failed.

use rayon::prelude::*;

use crate::error::Result;
use crate::formats::p3d::{ChunkType, P3dChunk, P3dFile};
use crate::loaders::{Diagnostic, DiagnosticKind, LoadContext, LoadedAsset, LoaderRegistry};
use crate::skeleton::Skeleton;

/// Options for [`decode_p3d_with_options`].
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Decode top-level chunks on the rayon thread pool.
    pub parallel: bool,
}

impl DecodeOptions {
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Outcome of loading one top-level chunk.
#[derive(Debug)]
pub struct AssetEntry {
    /// Position among the file's top-level chunks.
    pub index: usize,
    pub chunk_type: ChunkType,
    /// Absolute offset of the chunk header.
    pub offset: usize,
    pub result: Result<LoadedAsset>,
}

impl AssetEntry {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything a decode produced, in source order.
#[derive(Debug, Default)]
pub struct DecodeReport {
    pub assets: Vec<AssetEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DecodeReport {
    /// Successfully loaded assets.
    pub fn successes(&self) -> impl Iterator<Item = &LoadedAsset> {
        self.assets.iter().filter_map(|entry| entry.result.as_ref().ok())
    }

    /// Entries whose loader failed.
    pub fn failures(&self) -> impl Iterator<Item = &AssetEntry> {
        self.assets.iter().filter(|entry| entry.result.is_err())
    }

    /// Loaded assets of type `T`.
    pub fn assets_of<T: 'static>(&self) -> impl Iterator<Item = &T> {
        self.successes().filter_map(LoadedAsset::downcast_ref::<T>)
    }

    pub fn skeletons(&self) -> impl Iterator<Item = &Skeleton> {
        self.assets_of::<Skeleton>()
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Decode a P3D file with default options.
///
/// # Errors
/// Returns an error only if the chunk structure itself is broken; per-asset
/// failures are reported inside the [`DecodeReport`].
pub fn decode_p3d(data: &[u8], registry: &LoaderRegistry) -> Result<DecodeReport> {
    decode_p3d_with_options(data, registry, &DecodeOptions::default())
}

/// Decode a P3D file.
///
/// # Errors
/// See [`decode_p3d`].
pub fn decode_p3d_with_options(
    data: &[u8],
    registry: &LoaderRegistry,
    options: &DecodeOptions,
) -> Result<DecodeReport> {
    let file = P3dFile::parse(data)?;
    let chunks = file.chunks();

    tracing::debug!(
        "Decoding {} top-level chunks{}",
        chunks.len(),
        if options.parallel { " in parallel" } else { "" }
    );

    let outcomes: Vec<(Option<AssetEntry>, Vec<Diagnostic>)> = if options.parallel {
        chunks
            .par_iter()
            .enumerate()
            .map(|(index, chunk)| decode_chunk(index, chunk, registry))
            .collect()
    } else {
        chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| decode_chunk(index, chunk, registry))
            .collect()
    };

    let mut report = DecodeReport::default();
    for (entry, diagnostics) in outcomes {
        report.diagnostics.extend(diagnostics);
        if let Some(entry) = entry {
            if let Err(e) = &entry.result {
                tracing::warn!("Failed to load {} at offset {:#x}: {}", entry.chunk_type, entry.offset, e);
            }
            report.assets.push(entry);
        }
    }

    tracing::debug!(
        "Decoded {} assets ({} failed, {} diagnostics)",
        report.assets.len(),
        report.failures().count(),
        report.diagnostics.len()
    );
    Ok(report)
}

/// Load one top-level chunk with its own context.
fn decode_chunk(
    index: usize,
    chunk: &P3dChunk<'_>,
    registry: &LoaderRegistry,
) -> (Option<AssetEntry>, Vec<Diagnostic>) {
    let mut ctx = LoadContext::new();

    if !registry.contains(chunk.chunk_type()) {
        ctx.report(Diagnostic {
            kind: DiagnosticKind::UnregisteredChunk,
            chunk_type: chunk.chunk_type(),
            parent_type: Some(ChunkType::P3D_FILE),
            offset: chunk.offset(),
        });
        return (None, ctx.into_diagnostics());
    }

    let result = registry.load(chunk, &mut ctx);
    let diagnostics = if result.is_ok() {
        ctx.into_diagnostics()
    } else {
        // Findings from an abandoned decode describe no asset
        tracing::debug!(
            "Discarding {} diagnostics from failed {}",
            ctx.diagnostics().len(),
            chunk.chunk_type()
        );
        Vec::new()
    };
    let entry = AssetEntry {
        index,
        chunk_type: chunk.chunk_type(),
        offset: chunk.offset(),
        result,
    };
    (Some(entry), diagnostics)
}
