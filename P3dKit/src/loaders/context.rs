//! Per-load diagnostics

use std::fmt;

use crate::formats::p3d::{ChunkType, P3dChunk};

/// What a [`Diagnostic`] reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A loader met a child chunk it does not understand and skipped it.
    UnrecognizedChild,
    /// A top-level chunk had no registered loader and was skipped.
    UnregisteredChunk,
    /// A container declared a different number of entries than it holds.
    CountMismatch { declared: u32, found: usize },
}

/// A non-fatal condition met while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Type of the chunk the condition is about.
    pub chunk_type: ChunkType,
    /// Type of the enclosing chunk, if any.
    pub parent_type: Option<ChunkType>,
    /// Absolute offset of the chunk header.
    pub offset: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnrecognizedChild => write!(f, "unexpected chunk {}", self.chunk_type)?,
            DiagnosticKind::UnregisteredChunk => write!(f, "no loader for chunk {}", self.chunk_type)?,
            DiagnosticKind::CountMismatch { declared, found } => write!(
                f,
                "{} declares {declared} entries but holds {found}",
                self.chunk_type
            )?,
        }
        if let Some(parent) = self.parent_type {
            write!(f, " in {parent}")?;
        }
        write!(f, " at offset {:#x}", self.offset)
    }
}

/// State threaded through a loader invocation.
///
/// Loaders report skipped or suspicious input here instead of failing.
#[derive(Debug, Default)]
pub struct LoadContext {
    diagnostics: Vec<Diagnostic>,
}

impl LoadContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Record that `child` of `parent` was skipped.
    pub fn unrecognized_child(&mut self, parent: &P3dChunk<'_>, child: &P3dChunk<'_>) {
        self.report(Diagnostic {
            kind: DiagnosticKind::UnrecognizedChild,
            chunk_type: child.chunk_type(),
            parent_type: Some(parent.chunk_type()),
            offset: child.offset(),
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::UnrecognizedChild,
            chunk_type: ChunkType(0x9999),
            parent_type: Some(ChunkType::SKELETON_JOINT),
            offset: 0x40,
        };
        assert_eq!(
            diagnostic.to_string(),
            "unexpected chunk 0x9999 in SkeletonJoint (0x4501) at offset 0x40"
        );
    }
}
