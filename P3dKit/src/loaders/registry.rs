//! Loader trait and chunk-type dispatch

use std::any::{Any, type_name};
use std::fmt;

use indexmap::IndexMap;

use super::context::LoadContext;
use super::skeleton::SkeletonLoader;
use super::skeleton_joint::SkeletonJointLoader;
use crate::error::{Error, Result};
use crate::formats::p3d::{ChunkType, P3dChunk};

/// Decodes one chunk type into a domain object.
///
/// Loaders are stateless and shared across threads during parallel decodes.
pub trait Loader: Send + Sync {
    type Asset: Any + Send;

    /// The chunk type this loader accepts.
    fn chunk_type(&self) -> ChunkType;

    /// Decode `chunk`, which must be of [`Loader::chunk_type`].
    ///
    /// # Errors
    /// Returns [`Error::PreconditionViolation`] for a chunk of another type,
    /// or whatever field decoding fails with.
    fn load(&self, chunk: &P3dChunk<'_>, ctx: &mut LoadContext) -> Result<Self::Asset>;
}

/// A type-erased asset produced through the registry.
pub struct LoadedAsset {
    chunk_type: ChunkType,
    type_name: &'static str,
    value: Box<dyn Any + Send>,
}

impl LoadedAsset {
    pub fn new<T: Any + Send>(chunk_type: ChunkType, value: T) -> Self {
        Self {
            chunk_type,
            type_name: type_name::<T>(),
            value: Box::new(value),
        }
    }

    pub fn chunk_type(&self) -> ChunkType {
        self.chunk_type
    }

    /// Rust type name of the wrapped asset.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Take the asset out as `T`, or get `self` back if it is something else.
    pub fn downcast<T: Any>(self) -> std::result::Result<T, Self> {
        let Self {
            chunk_type,
            type_name,
            value,
        } = self;
        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Self {
                chunk_type,
                type_name,
                value,
            }),
        }
    }
}

impl fmt::Debug for LoadedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedAsset")
            .field("chunk_type", &self.chunk_type)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Object-safe view of a [`Loader`], used for storage in the registry.
trait DynLoader: Send + Sync {
    fn load_dyn(&self, chunk: &P3dChunk<'_>, ctx: &mut LoadContext) -> Result<LoadedAsset>;
}

impl<L: Loader> DynLoader for L {
    fn load_dyn(&self, chunk: &P3dChunk<'_>, ctx: &mut LoadContext) -> Result<LoadedAsset> {
        let asset = self.load(chunk, ctx)?;
        Ok(LoadedAsset::new(self.chunk_type(), asset))
    }
}

/// Maps chunk types to loaders.
///
/// New asset types are supported by registering another [`Loader`]; nothing
/// here needs to change.
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: IndexMap<ChunkType, Box<dyn DynLoader>>,
}

impl LoaderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every loader this crate provides.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(SkeletonLoader::new());
        registry.register(SkeletonJointLoader::new());
        registry
    }

    /// Register `loader` for its chunk type, replacing any previous one.
    ///
    /// Returns `true` if a loader was replaced.
    pub fn register<L: Loader + 'static>(&mut self, loader: L) -> bool {
        let chunk_type = loader.chunk_type();
        let replaced = self.loaders.insert(chunk_type, Box::new(loader)).is_some();
        tracing::debug!(
            "Registered loader {} for {}{}",
            type_name::<L>(),
            chunk_type,
            if replaced { " (replaced)" } else { "" }
        );
        replaced
    }

    pub fn contains(&self, chunk_type: ChunkType) -> bool {
        self.loaders.contains_key(&chunk_type)
    }

    /// Registered chunk types in registration order.
    pub fn chunk_types(&self) -> impl Iterator<Item = ChunkType> + '_ {
        self.loaders.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Decode `chunk` with the loader registered for its type.
    ///
    /// # Errors
    /// Returns [`Error::UnregisteredChunkType`] if no loader is registered,
    /// otherwise whatever the loader fails with.
    pub fn load(&self, chunk: &P3dChunk<'_>, ctx: &mut LoadContext) -> Result<LoadedAsset> {
        let loader = self
            .loaders
            .get(&chunk.chunk_type())
            .ok_or(Error::UnregisteredChunkType(chunk.chunk_type()))?;
        tracing::debug!("Loading {} at offset {:#x}", chunk.chunk_type(), chunk.offset());
        loader.load_dyn(chunk, ctx)
    }
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.loaders.keys()).finish()
    }
}
