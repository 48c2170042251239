use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vkfossil_arena::Arena;
use vkfossil_hash::ContentHasher;
use vkfossil_types::{DenseIndex, ExternalHandle, ObjectHash, ObjectKind, ObjectRef};

use crate::descriptor::*;
use crate::error::{DecodeError, DecodeResult};

/// What to do with a non-null handle that was never bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandlePolicy {
    /// Fail with a missing-dependency error.
    #[default]
    Strict,
    /// Keep the raw captured value as [`ObjectRef::Unresolved`].
    PassThrough,
}

/// One deduplicated object: its content hash and its descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegistryEntry<D> {
    pub hash: ObjectHash,
    pub descriptor: D,
}

/// Append-only, hash-deduplicated table of descriptors of one kind.
///
/// The position of an entry in the table is its [`DenseIndex`].
pub struct ObjectTable<D> {
    entries: Vec<RegistryEntry<D>>,
    by_hash: HashMap<ObjectHash, DenseIndex>,
}

impl<D> ObjectTable<D> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_hash: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in dense-index order.
    pub fn entries(&self) -> &[RegistryEntry<D>] {
        &self.entries
    }

    pub fn get(&self, index: DenseIndex) -> Option<&RegistryEntry<D>> {
        self.entries.get(index.as_usize())
    }

    pub fn find(&self, hash: &ObjectHash) -> Option<DenseIndex> {
        self.by_hash.get(hash).copied()
    }

    /// Insert unless an entry with the same hash exists. Returns the entry's
    /// index and whether it was newly appended.
    fn insert(
        &mut self,
        kind: ObjectKind,
        hash: ObjectHash,
        descriptor: D,
    ) -> DecodeResult<(DenseIndex, bool)> {
        if let Some(index) = self.find(&hash) {
            return Ok((index, false));
        }
        let index = next_index(kind, self.entries.len())?;
        self.entries.push(RegistryEntry { hash, descriptor });
        self.by_hash.insert(hash, index);
        Ok((index, true))
    }
}

/// The dense index an entry appended to a table of `len` entries receives.
fn next_index(kind: ObjectKind, len: usize) -> DecodeResult<DenseIndex> {
    u32::try_from(len)
        .map(DenseIndex::new)
        .map_err(|_| DecodeError::TableFull { kind })
}

impl<D> Default for ObjectTable<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for ObjectTable<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectTable")
            .field("entry_count", &self.entries.len())
            .finish()
    }
}

/// A descriptor type that has its own table in the [`Recorder`].
pub trait StateDescriptor<'a>: Copy + Serialize + 'a {
    const KIND: ObjectKind;

    fn table<'r>(recorder: &'r Recorder<'a>) -> &'r ObjectTable<Self>;

    fn table_mut<'r>(recorder: &'r mut Recorder<'a>) -> &'r mut ObjectTable<Self>;
}

macro_rules! state_descriptor {
    ($ty:ty, $kind:ident, $field:ident) => {
        impl<'a> StateDescriptor<'a> for $ty {
            const KIND: ObjectKind = ObjectKind::$kind;

            fn table<'r>(recorder: &'r Recorder<'a>) -> &'r ObjectTable<Self> {
                &recorder.$field
            }

            fn table_mut<'r>(recorder: &'r mut Recorder<'a>) -> &'r mut ObjectTable<Self> {
                &mut recorder.$field
            }
        }
    };
}

state_descriptor!(SamplerInfo, Sampler, samplers);
state_descriptor!(SetLayoutInfo<'a>, DescriptorSetLayout, set_layouts);
state_descriptor!(PipelineLayoutInfo<'a>, PipelineLayout, pipeline_layouts);
state_descriptor!(ShaderModuleInfo<'a>, ShaderModule, shader_modules);
state_descriptor!(RenderPassInfo<'a>, RenderPass, render_passes);
state_descriptor!(ComputePipelineInfo<'a>, ComputePipeline, compute_pipelines);
state_descriptor!(GraphicsPipelineInfo<'a>, GraphicsPipeline, graphics_pipelines);

/// Registry of every object decoded from one capture.
///
/// Holds one deduplicated [`ObjectTable`] per object kind and the handle map
/// from captured handles to dense indices. Descriptors borrow from the
/// [`Arena`] the recorder was created with, which must therefore outlive it.
pub struct Recorder<'a> {
    arena: &'a Arena,
    samplers: ObjectTable<SamplerInfo>,
    set_layouts: ObjectTable<SetLayoutInfo<'a>>,
    pipeline_layouts: ObjectTable<PipelineLayoutInfo<'a>>,
    shader_modules: ObjectTable<ShaderModuleInfo<'a>>,
    render_passes: ObjectTable<RenderPassInfo<'a>>,
    compute_pipelines: ObjectTable<ComputePipelineInfo<'a>>,
    graphics_pipelines: ObjectTable<GraphicsPipelineInfo<'a>>,
    handles: HashMap<(ObjectKind, ExternalHandle), DenseIndex>,
}

impl<'a> Recorder<'a> {
    pub fn new(arena: &'a Arena) -> Self {
        Self {
            arena,
            samplers: ObjectTable::new(),
            set_layouts: ObjectTable::new(),
            pipeline_layouts: ObjectTable::new(),
            shader_modules: ObjectTable::new(),
            render_passes: ObjectTable::new(),
            compute_pipelines: ObjectTable::new(),
            graphics_pipelines: ObjectTable::new(),
            handles: HashMap::new(),
        }
    }

    /// The arena descriptors are allocated from.
    pub fn arena(&self) -> &'a Arena {
        self.arena
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Add a descriptor under its content hash, or return the index of the
    /// entry already registered with that hash.
    pub fn register<D: StateDescriptor<'a>>(
        &mut self,
        hash: ObjectHash,
        descriptor: D,
    ) -> DecodeResult<DenseIndex> {
        let (index, inserted) = D::table_mut(self).insert(D::KIND, hash, descriptor)?;
        if inserted {
            debug!(kind = %D::KIND, %index, hash = %hash.short_hex(), "registered object");
        } else {
            debug!(kind = %D::KIND, %index, hash = %hash.short_hex(), "deduplicated object");
        }
        Ok(index)
    }

    /// Point a captured handle at a registered entry. A handle value that is
    /// already bound is rebound: drivers reuse handles after destruction.
    pub fn bind_handle(&mut self, kind: ObjectKind, handle: ExternalHandle, index: DenseIndex) {
        if let Some(previous) = self.handles.insert((kind, handle), index) {
            if previous != index {
                debug!(%kind, %handle, from = %previous, to = %index, "handle rebound");
            }
        }
    }

    /// Hash, register and bind a decoded descriptor in one step.
    pub fn record<D: StateDescriptor<'a>>(
        &mut self,
        handle: ExternalHandle,
        descriptor: D,
    ) -> DecodeResult<DenseIndex> {
        let hash = ContentHasher::for_kind(D::KIND).hash_value(&descriptor)?;
        let index = self.register(hash, descriptor)?;
        self.bind_handle(D::KIND, handle, index);
        Ok(index)
    }

    // -----------------------------------------------------------------------
    // Handle lookup
    // -----------------------------------------------------------------------

    pub fn lookup_handle(&self, kind: ObjectKind, handle: ExternalHandle) -> DecodeResult<DenseIndex> {
        self.handles
            .get(&(kind, handle))
            .copied()
            .ok_or(DecodeError::MissingDependency { kind, handle })
    }

    /// Turn a captured handle field into a reference to a registered entry.
    pub fn resolve(
        &self,
        kind: ObjectKind,
        handle: ExternalHandle,
        policy: HandlePolicy,
    ) -> DecodeResult<ObjectRef> {
        if handle.is_null() {
            return Ok(ObjectRef::Null);
        }
        match self.lookup_handle(kind, handle) {
            Ok(index) => Ok(ObjectRef::Index(index)),
            Err(_) if policy == HandlePolicy::PassThrough => {
                warn!(%kind, %handle, "passing through unresolved handle");
                Ok(ObjectRef::Unresolved(handle.raw()))
            }
            Err(err) => Err(err),
        }
    }

    /// Number of bound handles across all kinds.
    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    // -----------------------------------------------------------------------
    // Access
    // -----------------------------------------------------------------------

    /// The table holding descriptors of type `D`.
    pub fn table<D: StateDescriptor<'a>>(&self) -> &ObjectTable<D> {
        D::table(self)
    }

    pub fn samplers(&self) -> &[RegistryEntry<SamplerInfo>] {
        self.samplers.entries()
    }

    pub fn set_layouts(&self) -> &[RegistryEntry<SetLayoutInfo<'a>>] {
        self.set_layouts.entries()
    }

    pub fn pipeline_layouts(&self) -> &[RegistryEntry<PipelineLayoutInfo<'a>>] {
        self.pipeline_layouts.entries()
    }

    pub fn shader_modules(&self) -> &[RegistryEntry<ShaderModuleInfo<'a>>] {
        self.shader_modules.entries()
    }

    pub fn render_passes(&self) -> &[RegistryEntry<RenderPassInfo<'a>>] {
        self.render_passes.entries()
    }

    pub fn compute_pipelines(&self) -> &[RegistryEntry<ComputePipelineInfo<'a>>] {
        self.compute_pipelines.entries()
    }

    pub fn graphics_pipelines(&self) -> &[RegistryEntry<GraphicsPipelineInfo<'a>>] {
        self.graphics_pipelines.entries()
    }

    /// Number of deduplicated entries of one kind.
    pub fn len(&self, kind: ObjectKind) -> usize {
        match kind {
            ObjectKind::Sampler => self.samplers.len(),
            ObjectKind::DescriptorSetLayout => self.set_layouts.len(),
            ObjectKind::PipelineLayout => self.pipeline_layouts.len(),
            ObjectKind::ShaderModule => self.shader_modules.len(),
            ObjectKind::RenderPass => self.render_passes.len(),
            ObjectKind::ComputePipeline => self.compute_pipelines.len(),
            ObjectKind::GraphicsPipeline => self.graphics_pipelines.len(),
        }
    }

    /// Number of deduplicated entries across all kinds.
    pub fn total_len(&self) -> usize {
        ObjectKind::ALL.iter().map(|kind| self.len(*kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}

impl fmt::Debug for Recorder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Recorder");
        for kind in ObjectKind::ALL {
            s.field(kind.blob_key(), &self.len(kind));
        }
        s.field("handle_count", &self.handles.len()).finish()
    }
}
