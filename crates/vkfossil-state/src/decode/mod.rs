//! Create-info decoders.
//!
//! A [`Decoder`] turns one create-info argument tree into a descriptor,
//! allocating every variable-length part in the recorder's arena and
//! resolving handle fields through the recorder's handle map. Field order
//! follows the Vulkan struct declarations; each decoder lives next to the
//! structs it reads.
//!
//! [`decode_call`] is the entry point used by the batch driver: it locates
//! the create-info and handle arguments of a call record, decodes every
//! object the call creates, and records each one.

mod pipeline;
mod pipeline_state;
mod render_pass;
mod resources;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vkfossil_arena::Arena;
use vkfossil_capture::{ArgCursor, ArgNode, BufferPool, CallRecord};
use vkfossil_types::{DenseIndex, ExternalHandle, ObjectKind, ObjectRef};

use crate::call::CallKind;
use crate::error::{DecodeError, DecodeResult};
use crate::recorder::{HandlePolicy, Recorder};
use crate::vk::StructureType;

/// Knobs that change how strictly a capture is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub handle_policy: HandlePolicy,
    /// Reject create-infos whose `sType` does not match the struct.
    pub validate_structure_types: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            handle_policy: HandlePolicy::Strict,
            validate_structure_types: true,
        }
    }
}

/// One object recorded from a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedObject {
    pub kind: ObjectKind,
    pub handle: ExternalHandle,
    pub index: DenseIndex,
}

/// Decode every object created by `record` and add it to `recorder`.
///
/// Pipeline calls may create several objects at once; each create-info is
/// recorded before the next is decoded.
pub fn decode_call(
    recorder: &mut Recorder<'_>,
    call: CallKind,
    record: &CallRecord,
    buffers: &BufferPool,
    options: &DecodeOptions,
) -> DecodeResult<Vec<RecordedObject>> {
    let info = argument(record, call.create_info_arg())?;
    let handle = argument(record, call.handle_arg())?;

    match handle {
        ArgNode::Aggregate(handles) => {
            let infos = ArgCursor::new(std::slice::from_ref(info)).read_array()?;
            if infos.len() != handles.len() {
                return Err(DecodeError::CountMismatch {
                    field: "createInfoCount",
                    declared: handles.len() as u64,
                    actual: infos.len(),
                });
            }
            let mut handle_cursor = ArgCursor::new(handles);
            let mut objects = Vec::with_capacity(infos.len());
            for info in infos {
                let handle = handle_cursor.read_handle()?;
                objects.push(decode_object(recorder, call, info, handle, buffers, options)?);
            }
            Ok(objects)
        }
        node => {
            let handle = ArgCursor::new(std::slice::from_ref(node)).read_handle()?;
            let object = decode_object(recorder, call, info, handle, buffers, options)?;
            Ok(vec![object])
        }
    }
}

fn argument(record: &CallRecord, index: usize) -> DecodeResult<&ArgNode> {
    record
        .arg(index)
        .ok_or(DecodeError::MissingArgument { index })
}

fn decode_object(
    recorder: &mut Recorder<'_>,
    call: CallKind,
    info: &ArgNode,
    handle: ExternalHandle,
    buffers: &BufferPool,
    options: &DecodeOptions,
) -> DecodeResult<RecordedObject> {
    let mut cursor = ArgCursor::over(info)?;
    let decoder = Decoder::new(recorder, buffers, *options);

    let index = match call {
        CallKind::CreateSampler => {
            let descriptor = decoder.sampler(&mut cursor)?;
            cursor.finish()?;
            recorder.record(handle, descriptor)?
        }
        CallKind::CreateDescriptorSetLayout => {
            let descriptor = decoder.set_layout(&mut cursor)?;
            cursor.finish()?;
            recorder.record(handle, descriptor)?
        }
        CallKind::CreatePipelineLayout => {
            let descriptor = decoder.pipeline_layout(&mut cursor)?;
            cursor.finish()?;
            recorder.record(handle, descriptor)?
        }
        CallKind::CreateShaderModule => {
            let descriptor = decoder.shader_module(&mut cursor)?;
            cursor.finish()?;
            recorder.record(handle, descriptor)?
        }
        CallKind::CreateRenderPass => {
            let descriptor = decoder.render_pass(&mut cursor)?;
            cursor.finish()?;
            recorder.record(handle, descriptor)?
        }
        CallKind::CreateComputePipelines => {
            let descriptor = decoder.compute_pipeline(&mut cursor)?;
            cursor.finish()?;
            recorder.record(handle, descriptor)?
        }
        CallKind::CreateGraphicsPipelines => {
            let descriptor = decoder.graphics_pipeline(&mut cursor)?;
            cursor.finish()?;
            recorder.record(handle, descriptor)?
        }
    };

    let kind = call.object_kind();
    debug!(call = %call, %kind, %handle, %index, "decoded object");
    Ok(RecordedObject {
        kind,
        handle,
        index,
    })
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Reads create-info trees against a recorder's current state.
///
/// A decoder only borrows the recorder; recording the result is a separate
/// step. [`decode_call`] records each object of a batched call before it
/// decodes the next, so a later create-info may name an earlier one's handle.
pub struct Decoder<'r, 'a> {
    recorder: &'r Recorder<'a>,
    arena: &'a Arena,
    buffers: &'r BufferPool,
    options: DecodeOptions,
}

impl<'r, 'a> Decoder<'r, 'a> {
    pub fn new(recorder: &'r Recorder<'a>, buffers: &'r BufferPool, options: DecodeOptions) -> Self {
        Self {
            recorder,
            arena: recorder.arena(),
            buffers,
            options,
        }
    }

    /// Consume `sType` and `pNext`.
    fn header(&self, cursor: &mut ArgCursor<'_>, expected: StructureType) -> DecodeResult<()> {
        let found: StructureType = cursor.read_enum()?;
        if self.options.validate_structure_types && found != expected {
            return Err(DecodeError::UnexpectedStructureType { expected, found });
        }
        if cursor.peek().is_some_and(|node| !node.is_null()) {
            return Err(DecodeError::UnexpectedNext);
        }
        cursor.read_null()?;
        Ok(())
    }

    /// Read a handle field and resolve it against already-recorded objects.
    fn reference(&self, cursor: &mut ArgCursor<'_>, kind: ObjectKind) -> DecodeResult<ObjectRef> {
        let handle = cursor.read_handle()?;
        self.recorder.resolve(kind, handle, self.options.handle_policy)
    }

    fn string(&self, cursor: &mut ArgCursor<'_>) -> DecodeResult<&'a str> {
        Ok(self.arena.allocate_str(cursor.read_string()?))
    }

    /// Copy pool buffer `index` into the arena after checking its size.
    fn buffer(&self, index: u64, declared: u64) -> DecodeResult<&'a [u8]> {
        let bytes = self
            .buffers
            .get(index)
            .ok_or(DecodeError::BufferOutOfRange {
                index,
                len: self.buffers.len(),
            })?;
        if bytes.len() as u64 != declared {
            return Err(DecodeError::BufferSizeMismatch {
                index,
                declared,
                actual: bytes.len(),
            });
        }
        Ok(self.arena.allocate_copy(bytes))
    }

    // -----------------------------------------------------------------------
    // Arrays
    // -----------------------------------------------------------------------

    /// Decode `nodes` as an array of structs, one fresh cursor per element.
    fn structs<'n, T, F>(&self, nodes: &'n [ArgNode], mut f: F) -> DecodeResult<&'a [T]>
    where
        T: Copy,
        F: FnMut(&mut ArgCursor<'n>) -> DecodeResult<T>,
    {
        self.arena.try_allocate_n_with(nodes.len(), |i| -> DecodeResult<T> {
            let mut element = ArgCursor::over(&nodes[i])?;
            let value = f(&mut element)?;
            element.finish()?;
            Ok(value)
        })
    }

    /// Decode `nodes` as an array of scalars, one node per element.
    fn scalars<'n, T, F>(&self, nodes: &'n [ArgNode], mut f: F) -> DecodeResult<&'a [T]>
    where
        T: Copy,
        F: FnMut(&mut ArgCursor<'n>) -> DecodeResult<T>,
    {
        let mut elements = ArgCursor::new(nodes);
        let slice = self
            .arena
            .try_allocate_n_with(nodes.len(), |_| f(&mut elements))?;
        elements.finish()?;
        Ok(slice)
    }

    /// Read a count field followed by the array it describes.
    fn counted_structs<'n, T, F>(
        &self,
        cursor: &mut ArgCursor<'n>,
        field: &'static str,
        f: F,
    ) -> DecodeResult<&'a [T]>
    where
        T: Copy,
        F: FnMut(&mut ArgCursor<'n>) -> DecodeResult<T>,
    {
        let count = cursor.read_u32()?;
        let nodes = required(field, count.into(), cursor.read_nullable_array()?)?;
        self.structs(nodes, f)
    }

    fn counted_scalars<'n, T, F>(
        &self,
        cursor: &mut ArgCursor<'n>,
        field: &'static str,
        f: F,
    ) -> DecodeResult<&'a [T]>
    where
        T: Copy,
        F: FnMut(&mut ArgCursor<'n>) -> DecodeResult<T>,
    {
        let count = cursor.read_u32()?;
        let nodes = required(field, count.into(), cursor.read_nullable_array()?)?;
        self.scalars(nodes, f)
    }

    /// Read an array whose count was given by an earlier field and whose
    /// pointer may legitimately be null.
    fn nullable_structs<'n, T, F>(
        &self,
        cursor: &mut ArgCursor<'n>,
        field: &'static str,
        count: u64,
        f: F,
    ) -> DecodeResult<Option<&'a [T]>>
    where
        T: Copy,
        F: FnMut(&mut ArgCursor<'n>) -> DecodeResult<T>,
    {
        match cursor.read_nullable_array()? {
            None => Ok(None),
            Some(nodes) => {
                check_count(field, count, nodes)?;
                self.structs(nodes, f).map(Some)
            }
        }
    }

    fn nullable_scalars<'n, T, F>(
        &self,
        cursor: &mut ArgCursor<'n>,
        field: &'static str,
        count: u64,
        f: F,
    ) -> DecodeResult<Option<&'a [T]>>
    where
        T: Copy,
        F: FnMut(&mut ArgCursor<'n>) -> DecodeResult<T>,
    {
        match cursor.read_nullable_array()? {
            None => Ok(None),
            Some(nodes) => {
                check_count(field, count, nodes)?;
                self.scalars(nodes, f).map(Some)
            }
        }
    }

    /// Decode a pointer-to-struct field; null yields `None`.
    fn optional<'n, T, F>(&self, cursor: &mut ArgCursor<'n>, f: F) -> DecodeResult<Option<&'a T>>
    where
        T: Copy,
        F: FnOnce(&mut ArgCursor<'n>) -> DecodeResult<T>,
    {
        match cursor.read_optional_struct()? {
            None => Ok(None),
            Some(mut inner) => {
                let value = f(&mut inner)?;
                inner.finish()?;
                let value: &'a T = self.arena.allocate(value);
                Ok(Some(value))
            }
        }
    }
}

/// Pair a count with its array pointer: null is only allowed for an empty
/// array.
fn required<'n>(
    field: &'static str,
    count: u64,
    nodes: Option<&'n [ArgNode]>,
) -> DecodeResult<&'n [ArgNode]> {
    match nodes {
        None if count == 0 => Ok(<&[ArgNode]>::default()),
        None => Err(DecodeError::MissingArray { field }),
        Some(nodes) => {
            check_count(field, count, nodes)?;
            Ok(nodes)
        }
    }
}

fn check_count(field: &'static str, declared: u64, nodes: &[ArgNode]) -> DecodeResult<()> {
    if declared == nodes.len() as u64 {
        Ok(())
    } else {
        Err(DecodeError::CountMismatch {
            field,
            declared,
            actual: nodes.len(),
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures;

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::descriptor::*;
    use vkfossil_capture::{CursorError, NodeTag};

    fn decode(recorder: &mut Recorder<'_>, record: &CallRecord) -> DecodeResult<Vec<RecordedObject>> {
        decode_with(recorder, record, &BufferPool::new(), &DecodeOptions::default())
    }

    fn decode_with(
        recorder: &mut Recorder<'_>,
        record: &CallRecord,
        buffers: &BufferPool,
        options: &DecodeOptions,
    ) -> DecodeResult<Vec<RecordedObject>> {
        let call = CallKind::from_call_name(&record.name).unwrap();
        decode_call(recorder, call, record, buffers, options)
    }

    // -----------------------------------------------------------------------
    // Headers
    // -----------------------------------------------------------------------

    #[test]
    fn wrong_structure_type_is_rejected() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let mut info = sampler_info(1);
        info[0] = ArgNode::uint(StructureType::RENDER_PASS_CREATE_INFO.as_raw().into());
        let record = create_call("vkCreateSampler", ArgNode::aggregate(info), 0x10);
        assert_eq!(
            decode(&mut recorder, &record).unwrap_err(),
            DecodeError::UnexpectedStructureType {
                expected: StructureType::SAMPLER_CREATE_INFO,
                found: StructureType::RENDER_PASS_CREATE_INFO,
            }
        );
    }

    #[test]
    fn structure_type_check_can_be_disabled() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let mut info = sampler_info(1);
        info[0] = ArgNode::uint(0);
        let record = create_call("vkCreateSampler", ArgNode::aggregate(info), 0x10);
        let options = DecodeOptions {
            validate_structure_types: false,
            ..DecodeOptions::default()
        };
        decode_with(&mut recorder, &record, &BufferPool::new(), &options).unwrap();
        assert_eq!(recorder.samplers().len(), 1);
    }

    #[test]
    fn next_chain_is_rejected() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let mut info = sampler_info(1);
        info[1] = ArgNode::aggregate(vec![ArgNode::uint(1000)]);
        let record = create_call("vkCreateSampler", ArgNode::aggregate(info), 0x10);
        assert_eq!(
            decode(&mut recorder, &record).unwrap_err(),
            DecodeError::UnexpectedNext
        );
        assert!(recorder.is_empty());
    }

    #[test]
    fn trailing_fields_are_rejected() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let mut info = sampler_info(1);
        info.push(ArgNode::uint(0));
        let record = create_call("vkCreateSampler", ArgNode::aggregate(info), 0x10);
        assert!(matches!(
            decode(&mut recorder, &record).unwrap_err(),
            DecodeError::Shape(CursorError::Trailing { .. })
        ));
    }

    #[test]
    fn missing_argument() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let record = CallRecord::new(
            "vkCreateSampler",
            vec![ArgNode::uint(1), ArgNode::aggregate(sampler_info(0))],
        );
        assert_eq!(
            decode(&mut recorder, &record).unwrap_err(),
            DecodeError::MissingArgument { index: 3 }
        );
    }

    #[test]
    fn scalar_where_create_info_expected() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let record = create_call("vkCreateSampler", ArgNode::uint(5), 0x10);
        assert_eq!(
            decode(&mut recorder, &record).unwrap_err(),
            DecodeError::Shape(CursorError::ShapeMismatch {
                position: 0,
                expected: NodeTag::Aggregate,
                found: NodeTag::UInt,
            })
        );
    }

    // -----------------------------------------------------------------------
    // Arrays
    // -----------------------------------------------------------------------

    #[test]
    fn null_array_with_zero_count_is_empty() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let record = create_call(
            "vkCreatePipelineLayout",
            pipeline_layout_info(&[], &[]),
            0x30,
        );
        decode(&mut recorder, &record).unwrap();
        let layout = recorder.pipeline_layouts()[0].descriptor;
        assert!(layout.set_layouts.is_empty());
        assert!(layout.push_constant_ranges.is_empty());
    }

    #[test]
    fn null_array_with_nonzero_count() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let info = ArgNode::aggregate(vec![
            ArgNode::uint(StructureType::PIPELINE_LAYOUT_CREATE_INFO.as_raw().into()),
            ArgNode::null(),
            ArgNode::uint(0),
            ArgNode::uint(2),
            ArgNode::null(),
            ArgNode::uint(0),
            ArgNode::null(),
        ]);
        let record = create_call("vkCreatePipelineLayout", info, 0x30);
        assert_eq!(
            decode(&mut recorder, &record).unwrap_err(),
            DecodeError::MissingArray {
                field: "pSetLayouts"
            }
        );
    }

    #[test]
    fn count_must_match_arity() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let info = ArgNode::aggregate(vec![
            ArgNode::uint(StructureType::PIPELINE_LAYOUT_CREATE_INFO.as_raw().into()),
            ArgNode::null(),
            ArgNode::uint(0),
            ArgNode::uint(0),
            ArgNode::null(),
            ArgNode::uint(2),
            ArgNode::aggregate(vec![push_constant_range(0x1, 0, 16)]),
        ]);
        let record = create_call("vkCreatePipelineLayout", info, 0x30);
        assert_eq!(
            decode(&mut recorder, &record).unwrap_err(),
            DecodeError::CountMismatch {
                field: "pPushConstantRanges",
                declared: 2,
                actual: 1,
            }
        );
    }

    // -----------------------------------------------------------------------
    // Handles
    // -----------------------------------------------------------------------

    #[test]
    fn forward_reference_is_a_missing_dependency() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let record = create_call(
            "vkCreatePipelineLayout",
            pipeline_layout_info(&[0x20], &[]),
            0x30,
        );
        assert_eq!(
            decode(&mut recorder, &record).unwrap_err(),
            DecodeError::MissingDependency {
                kind: ObjectKind::DescriptorSetLayout,
                handle: ExternalHandle::new(0x20),
            }
        );
    }

    #[test]
    fn pass_through_keeps_raw_handle() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let record = create_call(
            "vkCreatePipelineLayout",
            pipeline_layout_info(&[0x20, 0], &[]),
            0x30,
        );
        let options = DecodeOptions {
            handle_policy: HandlePolicy::PassThrough,
            ..DecodeOptions::default()
        };
        decode_with(&mut recorder, &record, &BufferPool::new(), &options).unwrap();
        let layout = recorder.pipeline_layouts()[0].descriptor;
        assert_eq!(
            layout.set_layouts,
            &[ObjectRef::Unresolved(0x20), ObjectRef::Null]
        );
    }

    #[test]
    fn recorded_object_reports_handle_and_index() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let record = create_call("vkCreateSampler", ArgNode::aggregate(sampler_info(1)), 0x10);
        let objects = decode(&mut recorder, &record).unwrap();
        assert_eq!(
            objects,
            vec![RecordedObject {
                kind: ObjectKind::Sampler,
                handle: ExternalHandle::new(0x10),
                index: DenseIndex::new(0),
            }]
        );
    }

    // -----------------------------------------------------------------------
    // Scenario
    // -----------------------------------------------------------------------

    #[test]
    fn sampler_set_layout_pipeline_layout_chain() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);

        let sampler = create_call("vkCreateSampler", ArgNode::aggregate(sampler_info(1)), 0xa0);
        let set_layout = create_call(
            "vkCreateDescriptorSetLayout",
            set_layout_info(vec![binding(0, 1, 1, 0x10, Some(&[0xa0][..]))]),
            0xb0,
        );
        let layout = create_call(
            "vkCreatePipelineLayout",
            pipeline_layout_info(&[0xb0], &[(0x1, 0, 64)]),
            0xc0,
        );
        for record in [&sampler, &set_layout, &layout] {
            decode(&mut recorder, record).unwrap();
        }

        assert_eq!(recorder.samplers().len(), 1);
        assert_eq!(recorder.set_layouts().len(), 1);
        assert_eq!(recorder.pipeline_layouts().len(), 1);

        let bindings = recorder.set_layouts()[0].descriptor.bindings;
        assert_eq!(
            bindings[0].immutable_samplers,
            Some(&[ObjectRef::Index(DenseIndex::new(0))][..])
        );
        let layout: PipelineLayoutInfo<'_> = recorder.pipeline_layouts()[0].descriptor;
        assert_eq!(layout.set_layouts, &[ObjectRef::Index(DenseIndex::new(0))]);
        assert_eq!(layout.push_constant_ranges[0].size, 64);
    }

    // -----------------------------------------------------------------------
    // Batched pipeline calls
    // -----------------------------------------------------------------------

    #[test]
    fn batched_pipelines_record_each_object() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let buffers = BufferPool::from(vec![vec![0u8; 8]]);
        for record in [
            create_call("vkCreateShaderModule", shader_module_info(8, 0), 0x10),
            create_call(
                "vkCreatePipelineLayout",
                pipeline_layout_info(&[], &[]),
                0x20,
            ),
        ] {
            decode_with(&mut recorder, &record, &buffers, &DecodeOptions::default()).unwrap();
        }

        let record = pipelines_call(
            "vkCreateComputePipelines",
            vec![
                compute_pipeline_info(0x10, "main", 0x20),
                compute_pipeline_info(0x10, "other", 0x20),
            ],
            vec![0x100, 0x200],
        );
        let objects =
            decode_with(&mut recorder, &record, &buffers, &DecodeOptions::default()).unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[1].index, DenseIndex::new(1));
        assert_eq!(recorder.compute_pipelines().len(), 2);
        assert_eq!(recorder.compute_pipelines()[1].descriptor.stage.name, "other");
    }

    #[test]
    fn batched_pipelines_need_one_handle_per_info() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let record = pipelines_call(
            "vkCreateComputePipelines",
            vec![compute_pipeline_info(0x10, "main", 0x20)],
            vec![0x100, 0x200],
        );
        assert_eq!(
            decode(&mut recorder, &record).unwrap_err(),
            DecodeError::CountMismatch {
                field: "createInfoCount",
                declared: 2,
                actual: 1,
            }
        );
    }
}
