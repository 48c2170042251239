//! Fixed-layout reconstructions of Vulkan object create-infos.
//!
//! Descriptors mirror the Vulkan structs they come from, minus `sType`,
//! `pNext` and the explicit counts (slices carry their own length). Every
//! borrowed field points into the [`Arena`](vkfossil_arena::Arena) the
//! descriptor was decoded with, and every reference to another object is an
//! [`ObjectRef`] resolved at decode time.
//!
//! Field declaration order is significant: it is the order in which the
//! content hash visits fields, and the order of keys in an exported blob.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Serialize, Serializer};
use vkfossil_types::ObjectRef;

use crate::vk::*;

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplerInfo {
    pub flags: u32,
    pub mag_filter: Filter,
    pub min_filter: Filter,
    pub mipmap_mode: SamplerMipmapMode,
    pub address_mode_u: SamplerAddressMode,
    pub address_mode_v: SamplerAddressMode,
    pub address_mode_w: SamplerAddressMode,
    pub mip_lod_bias: f32,
    pub anisotropy_enable: u32,
    pub max_anisotropy: f32,
    pub compare_enable: u32,
    pub compare_op: CompareOp,
    pub min_lod: f32,
    pub max_lod: f32,
    pub border_color: BorderColor,
    pub unnormalized_coordinates: u32,
}

// ---------------------------------------------------------------------------
// Descriptor set layout
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLayoutInfo<'a> {
    pub flags: u32,
    pub bindings: &'a [SetLayoutBinding<'a>],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLayoutBinding<'a> {
    pub binding: u32,
    pub descriptor_type: DescriptorType,
    pub descriptor_count: u32,
    pub stage_flags: ShaderStageFlags,
    /// Sampler references; `Some` only when the capture supplied them, in
    /// which case there are exactly `descriptor_count` of them.
    pub immutable_samplers: Option<&'a [ObjectRef]>,
}

// ---------------------------------------------------------------------------
// Pipeline layout
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineLayoutInfo<'a> {
    pub flags: u32,
    /// Descriptor set layout references, in set order.
    pub set_layouts: &'a [ObjectRef],
    pub push_constant_ranges: &'a [PushConstantRange],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushConstantRange {
    pub stage_flags: ShaderStageFlags,
    pub offset: u32,
    pub size: u32,
}

// ---------------------------------------------------------------------------
// Shader module
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShaderModuleInfo<'a> {
    pub flags: u32,
    pub code_size: u64,
    #[serde(serialize_with = "serialize_payload")]
    pub code: &'a [u8],
}

// Text formats carry binary payloads as base64; binary formats (the hash
// input) take the raw bytes.
fn serialize_payload<S: Serializer>(bytes: &&[u8], serializer: S) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
        serializer.serialize_str(&STANDARD.encode(bytes))
    } else {
        serializer.serialize_bytes(bytes)
    }
}

// ---------------------------------------------------------------------------
// Render pass
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPassInfo<'a> {
    pub flags: u32,
    pub attachments: &'a [AttachmentDescription],
    pub subpasses: &'a [SubpassDescription<'a>],
    pub dependencies: &'a [SubpassDependency],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDescription {
    pub flags: u32,
    pub format: Format,
    pub samples: SampleCountFlags,
    pub load_op: AttachmentLoadOp,
    pub store_op: AttachmentStoreOp,
    pub stencil_load_op: AttachmentLoadOp,
    pub stencil_store_op: AttachmentStoreOp,
    pub initial_layout: ImageLayout,
    pub final_layout: ImageLayout,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentReference {
    pub attachment: u32,
    pub layout: ImageLayout,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubpassDescription<'a> {
    pub flags: u32,
    pub pipeline_bind_point: PipelineBindPoint,
    pub input_attachments: &'a [AttachmentReference],
    pub color_attachments: &'a [AttachmentReference],
    /// Same length as `color_attachments` when present.
    pub resolve_attachments: Option<&'a [AttachmentReference]>,
    pub depth_stencil_attachment: Option<&'a AttachmentReference>,
    pub preserve_attachments: &'a [u32],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubpassDependency {
    pub src_subpass: u32,
    pub dst_subpass: u32,
    pub src_stage_mask: u32,
    pub dst_stage_mask: u32,
    pub src_access_mask: u32,
    pub dst_access_mask: u32,
    pub dependency_flags: u32,
}

// ---------------------------------------------------------------------------
// Shader stages (shared by compute and graphics pipelines)
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShaderStageInfo<'a> {
    pub flags: u32,
    pub stage: ShaderStageFlags,
    pub module: ObjectRef,
    pub name: &'a str,
    pub specialization: Option<&'a SpecializationInfo<'a>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecializationInfo<'a> {
    pub map_entries: &'a [SpecializationMapEntry],
    pub data_size: u64,
    #[serde(serialize_with = "serialize_payload")]
    pub data: &'a [u8],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecializationMapEntry {
    #[serde(rename = "constantID")]
    pub constant_id: u32,
    pub offset: u32,
    pub size: u64,
}

// ---------------------------------------------------------------------------
// Compute pipeline
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputePipelineInfo<'a> {
    pub flags: u32,
    pub stage: ShaderStageInfo<'a>,
    pub layout: ObjectRef,
    pub base_pipeline: ObjectRef,
    pub base_pipeline_index: i32,
}

// ---------------------------------------------------------------------------
// Graphics pipeline
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphicsPipelineInfo<'a> {
    pub flags: u32,
    pub stages: &'a [ShaderStageInfo<'a>],
    pub vertex_input: Option<&'a VertexInputInfo<'a>>,
    pub input_assembly: Option<&'a InputAssemblyInfo>,
    pub tessellation: Option<&'a TessellationInfo>,
    pub viewport: Option<&'a ViewportInfo<'a>>,
    pub rasterization: Option<&'a RasterizationInfo>,
    pub multisample: Option<&'a MultisampleInfo<'a>>,
    pub depth_stencil: Option<&'a DepthStencilInfo>,
    pub color_blend: Option<&'a ColorBlendInfo<'a>>,
    pub dynamic: Option<&'a DynamicInfo<'a>>,
    pub layout: ObjectRef,
    pub render_pass: ObjectRef,
    pub subpass: u32,
    pub base_pipeline: ObjectRef,
    pub base_pipeline_index: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexInputInfo<'a> {
    pub flags: u32,
    pub bindings: &'a [VertexBinding],
    pub attributes: &'a [VertexAttribute],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexBinding {
    pub binding: u32,
    pub stride: u32,
    pub input_rate: VertexInputRate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexAttribute {
    pub location: u32,
    pub binding: u32,
    pub format: Format,
    pub offset: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputAssemblyInfo {
    pub flags: u32,
    pub topology: PrimitiveTopology,
    pub primitive_restart_enable: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TessellationInfo {
    pub flags: u32,
    pub patch_control_points: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportInfo<'a> {
    pub flags: u32,
    pub viewport_count: u32,
    /// `None` when viewports are dynamic state.
    pub viewports: Option<&'a [Viewport]>,
    pub scissor_count: u32,
    pub scissors: Option<&'a [Rect2D]>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterizationInfo {
    pub flags: u32,
    pub depth_clamp_enable: u32,
    pub rasterizer_discard_enable: u32,
    pub polygon_mode: PolygonMode,
    pub cull_mode: CullModeFlags,
    pub front_face: FrontFace,
    pub depth_bias_enable: u32,
    pub depth_bias_constant_factor: f32,
    pub depth_bias_clamp: f32,
    pub depth_bias_slope_factor: f32,
    pub line_width: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisampleInfo<'a> {
    pub flags: u32,
    pub rasterization_samples: SampleCountFlags,
    pub sample_shading_enable: u32,
    pub min_sample_shading: f32,
    /// One word per 32 samples when present.
    pub sample_mask: Option<&'a [u32]>,
    pub alpha_to_coverage_enable: u32,
    pub alpha_to_one_enable: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthStencilInfo {
    pub flags: u32,
    pub depth_test_enable: u32,
    pub depth_write_enable: u32,
    pub depth_compare_op: CompareOp,
    pub depth_bounds_test_enable: u32,
    pub stencil_test_enable: u32,
    pub front: StencilOpState,
    pub back: StencilOpState,
    pub min_depth_bounds: f32,
    pub max_depth_bounds: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StencilOpState {
    pub fail_op: StencilOp,
    pub pass_op: StencilOp,
    pub depth_fail_op: StencilOp,
    pub compare_op: CompareOp,
    pub compare_mask: u32,
    pub write_mask: u32,
    pub reference: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorBlendInfo<'a> {
    pub flags: u32,
    pub logic_op_enable: u32,
    pub logic_op: LogicOp,
    pub attachments: &'a [ColorBlendAttachment],
    pub blend_constants: [f32; 4],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorBlendAttachment {
    pub blend_enable: u32,
    pub src_color_blend_factor: BlendFactor,
    pub dst_color_blend_factor: BlendFactor,
    pub color_blend_op: BlendOp,
    pub src_alpha_blend_factor: BlendFactor,
    pub dst_alpha_blend_factor: BlendFactor,
    pub alpha_blend_op: BlendOp,
    pub color_write_mask: ColorComponentFlags,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicInfo<'a> {
    pub flags: u32,
    pub dynamic_states: &'a [DynamicState],
}
