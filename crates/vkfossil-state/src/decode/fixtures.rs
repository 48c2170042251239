//! Argument-tree builders shaped like captured create-info calls.

use vkfossil_capture::{ArgNode, CallRecord};

use crate::vk::StructureType;

fn s_type(value: StructureType) -> ArgNode {
    ArgNode::uint(value.as_raw().into())
}

fn uints(values: &[u64]) -> ArgNode {
    ArgNode::aggregate(values.iter().map(|v| ArgNode::uint(*v)).collect())
}

fn array_or_null(elements: Vec<ArgNode>) -> ArgNode {
    if elements.is_empty() {
        ArgNode::null()
    } else {
        ArgNode::aggregate(elements)
    }
}

fn count(elements: &[ArgNode]) -> ArgNode {
    ArgNode::uint(elements.len() as u64)
}

/// `vkCreateX(device, pCreateInfo, pAllocator, pObject)`.
pub fn create_call(name: &str, info: ArgNode, handle: u64) -> CallRecord {
    CallRecord::new(
        name,
        vec![
            ArgNode::uint(0xd0),
            info,
            ArgNode::null(),
            ArgNode::uint(handle),
        ],
    )
}

/// `vkCreateXPipelines(device, cache, count, pCreateInfos, pAllocator,
/// pPipelines)` creating several pipelines at once.
pub fn pipelines_call(name: &str, infos: Vec<ArgNode>, handles: Vec<u64>) -> CallRecord {
    CallRecord::new(
        name,
        vec![
            ArgNode::uint(0xd0),
            ArgNode::uint(0),
            ArgNode::uint(infos.len() as u64),
            ArgNode::aggregate(infos),
            ArgNode::null(),
            uints(&handles),
        ],
    )
}

/// `vkCreateXPipelines` creating a single pipeline.
pub fn pipeline_call(name: &str, info: ArgNode, handle: u64) -> CallRecord {
    CallRecord::new(
        name,
        vec![
            ArgNode::uint(0xd0),
            ArgNode::uint(0),
            ArgNode::uint(1),
            info,
            ArgNode::null(),
            ArgNode::uint(handle),
        ],
    )
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Sampler fields as a mutable list so tests can corrupt single nodes.
pub fn sampler_info(filter: u64) -> Vec<ArgNode> {
    vec![
        s_type(StructureType::SAMPLER_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(filter),
        ArgNode::uint(filter),
        ArgNode::uint(0),
        ArgNode::uint(2),
        ArgNode::uint(2),
        ArgNode::uint(2),
        ArgNode::float(0.0),
        ArgNode::uint(1),
        ArgNode::float(16.0),
        ArgNode::uint(0),
        ArgNode::uint(7),
        ArgNode::float(0.0),
        ArgNode::float(1000.0),
        ArgNode::uint(0),
        ArgNode::uint(0),
    ]
}

pub fn binding(
    binding: u64,
    descriptor_type: u64,
    descriptor_count: u64,
    stages: u64,
    immutable_samplers: Option<&[u64]>,
) -> ArgNode {
    ArgNode::aggregate(vec![
        ArgNode::uint(binding),
        ArgNode::uint(descriptor_type),
        ArgNode::uint(descriptor_count),
        ArgNode::uint(stages),
        immutable_samplers.map_or_else(ArgNode::null, uints),
    ])
}

pub fn set_layout_info(bindings: Vec<ArgNode>) -> ArgNode {
    ArgNode::aggregate(vec![
        s_type(StructureType::DESCRIPTOR_SET_LAYOUT_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        count(&bindings),
        array_or_null(bindings),
    ])
}

pub fn push_constant_range(stages: u64, offset: u64, size: u64) -> ArgNode {
    uints(&[stages, offset, size])
}

pub fn pipeline_layout_info(set_layouts: &[u64], ranges: &[(u64, u64, u64)]) -> ArgNode {
    let ranges: Vec<_> = ranges
        .iter()
        .map(|(stages, offset, size)| push_constant_range(*stages, *offset, *size))
        .collect();
    ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_LAYOUT_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(set_layouts.len() as u64),
        if set_layouts.is_empty() {
            ArgNode::null()
        } else {
            uints(set_layouts)
        },
        count(&ranges),
        array_or_null(ranges),
    ])
}

pub fn shader_module_info(code_size: u64, buffer: u64) -> ArgNode {
    ArgNode::aggregate(vec![
        s_type(StructureType::SHADER_MODULE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(code_size),
        ArgNode::uint(buffer),
    ])
}

// ---------------------------------------------------------------------------
// Render passes
// ---------------------------------------------------------------------------

pub fn attachment(format: u64, final_layout: u64) -> ArgNode {
    uints(&[0, format, 1, 1, 0, 2, 1, 0, final_layout])
}

pub fn attachment_ref(attachment: u64, layout: u64) -> ArgNode {
    uints(&[attachment, layout])
}

/// A graphics subpass writing colour attachment 0 and, optionally, depth
/// attachment 1.
pub fn subpass(depth: bool) -> ArgNode {
    let colors = vec![attachment_ref(0, 2)];
    ArgNode::aggregate(vec![
        ArgNode::uint(0),
        ArgNode::uint(0),
        ArgNode::uint(0),
        ArgNode::null(),
        count(&colors),
        ArgNode::aggregate(colors),
        ArgNode::null(),
        if depth {
            attachment_ref(1, 3)
        } else {
            ArgNode::null()
        },
        ArgNode::uint(0),
        ArgNode::null(),
    ])
}

pub fn dependency(src: u64, dst: u64) -> ArgNode {
    uints(&[src, dst, 0x400, 0x400, 0, 0x100, 0])
}

pub fn render_pass_info(
    attachments: Vec<ArgNode>,
    subpasses: Vec<ArgNode>,
    dependencies: Vec<ArgNode>,
) -> ArgNode {
    ArgNode::aggregate(vec![
        s_type(StructureType::RENDER_PASS_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        count(&attachments),
        array_or_null(attachments),
        count(&subpasses),
        array_or_null(subpasses),
        count(&dependencies),
        array_or_null(dependencies),
    ])
}

// ---------------------------------------------------------------------------
// Pipelines
// ---------------------------------------------------------------------------

pub fn shader_stage(stage: u64, module: u64, name: &str) -> ArgNode {
    ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_SHADER_STAGE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(stage),
        ArgNode::uint(module),
        ArgNode::string(name),
        ArgNode::null(),
    ])
}

pub fn compute_pipeline_info(module: u64, name: &str, layout: u64) -> ArgNode {
    ArgNode::aggregate(vec![
        s_type(StructureType::COMPUTE_PIPELINE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        shader_stage(0x20, module, name),
        ArgNode::uint(layout),
        ArgNode::uint(0),
        ArgNode::int(-1),
    ])
}

/// Handles referenced by a minimal graphics pipeline.
pub struct GraphicsHandles {
    pub vertex_module: u64,
    pub fragment_module: u64,
    pub layout: u64,
    pub render_pass: u64,
}

/// Fixed-function blocks of a graphics pipeline, in declaration order.
pub fn graphics_pipeline_info(handles: &GraphicsHandles, blocks: [ArgNode; 9]) -> ArgNode {
    let stages = vec![
        shader_stage(0x1, handles.vertex_module, "main"),
        shader_stage(0x10, handles.fragment_module, "main"),
    ];
    let mut fields = vec![
        s_type(StructureType::GRAPHICS_PIPELINE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        count(&stages),
        ArgNode::aggregate(stages),
    ];
    fields.extend(blocks);
    fields.extend([
        ArgNode::uint(handles.layout),
        ArgNode::uint(handles.render_pass),
        ArgNode::uint(0),
        ArgNode::uint(0),
        ArgNode::int(-1),
    ]);
    ArgNode::aggregate(fields)
}

pub fn vertex_input_state() -> ArgNode {
    let bindings = vec![uints(&[0, 32, 0])];
    let attributes = vec![uints(&[0, 0, 106, 0]), uints(&[1, 0, 103, 12])];
    ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_VERTEX_INPUT_STATE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        count(&bindings),
        ArgNode::aggregate(bindings),
        count(&attributes),
        ArgNode::aggregate(attributes),
    ])
}

pub fn input_assembly_state(topology: u64) -> ArgNode {
    ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_INPUT_ASSEMBLY_STATE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(topology),
        ArgNode::uint(0),
    ])
}

pub fn tessellation_state(patch_control_points: u64) -> ArgNode {
    ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_TESSELLATION_STATE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(patch_control_points),
    ])
}

/// Viewport state with one static viewport and one static scissor.
pub fn viewport_state() -> ArgNode {
    let viewport = ArgNode::aggregate(
        [0.0, 0.0, 1920.0, 1080.0, 0.0, 1.0]
            .into_iter()
            .map(ArgNode::float)
            .collect(),
    );
    let scissor = ArgNode::aggregate(vec![
        ArgNode::aggregate(vec![ArgNode::int(-8), ArgNode::int(0)]),
        uints(&[1920, 1080]),
    ]);
    ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_VIEWPORT_STATE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(1),
        ArgNode::aggregate(vec![viewport]),
        ArgNode::uint(1),
        ArgNode::aggregate(vec![scissor]),
    ])
}

/// Viewport state whose viewports and scissors are dynamic.
pub fn dynamic_viewport_state() -> ArgNode {
    ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_VIEWPORT_STATE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(1),
        ArgNode::null(),
        ArgNode::uint(1),
        ArgNode::null(),
    ])
}

pub fn rasterization_state() -> ArgNode {
    ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_RASTERIZATION_STATE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(0),
        ArgNode::uint(0),
        ArgNode::uint(0),
        ArgNode::uint(2),
        ArgNode::uint(0),
        ArgNode::uint(0),
        ArgNode::float(0.0),
        ArgNode::float(0.0),
        ArgNode::float(0.0),
        ArgNode::float(1.0),
    ])
}

pub fn multisample_state(samples: u64, sample_mask: Option<&[u64]>) -> ArgNode {
    ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_MULTISAMPLE_STATE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(samples),
        ArgNode::uint(0),
        ArgNode::float(1.0),
        sample_mask.map_or_else(ArgNode::null, uints),
        ArgNode::uint(0),
        ArgNode::uint(0),
    ])
}

fn stencil_op_state() -> ArgNode {
    uints(&[0, 0, 0, 7, 0xff, 0xff, 0])
}

pub fn depth_stencil_state() -> ArgNode {
    ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_DEPTH_STENCIL_STATE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(1),
        ArgNode::uint(1),
        ArgNode::uint(1),
        ArgNode::uint(0),
        ArgNode::uint(0),
        stencil_op_state(),
        stencil_op_state(),
        ArgNode::float(0.0),
        ArgNode::float(1.0),
    ])
}

pub fn color_blend_state() -> ArgNode {
    let attachments = vec![uints(&[1, 6, 7, 0, 1, 0, 0, 0xf])];
    ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_COLOR_BLEND_STATE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(0),
        ArgNode::uint(3),
        count(&attachments),
        ArgNode::aggregate(attachments),
        ArgNode::aggregate(vec![ArgNode::float(0.0); 4]),
    ])
}

pub fn dynamic_state(states: &[u64]) -> ArgNode {
    ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_DYNAMIC_STATE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(states.len() as u64),
        uints(states),
    ])
}
