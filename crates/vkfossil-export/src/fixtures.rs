//! Small captures for exporter tests.

use vkfossil_capture::{ArgNode, CallRecord, Capture, CaptureDriver};
use vkfossil_state::vk::StructureType;

fn s_type(value: StructureType) -> ArgNode {
    ArgNode::uint(value.as_raw().into())
}

fn create_call(name: &str, info: ArgNode, handle: u64) -> CallRecord {
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

pub fn sampler(handle: u64, max_lod: f64) -> CallRecord {
    let info = ArgNode::aggregate(vec![
        s_type(StructureType::SAMPLER_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(1),
        ArgNode::uint(1),
        ArgNode::uint(0),
        ArgNode::uint(0),
        ArgNode::uint(0),
        ArgNode::uint(0),
        ArgNode::float(0.0),
        ArgNode::uint(0),
        ArgNode::float(1.0),
        ArgNode::uint(0),
        ArgNode::uint(0),
        ArgNode::float(0.0),
        ArgNode::float(max_lod),
        ArgNode::uint(0),
        ArgNode::uint(0),
    ]);
    create_call("vkCreateSampler", info, handle)
}

/// One combined-image-sampler binding with `sampler` as its immutable sampler.
pub fn set_layout(handle: u64, sampler: u64) -> CallRecord {
    let binding = ArgNode::aggregate(vec![
        ArgNode::uint(0),
        ArgNode::uint(1),
        ArgNode::uint(1),
        ArgNode::uint(0x10),
        ArgNode::aggregate(vec![ArgNode::uint(sampler)]),
    ]);
    let info = ArgNode::aggregate(vec![
        s_type(StructureType::DESCRIPTOR_SET_LAYOUT_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(1),
        ArgNode::aggregate(vec![binding]),
    ]);
    create_call("vkCreateDescriptorSetLayout", info, handle)
}

pub fn pipeline_layout(handle: u64, set_layout: u64) -> CallRecord {
    let info = ArgNode::aggregate(vec![
        s_type(StructureType::PIPELINE_LAYOUT_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(1),
        ArgNode::aggregate(vec![ArgNode::uint(set_layout)]),
        ArgNode::uint(0),
        ArgNode::null(),
    ]);
    create_call("vkCreatePipelineLayout", info, handle)
}

pub fn shader_module(handle: u64, code_size: u64, buffer: u64) -> CallRecord {
    let info = ArgNode::aggregate(vec![
        s_type(StructureType::SHADER_MODULE_CREATE_INFO),
        ArgNode::null(),
        ArgNode::uint(0),
        ArgNode::uint(code_size),
        ArgNode::uint(buffer),
    ]);
    create_call("vkCreateShaderModule", info, handle)
}

/// A call the exporter has no decoder for.
pub fn queue_submit() -> CallRecord {
    CallRecord::new(
        "vkQueueSubmit",
        vec![ArgNode::uint(0xe0), ArgNode::uint(0), ArgNode::null(), ArgNode::uint(0)],
    )
}

/// Sampler, set layout using it, pipeline layout using that.
pub fn chained_capture() -> Capture {
    let mut capture = Capture::new(CaptureDriver::Vulkan);
    capture.push(sampler(0x10, 4.0));
    capture.push(set_layout(0x20, 0x10));
    capture.push(pipeline_layout(0x30, 0x20));
    capture
}
