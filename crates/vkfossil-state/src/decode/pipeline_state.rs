//! Fixed-function state blocks of a graphics pipeline.

use vkfossil_capture::ArgCursor;

use super::Decoder;
use crate::descriptor::*;
use crate::error::DecodeResult;
use crate::vk::{SampleCountFlags, StructureType};

impl<'r, 'a> Decoder<'r, 'a> {
    pub(super) fn vertex_input_state(&self, c: &mut ArgCursor<'_>) -> DecodeResult<VertexInputInfo<'a>> {
        self.header(c, StructureType::PIPELINE_VERTEX_INPUT_STATE_CREATE_INFO)?;
        Ok(VertexInputInfo {
            flags: c.read_u32()?,
            bindings: self.counted_structs(c, "pVertexBindingDescriptions", |b| {
                Ok(VertexBinding {
                    binding: b.read_u32()?,
                    stride: b.read_u32()?,
                    input_rate: b.read_enum()?,
                })
            })?,
            attributes: self.counted_structs(c, "pVertexAttributeDescriptions", |a| {
                Ok(VertexAttribute {
                    location: a.read_u32()?,
                    binding: a.read_u32()?,
                    format: a.read_enum()?,
                    offset: a.read_u32()?,
                })
            })?,
        })
    }

    pub(super) fn input_assembly_state(&self, c: &mut ArgCursor<'_>) -> DecodeResult<InputAssemblyInfo> {
        self.header(c, StructureType::PIPELINE_INPUT_ASSEMBLY_STATE_CREATE_INFO)?;
        Ok(InputAssemblyInfo {
            flags: c.read_u32()?,
            topology: c.read_enum()?,
            primitive_restart_enable: c.read_bool32()?,
        })
    }

    pub(super) fn tessellation_state(&self, c: &mut ArgCursor<'_>) -> DecodeResult<TessellationInfo> {
        self.header(c, StructureType::PIPELINE_TESSELLATION_STATE_CREATE_INFO)?;
        Ok(TessellationInfo {
            flags: c.read_u32()?,
            patch_control_points: c.read_u32()?,
        })
    }

    /// Viewports and scissors may be null when they are dynamic state; the
    /// counts are kept either way.
    pub(super) fn viewport_state(&self, c: &mut ArgCursor<'_>) -> DecodeResult<ViewportInfo<'a>> {
        self.header(c, StructureType::PIPELINE_VIEWPORT_STATE_CREATE_INFO)?;
        let flags = c.read_u32()?;
        let viewport_count = c.read_u32()?;
        let viewports = self.nullable_structs(c, "pViewports", viewport_count.into(), viewport)?;
        let scissor_count = c.read_u32()?;
        let scissors = self.nullable_structs(c, "pScissors", scissor_count.into(), rect_2d)?;
        Ok(ViewportInfo {
            flags,
            viewport_count,
            viewports,
            scissor_count,
            scissors,
        })
    }

    pub(super) fn rasterization_state(&self, c: &mut ArgCursor<'_>) -> DecodeResult<RasterizationInfo> {
        self.header(c, StructureType::PIPELINE_RASTERIZATION_STATE_CREATE_INFO)?;
        Ok(RasterizationInfo {
            flags: c.read_u32()?,
            depth_clamp_enable: c.read_bool32()?,
            rasterizer_discard_enable: c.read_bool32()?,
            polygon_mode: c.read_enum()?,
            cull_mode: c.read_enum()?,
            front_face: c.read_enum()?,
            depth_bias_enable: c.read_bool32()?,
            depth_bias_constant_factor: c.read_f32()?,
            depth_bias_clamp: c.read_f32()?,
            depth_bias_slope_factor: c.read_f32()?,
            line_width: c.read_f32()?,
        })
    }

    /// The sample mask, when present, holds one word per 32 samples.
    pub(super) fn multisample_state(&self, c: &mut ArgCursor<'_>) -> DecodeResult<MultisampleInfo<'a>> {
        self.header(c, StructureType::PIPELINE_MULTISAMPLE_STATE_CREATE_INFO)?;
        let flags = c.read_u32()?;
        let rasterization_samples: SampleCountFlags = c.read_enum()?;
        let sample_shading_enable = c.read_bool32()?;
        let min_sample_shading = c.read_f32()?;
        let mask_words = u64::from(rasterization_samples.as_raw()).div_ceil(32);
        let sample_mask =
            self.nullable_scalars(c, "pSampleMask", mask_words, |m| Ok(m.read_u32()?))?;
        Ok(MultisampleInfo {
            flags,
            rasterization_samples,
            sample_shading_enable,
            min_sample_shading,
            sample_mask,
            alpha_to_coverage_enable: c.read_bool32()?,
            alpha_to_one_enable: c.read_bool32()?,
        })
    }

    pub(super) fn depth_stencil_state(&self, c: &mut ArgCursor<'_>) -> DecodeResult<DepthStencilInfo> {
        self.header(c, StructureType::PIPELINE_DEPTH_STENCIL_STATE_CREATE_INFO)?;
        Ok(DepthStencilInfo {
            flags: c.read_u32()?,
            depth_test_enable: c.read_bool32()?,
            depth_write_enable: c.read_bool32()?,
            depth_compare_op: c.read_enum()?,
            depth_bounds_test_enable: c.read_bool32()?,
            stencil_test_enable: c.read_bool32()?,
            front: stencil_op_state(c.read_struct()?)?,
            back: stencil_op_state(c.read_struct()?)?,
            min_depth_bounds: c.read_f32()?,
            max_depth_bounds: c.read_f32()?,
        })
    }

    pub(super) fn color_blend_state(&self, c: &mut ArgCursor<'_>) -> DecodeResult<ColorBlendInfo<'a>> {
        self.header(c, StructureType::PIPELINE_COLOR_BLEND_STATE_CREATE_INFO)?;
        let flags = c.read_u32()?;
        let logic_op_enable = c.read_bool32()?;
        let logic_op = c.read_enum()?;
        let attachments = self.counted_structs(c, "pAttachments", color_blend_attachment)?;
        let mut constants = c.read_struct()?;
        let blend_constants = [
            constants.read_f32()?,
            constants.read_f32()?,
            constants.read_f32()?,
            constants.read_f32()?,
        ];
        constants.finish()?;
        Ok(ColorBlendInfo {
            flags,
            logic_op_enable,
            logic_op,
            attachments,
            blend_constants,
        })
    }

    pub(super) fn dynamic_state(&self, c: &mut ArgCursor<'_>) -> DecodeResult<DynamicInfo<'a>> {
        self.header(c, StructureType::PIPELINE_DYNAMIC_STATE_CREATE_INFO)?;
        Ok(DynamicInfo {
            flags: c.read_u32()?,
            dynamic_states: self.counted_scalars(c, "pDynamicStates", |s| Ok(s.read_enum()?))?,
        })
    }
}

fn viewport(c: &mut ArgCursor<'_>) -> DecodeResult<Viewport> {
    Ok(Viewport {
        x: c.read_f32()?,
        y: c.read_f32()?,
        width: c.read_f32()?,
        height: c.read_f32()?,
        min_depth: c.read_f32()?,
        max_depth: c.read_f32()?,
    })
}

/// `VkRect2D`: an offset aggregate followed by an extent aggregate.
fn rect_2d(c: &mut ArgCursor<'_>) -> DecodeResult<Rect2D> {
    let mut offset = c.read_struct()?;
    let x = offset.read_i32()?;
    let y = offset.read_i32()?;
    offset.finish()?;
    let mut extent = c.read_struct()?;
    let width = extent.read_u32()?;
    let height = extent.read_u32()?;
    extent.finish()?;
    Ok(Rect2D {
        x,
        y,
        width,
        height,
    })
}

fn stencil_op_state(mut c: ArgCursor<'_>) -> DecodeResult<StencilOpState> {
    let state = StencilOpState {
        fail_op: c.read_enum()?,
        pass_op: c.read_enum()?,
        depth_fail_op: c.read_enum()?,
        compare_op: c.read_enum()?,
        compare_mask: c.read_u32()?,
        write_mask: c.read_u32()?,
        reference: c.read_u32()?,
    };
    c.finish()?;
    Ok(state)
}

fn color_blend_attachment(c: &mut ArgCursor<'_>) -> DecodeResult<ColorBlendAttachment> {
    Ok(ColorBlendAttachment {
        blend_enable: c.read_bool32()?,
        src_color_blend_factor: c.read_enum()?,
        dst_color_blend_factor: c.read_enum()?,
        color_blend_op: c.read_enum()?,
        src_alpha_blend_factor: c.read_enum()?,
        dst_alpha_blend_factor: c.read_enum()?,
        alpha_blend_op: c.read_enum()?,
        color_write_mask: c.read_enum()?,
    })
}
