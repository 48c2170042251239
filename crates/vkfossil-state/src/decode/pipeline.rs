use vkfossil_capture::ArgCursor;
use vkfossil_types::ObjectKind;

use super::Decoder;
use crate::descriptor::*;
use crate::error::{DecodeError, DecodeResult};
use crate::vk::StructureType;

impl<'r, 'a> Decoder<'r, 'a> {
    /// `VkComputePipelineCreateInfo`. The stage is embedded by value.
    pub fn compute_pipeline(&self, c: &mut ArgCursor<'_>) -> DecodeResult<ComputePipelineInfo<'a>> {
        self.header(c, StructureType::COMPUTE_PIPELINE_CREATE_INFO)?;
        let flags = c.read_u32()?;
        let mut stage_cursor = c.read_struct()?;
        let stage = self.shader_stage(&mut stage_cursor)?;
        stage_cursor.finish()?;
        Ok(ComputePipelineInfo {
            flags,
            stage,
            layout: self.reference(c, ObjectKind::PipelineLayout)?,
            base_pipeline: self.reference(c, ObjectKind::ComputePipeline)?,
            base_pipeline_index: c.read_i32()?,
        })
    }

    /// `VkGraphicsPipelineCreateInfo`.
    pub fn graphics_pipeline(&self, c: &mut ArgCursor<'_>) -> DecodeResult<GraphicsPipelineInfo<'a>> {
        self.header(c, StructureType::GRAPHICS_PIPELINE_CREATE_INFO)?;
        Ok(GraphicsPipelineInfo {
            flags: c.read_u32()?,
            stages: self.counted_structs(c, "pStages", |s| self.shader_stage(s))?,
            vertex_input: self.optional(c, |s| self.vertex_input_state(s))?,
            input_assembly: self.optional(c, |s| self.input_assembly_state(s))?,
            tessellation: self.optional(c, |s| self.tessellation_state(s))?,
            viewport: self.optional(c, |s| self.viewport_state(s))?,
            rasterization: self.optional(c, |s| self.rasterization_state(s))?,
            multisample: self.optional(c, |s| self.multisample_state(s))?,
            depth_stencil: self.optional(c, |s| self.depth_stencil_state(s))?,
            color_blend: self.optional(c, |s| self.color_blend_state(s))?,
            dynamic: self.optional(c, |s| self.dynamic_state(s))?,
            layout: self.reference(c, ObjectKind::PipelineLayout)?,
            render_pass: self.reference(c, ObjectKind::RenderPass)?,
            subpass: c.read_u32()?,
            base_pipeline: self.reference(c, ObjectKind::GraphicsPipeline)?,
            base_pipeline_index: c.read_i32()?,
        })
    }

    /// `VkPipelineShaderStageCreateInfo`.
    fn shader_stage(&self, c: &mut ArgCursor<'_>) -> DecodeResult<ShaderStageInfo<'a>> {
        self.header(c, StructureType::PIPELINE_SHADER_STAGE_CREATE_INFO)?;
        Ok(ShaderStageInfo {
            flags: c.read_u32()?,
            stage: c.read_enum()?,
            module: self.reference(c, ObjectKind::ShaderModule)?,
            name: self.string(c)?,
            specialization: self.optional(c, |s| self.specialization(s))?,
        })
    }

    /// `VkSpecializationInfo`. `pData` is a buffer pool index, or null when
    /// there is no data.
    fn specialization(&self, c: &mut ArgCursor<'_>) -> DecodeResult<SpecializationInfo<'a>> {
        let map_entries = self.counted_structs(c, "pMapEntries", |e| {
            Ok(SpecializationMapEntry {
                constant_id: e.read_u32()?,
                offset: e.read_u32()?,
                size: e.read_u64()?,
            })
        })?;
        let data_size = c.read_u64()?;
        let data: &'a [u8] = match c.peek() {
            Some(node) if node.is_null() => {
                c.read_null()?;
                if data_size != 0 {
                    return Err(DecodeError::MissingArray { field: "pData" });
                }
                &[]
            }
            _ => self.buffer(c.read_u64()?, data_size)?,
        };
        Ok(SpecializationInfo {
            map_entries,
            data_size,
            data,
        })
    }
}
