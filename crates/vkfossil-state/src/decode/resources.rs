use vkfossil_capture::ArgCursor;
use vkfossil_types::ObjectKind;

use super::Decoder;
use crate::descriptor::*;
use crate::error::DecodeResult;
use crate::vk::StructureType;

impl<'r, 'a> Decoder<'r, 'a> {
    /// `VkSamplerCreateInfo`.
    pub fn sampler(&self, c: &mut ArgCursor<'_>) -> DecodeResult<SamplerInfo> {
        self.header(c, StructureType::SAMPLER_CREATE_INFO)?;
        Ok(SamplerInfo {
            flags: c.read_u32()?,
            mag_filter: c.read_enum()?,
            min_filter: c.read_enum()?,
            mipmap_mode: c.read_enum()?,
            address_mode_u: c.read_enum()?,
            address_mode_v: c.read_enum()?,
            address_mode_w: c.read_enum()?,
            mip_lod_bias: c.read_f32()?,
            anisotropy_enable: c.read_bool32()?,
            max_anisotropy: c.read_f32()?,
            compare_enable: c.read_bool32()?,
            compare_op: c.read_enum()?,
            min_lod: c.read_f32()?,
            max_lod: c.read_f32()?,
            border_color: c.read_enum()?,
            unnormalized_coordinates: c.read_bool32()?,
        })
    }

    /// `VkDescriptorSetLayoutCreateInfo`.
    pub fn set_layout(&self, c: &mut ArgCursor<'_>) -> DecodeResult<SetLayoutInfo<'a>> {
        self.header(c, StructureType::DESCRIPTOR_SET_LAYOUT_CREATE_INFO)?;
        Ok(SetLayoutInfo {
            flags: c.read_u32()?,
            bindings: self.counted_structs(c, "pBindings", |b| self.set_layout_binding(b))?,
        })
    }

    fn set_layout_binding(&self, c: &mut ArgCursor<'_>) -> DecodeResult<SetLayoutBinding<'a>> {
        let binding = c.read_u32()?;
        let descriptor_type = c.read_enum()?;
        let descriptor_count = c.read_u32()?;
        let stage_flags = c.read_enum()?;
        let immutable_samplers =
            self.nullable_scalars(c, "pImmutableSamplers", descriptor_count.into(), |s| {
                self.reference(s, ObjectKind::Sampler)
            })?;
        Ok(SetLayoutBinding {
            binding,
            descriptor_type,
            descriptor_count,
            stage_flags,
            immutable_samplers,
        })
    }

    /// `VkPipelineLayoutCreateInfo`.
    pub fn pipeline_layout(&self, c: &mut ArgCursor<'_>) -> DecodeResult<PipelineLayoutInfo<'a>> {
        self.header(c, StructureType::PIPELINE_LAYOUT_CREATE_INFO)?;
        Ok(PipelineLayoutInfo {
            flags: c.read_u32()?,
            set_layouts: self.counted_scalars(c, "pSetLayouts", |s| {
                self.reference(s, ObjectKind::DescriptorSetLayout)
            })?,
            push_constant_ranges: self.counted_structs(c, "pPushConstantRanges", |r| {
                Ok(PushConstantRange {
                    stage_flags: r.read_enum()?,
                    offset: r.read_u32()?,
                    size: r.read_u32()?,
                })
            })?,
        })
    }

    /// `VkShaderModuleCreateInfo`. `pCode` is an index into the buffer pool
    /// whose buffer must be exactly `codeSize` bytes.
    pub fn shader_module(&self, c: &mut ArgCursor<'_>) -> DecodeResult<ShaderModuleInfo<'a>> {
        self.header(c, StructureType::SHADER_MODULE_CREATE_INFO)?;
        let flags = c.read_u32()?;
        let code_size = c.read_u64()?;
        let code = self.buffer(c.read_u64()?, code_size)?;
        Ok(ShaderModuleInfo {
            flags,
            code_size,
            code,
        })
    }
}
