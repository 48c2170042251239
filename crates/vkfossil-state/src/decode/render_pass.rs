use vkfossil_capture::ArgCursor;

use super::Decoder;
use crate::descriptor::*;
use crate::error::DecodeResult;
use crate::vk::StructureType;

impl<'r, 'a> Decoder<'r, 'a> {
    /// `VkRenderPassCreateInfo`.
    pub fn render_pass(&self, c: &mut ArgCursor<'_>) -> DecodeResult<RenderPassInfo<'a>> {
        self.header(c, StructureType::RENDER_PASS_CREATE_INFO)?;
        Ok(RenderPassInfo {
            flags: c.read_u32()?,
            attachments: self.counted_structs(c, "pAttachments", attachment_description)?,
            subpasses: self.counted_structs(c, "pSubpasses", |s| self.subpass(s))?,
            dependencies: self.counted_structs(c, "pDependencies", subpass_dependency)?,
        })
    }

    fn subpass(&self, c: &mut ArgCursor<'_>) -> DecodeResult<SubpassDescription<'a>> {
        let flags = c.read_u32()?;
        let pipeline_bind_point = c.read_enum()?;
        let input_attachments = self.counted_structs(c, "pInputAttachments", attachment_reference)?;
        let color_attachments = self.counted_structs(c, "pColorAttachments", attachment_reference)?;
        let resolve_attachments = self.nullable_structs(
            c,
            "pResolveAttachments",
            color_attachments.len() as u64,
            attachment_reference,
        )?;
        let depth_stencil_attachment = self.optional(c, attachment_reference)?;
        let preserve_attachments =
            self.counted_scalars(c, "pPreserveAttachments", |p| Ok(p.read_u32()?))?;
        Ok(SubpassDescription {
            flags,
            pipeline_bind_point,
            input_attachments,
            color_attachments,
            resolve_attachments,
            depth_stencil_attachment,
            preserve_attachments,
        })
    }
}

fn attachment_description(c: &mut ArgCursor<'_>) -> DecodeResult<AttachmentDescription> {
    Ok(AttachmentDescription {
        flags: c.read_u32()?,
        format: c.read_enum()?,
        samples: c.read_enum()?,
        load_op: c.read_enum()?,
        store_op: c.read_enum()?,
        stencil_load_op: c.read_enum()?,
        stencil_store_op: c.read_enum()?,
        initial_layout: c.read_enum()?,
        final_layout: c.read_enum()?,
    })
}

fn attachment_reference(c: &mut ArgCursor<'_>) -> DecodeResult<AttachmentReference> {
    Ok(AttachmentReference {
        attachment: c.read_u32()?,
        layout: c.read_enum()?,
    })
}

fn subpass_dependency(c: &mut ArgCursor<'_>) -> DecodeResult<SubpassDependency> {
    Ok(SubpassDependency {
        src_subpass: c.read_u32()?,
        dst_subpass: c.read_u32()?,
        src_stage_mask: c.read_u32()?,
        dst_stage_mask: c.read_u32()?,
        src_access_mask: c.read_u32()?,
        dst_access_mask: c.read_u32()?,
        dependency_flags: c.read_u32()?,
    })
}
