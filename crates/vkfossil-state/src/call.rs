use std::fmt;

use vkfossil_types::ObjectKind;

/// The object-creation calls that can be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
    CreateSampler,
    CreateDescriptorSetLayout,
    CreatePipelineLayout,
    CreateShaderModule,
    CreateRenderPass,
    CreateComputePipelines,
    CreateGraphicsPipelines,
}

impl CallKind {
    pub const ALL: [CallKind; 7] = [
        Self::CreateSampler,
        Self::CreateDescriptorSetLayout,
        Self::CreatePipelineLayout,
        Self::CreateShaderModule,
        Self::CreateRenderPass,
        Self::CreateComputePipelines,
        Self::CreateGraphicsPipelines,
    ];

    /// Map a captured call name to its kind. Returns `None` for calls that
    /// create nothing worth exporting.
    pub fn from_call_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|call| call.call_name() == name)
    }

    pub fn call_name(&self) -> &'static str {
        match self {
            Self::CreateSampler => "vkCreateSampler",
            Self::CreateDescriptorSetLayout => "vkCreateDescriptorSetLayout",
            Self::CreatePipelineLayout => "vkCreatePipelineLayout",
            Self::CreateShaderModule => "vkCreateShaderModule",
            Self::CreateRenderPass => "vkCreateRenderPass",
            Self::CreateComputePipelines => "vkCreateComputePipelines",
            Self::CreateGraphicsPipelines => "vkCreateGraphicsPipelines",
        }
    }

    pub fn object_kind(&self) -> ObjectKind {
        match self {
            Self::CreateSampler => ObjectKind::Sampler,
            Self::CreateDescriptorSetLayout => ObjectKind::DescriptorSetLayout,
            Self::CreatePipelineLayout => ObjectKind::PipelineLayout,
            Self::CreateShaderModule => ObjectKind::ShaderModule,
            Self::CreateRenderPass => ObjectKind::RenderPass,
            Self::CreateComputePipelines => ObjectKind::ComputePipeline,
            Self::CreateGraphicsPipelines => ObjectKind::GraphicsPipeline,
        }
    }

    /// Top-level argument holding the create-info tree.
    ///
    /// `vkCreate*(device, pCreateInfo, pAllocator, pObject)` for single
    /// objects; `vkCreate*Pipelines(device, cache, count, pCreateInfos,
    /// pAllocator, pPipelines)` for pipelines.
    pub fn create_info_arg(&self) -> usize {
        if self.creates_pipelines() {
            3
        } else {
            1
        }
    }

    /// Top-level argument holding the created handle (or handles).
    pub fn handle_arg(&self) -> usize {
        if self.creates_pipelines() {
            5
        } else {
            3
        }
    }

    fn creates_pipelines(&self) -> bool {
        matches!(
            self,
            Self::CreateComputePipelines | Self::CreateGraphicsPipelines
        )
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.call_name())
    }
}
