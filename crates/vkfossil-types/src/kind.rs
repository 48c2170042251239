use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The kind of persistent Vulkan object a descriptor describes.
///
/// Each kind has its own deduplication table and its own handle namespace in
/// the registry; the declaration order here is also the order in which kinds
/// are laid out in an exported blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    Sampler,
    DescriptorSetLayout,
    PipelineLayout,
    ShaderModule,
    RenderPass,
    ComputePipeline,
    GraphicsPipeline,
}

impl ObjectKind {
    /// Every kind, in blob order.
    pub const ALL: [ObjectKind; 7] = [
        Self::Sampler,
        Self::DescriptorSetLayout,
        Self::PipelineLayout,
        Self::ShaderModule,
        Self::RenderPass,
        Self::ComputePipeline,
        Self::GraphicsPipeline,
    ];

    /// Key under which this kind's entry table is stored in an exported blob.
    pub fn blob_key(&self) -> &'static str {
        match self {
            Self::Sampler => "samplers",
            Self::DescriptorSetLayout => "setLayouts",
            Self::PipelineLayout => "pipelineLayouts",
            Self::ShaderModule => "shaderModules",
            Self::RenderPass => "renderPasses",
            Self::ComputePipeline => "computePipelines",
            Self::GraphicsPipeline => "graphicsPipelines",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sampler => write!(f, "sampler"),
            Self::DescriptorSetLayout => write!(f, "descriptor-set-layout"),
            Self::PipelineLayout => write!(f, "pipeline-layout"),
            Self::ShaderModule => write!(f, "shader-module"),
            Self::RenderPass => write!(f, "render-pass"),
            Self::ComputePipeline => write!(f, "compute-pipeline"),
            Self::GraphicsPipeline => write!(f, "graphics-pipeline"),
        }
    }
}

impl FromStr for ObjectKind {
    type Err = TypeError;

    /// Accepts either the display name (`render-pass`) or the blob key
    /// (`renderPasses`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s || kind.blob_key() == s)
            .ok_or_else(|| TypeError::UnknownKind(s.to_string()))
    }
}
