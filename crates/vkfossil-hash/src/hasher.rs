use serde::Serialize;
use vkfossil_types::{ObjectHash, ObjectKind};

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g. `"vkfossil-sampler-v1"`) that is
/// prepended to every hash computation, so a sampler and a render pass whose
/// encoded bytes happen to coincide still hash differently.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    pub const SAMPLER: Self = Self::new("vkfossil-sampler-v1");
    pub const SET_LAYOUT: Self = Self::new("vkfossil-set-layout-v1");
    pub const PIPELINE_LAYOUT: Self = Self::new("vkfossil-pipeline-layout-v1");
    pub const SHADER_MODULE: Self = Self::new("vkfossil-shader-module-v1");
    pub const RENDER_PASS: Self = Self::new("vkfossil-render-pass-v1");
    pub const COMPUTE_PIPELINE: Self = Self::new("vkfossil-compute-pipeline-v1");
    pub const GRAPHICS_PIPELINE: Self = Self::new("vkfossil-graphics-pipeline-v1");

    const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// The hasher used for descriptors of the given kind.
    pub fn for_kind(kind: ObjectKind) -> &'static Self {
        match kind {
            ObjectKind::Sampler => &Self::SAMPLER,
            ObjectKind::DescriptorSetLayout => &Self::SET_LAYOUT,
            ObjectKind::PipelineLayout => &Self::PIPELINE_LAYOUT,
            ObjectKind::ShaderModule => &Self::SHADER_MODULE,
            ObjectKind::RenderPass => &Self::RENDER_PASS,
            ObjectKind::ComputePipeline => &Self::COMPUTE_PIPELINE,
            ObjectKind::GraphicsPipeline => &Self::GRAPHICS_PIPELINE,
        }
    }

    /// Hash a structured value with domain separation.
    ///
    /// The value is encoded with bincode directly into the hasher: fields
    /// are visited in declaration order, floats contribute their exact bit
    /// patterns, and every slice is length-prefixed, so nested arrays of
    /// different shapes never alias each other.
    pub fn hash_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<ObjectHash, HasherError> {
        let mut hasher = self.begin();
        bincode::serialize_into(&mut hasher, value)
            .map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(ObjectHash::from_hash(*hasher.finalize().as_bytes()))
    }

    fn begin(&self) -> blake3::Hasher {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher
    }
}

/// Errors from hashing operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}
