//! The exported JSON document.
//!
//! One array per object kind, in dense-index order, so an entry's position
//! is the number other entries use to refer to it.

use serde::Serialize;
use vkfossil_state::descriptor::*;
use vkfossil_state::{Recorder, StateDescriptor};

/// Format revision written to the `version` field.
pub const BLOB_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateBlob<'r, 'a> {
    pub version: u32,
    pub samplers: Vec<BlobEntry<'r, SamplerInfo>>,
    pub set_layouts: Vec<BlobEntry<'r, SetLayoutInfo<'a>>>,
    pub pipeline_layouts: Vec<BlobEntry<'r, PipelineLayoutInfo<'a>>>,
    pub shader_modules: Vec<BlobEntry<'r, ShaderModuleInfo<'a>>>,
    pub render_passes: Vec<BlobEntry<'r, RenderPassInfo<'a>>>,
    pub compute_pipelines: Vec<BlobEntry<'r, ComputePipelineInfo<'a>>>,
    pub graphics_pipelines: Vec<BlobEntry<'r, GraphicsPipelineInfo<'a>>>,
}

#[derive(Debug, Serialize)]
pub struct BlobEntry<'r, D> {
    pub index: u32,
    /// Hex-encoded content hash.
    pub hash: String,
    pub info: &'r D,
}

impl<'r, 'a> StateBlob<'r, 'a> {
    pub fn from_recorder(recorder: &'r Recorder<'a>) -> Self {
        Self {
            version: BLOB_VERSION,
            samplers: entries(recorder),
            set_layouts: entries(recorder),
            pipeline_layouts: entries(recorder),
            shader_modules: entries(recorder),
            render_passes: entries(recorder),
            compute_pipelines: entries(recorder),
            graphics_pipelines: entries(recorder),
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<Vec<u8>> {
        if pretty {
            serde_json::to_vec_pretty(self)
        } else {
            serde_json::to_vec(self)
        }
    }
}

fn entries<'r, 'a, D: StateDescriptor<'a>>(recorder: &'r Recorder<'a>) -> Vec<BlobEntry<'r, D>> {
    recorder
        .table::<D>()
        .entries()
        .iter()
        .zip(0u32..)
        .map(|(entry, index)| BlobEntry {
            index,
            hash: entry.hash.to_hex(),
            info: &entry.descriptor,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::BatchDriver;
    use crate::fixtures::*;
    use serde_json::{json, Value};
    use vkfossil_arena::Arena;

    fn blob_json(capture: &vkfossil_capture::Capture) -> Value {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        BatchDriver::default().run(capture, &mut recorder).unwrap();
        let bytes = StateBlob::from_recorder(&recorder).to_json(false).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn every_kind_has_an_array() {
        let blob = blob_json(&vkfossil_capture::Capture::new(
            vkfossil_capture::CaptureDriver::Vulkan,
        ));
        assert_eq!(blob["version"], json!(1));
        for key in [
            "samplers",
            "setLayouts",
            "pipelineLayouts",
            "shaderModules",
            "renderPasses",
            "computePipelines",
            "graphicsPipelines",
        ] {
            assert_eq!(blob[key], json!([]), "{key}");
        }
    }

    #[test]
    fn references_render_as_indices() {
        let blob = blob_json(&chained_capture());

        let sampler = &blob["samplers"][0];
        assert_eq!(sampler["index"], json!(0));
        assert_eq!(sampler["hash"].as_str().unwrap().len(), 64);
        assert_eq!(sampler["info"]["maxLod"], json!(4.0));

        let binding = &blob["setLayouts"][0]["info"]["bindings"][0];
        assert_eq!(binding["immutableSamplers"], json!([0]));
        assert_eq!(
            blob["pipelineLayouts"][0]["info"]["setLayouts"],
            json!([0])
        );
    }

    #[test]
    fn entries_follow_dense_index_order() {
        let mut capture = chained_capture();
        capture.push(sampler(0x11, 8.0));
        capture.push(sampler(0x12, 4.0));
        capture.push(sampler(0x13, 2.0));
        let blob = blob_json(&capture);

        let samplers = blob["samplers"].as_array().unwrap();
        assert_eq!(samplers.len(), 3);
        for (position, entry) in samplers.iter().enumerate() {
            assert_eq!(entry["index"], json!(position));
        }
        assert_eq!(samplers[1]["info"]["maxLod"], json!(8.0));
        assert_eq!(samplers[2]["info"]["maxLod"], json!(2.0));
    }

    #[test]
    fn pretty_output_is_the_same_document() {
        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        BatchDriver::default()
            .run(&chained_capture(), &mut recorder)
            .unwrap();
        let blob = StateBlob::from_recorder(&recorder);
        let pretty = blob.to_json(true).unwrap();
        let compact = blob.to_json(false).unwrap();
        assert!(pretty.len() > compact.len());
        assert_eq!(
            serde_json::from_slice::<Value>(&pretty).unwrap(),
            serde_json::from_slice::<Value>(&compact).unwrap()
        );
    }
}
