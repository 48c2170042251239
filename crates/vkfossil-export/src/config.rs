use serde::{Deserialize, Serialize};
use vkfossil_state::{DecodeOptions, HandlePolicy};

/// Configuration for one export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// What to do with handles that were never created in the capture.
    pub handle_policy: HandlePolicy,
    /// Indent the blob for reading by humans.
    pub pretty: bool,
    /// Reject create-infos whose `sType` does not match the struct.
    pub validate_structure_types: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            handle_policy: HandlePolicy::Strict,
            pretty: true,
            validate_structure_types: true,
        }
    }
}

impl ExportConfig {
    /// Keep going past dangling handles and mistyped structs.
    ///
    /// Useful for salvaging state from a capture that was trimmed or
    /// recorded mid-frame. The blob may then contain unresolved references.
    pub fn lenient() -> Self {
        Self {
            handle_policy: HandlePolicy::PassThrough,
            validate_structure_types: false,
            ..Default::default()
        }
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            handle_policy: self.handle_policy,
            validate_structure_types: self.validate_structure_types,
        }
    }
}
