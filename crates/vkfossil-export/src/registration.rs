use std::path::{Path, PathBuf};

use serde::Serialize;

/// How a converter presents itself to a host application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ConverterInfo {
    /// File extension of the output, without the leading dot.
    pub extension: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Whether the converter reads an existing file at the output path.
    pub opens_input: bool,
}

impl ConverterInfo {
    /// Default output path next to `input`: `capture.json` becomes
    /// `capture.fossilize.json`.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        input.with_extension(self.extension)
    }
}

pub const FOSSILIZE_CONVERTER: ConverterInfo = ConverterInfo {
    extension: "fossilize.json",
    name: "Fossilize state exporter",
    description: "Exports Vulkan state for various persistent objects.",
    opens_input: false,
};
