use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;
use vkfossil_arena::Arena;
use vkfossil_capture::Capture;
use vkfossil_state::Recorder;
use vkfossil_types::ObjectKind;

use crate::blob::StateBlob;
use crate::config::ExportConfig;
use crate::driver::BatchDriver;
use crate::error::{ExportError, ExportResult};

/// Result of a successful export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    /// Deduplicated entries per kind, in [`ObjectKind::ALL`] order.
    pub entries: Vec<(ObjectKind, usize)>,
    pub records_decoded: usize,
    pub records_skipped: usize,
    pub objects_recorded: usize,
    pub bytes_written: usize,
}

impl ExportSummary {
    pub fn entry_count(&self, kind: ObjectKind) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total_entries(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

/// Turns captures into state blobs on disk.
#[derive(Clone, Debug, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Render the recorder's tables as a blob.
    pub fn serialize(&self, recorder: &Recorder<'_>) -> ExportResult<Vec<u8>> {
        StateBlob::from_recorder(recorder)
            .to_json(self.config.pretty)
            .map_err(|e| ExportError::Serialization(e.to_string()))
    }

    /// Decode `capture` and write its blob to `path`.
    ///
    /// Nothing touches `path` unless every record decodes. `progress`, when
    /// given, sees 0.0 on entry, 0.5 once the blob is in memory and 1.0 once
    /// it is on disk.
    pub fn export(
        &self,
        capture: &Capture,
        path: &Path,
        mut progress: Option<&mut dyn FnMut(f32)>,
    ) -> ExportResult<ExportSummary> {
        report(&mut progress, 0.0);

        let arena = Arena::new();
        let mut recorder = Recorder::new(&arena);
        let batch = BatchDriver::new(self.config.decode_options()).run(capture, &mut recorder)?;
        let bytes = self.serialize(&recorder)?;
        report(&mut progress, 0.5);

        write_atomic(path, &bytes)?;
        report(&mut progress, 1.0);

        let summary = ExportSummary {
            path: path.to_path_buf(),
            entries: ObjectKind::ALL
                .iter()
                .map(|kind| (*kind, recorder.len(*kind)))
                .collect(),
            records_decoded: batch.records_decoded,
            records_skipped: batch.records_skipped,
            objects_recorded: batch.objects_recorded,
            bytes_written: bytes.len(),
        };
        info!(
            path = %path.display(),
            entries = summary.total_entries(),
            bytes = summary.bytes_written,
            arena_bytes = arena.allocated_bytes(),
            "export complete"
        );
        Ok(summary)
    }
}

fn report(progress: &mut Option<&mut dyn FnMut(f32)>, value: f32) {
    if let Some(callback) = progress.as_deref_mut() {
        callback(value);
    }
}

/// Export `capture` to `path` with the given configuration.
pub fn export_capture(
    capture: &Capture,
    path: &Path,
    config: &ExportConfig,
    progress: Option<&mut dyn FnMut(f32)>,
) -> ExportResult<ExportSummary> {
    Exporter::new(config.clone()).export(capture, path, progress)
}

/// Replace `path` with `bytes` in one rename.
///
/// The data goes to a temporary file in the destination directory first, so
/// readers see either the old contents or the new, never a partial blob.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
