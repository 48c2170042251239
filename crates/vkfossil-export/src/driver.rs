use tracing::{debug, trace};
use vkfossil_capture::{Capture, CaptureDriver};
use vkfossil_state::{decode_call, CallKind, DecodeOptions, Recorder};

use crate::error::{ExportError, ExportResult};

/// Counts from one pass over a capture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Records that matched a create call and were decoded.
    pub records_decoded: usize,
    /// Records with no decoder, left alone.
    pub records_skipped: usize,
    /// Objects handed to the recorder, duplicates included.
    pub objects_recorded: usize,
}

/// Walks a capture in stream order, feeding each create call to its decoder.
///
/// The first record that fails to decode ends the batch. Whatever was
/// recorded before it stays in the recorder, so callers that want
/// all-or-nothing output must drop the recorder on error.
#[derive(Clone, Copy, Debug, Default)]
pub struct BatchDriver {
    options: DecodeOptions,
}

impl BatchDriver {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode every supported record of `capture` into `recorder`.
    pub fn run(&self, capture: &Capture, recorder: &mut Recorder<'_>) -> ExportResult<BatchReport> {
        if capture.driver != CaptureDriver::Vulkan {
            return Err(ExportError::UnsupportedDriver(capture.driver));
        }

        let mut report = BatchReport::default();
        for (index, record) in capture.records.iter().enumerate() {
            let Some(call) = CallKind::from_call_name(&record.name) else {
                trace!(record = index, name = %record.name, "skipping record");
                report.records_skipped += 1;
                continue;
            };

            let objects = decode_call(recorder, call, record, &capture.buffers, &self.options)
                .map_err(|source| ExportError::Decode {
                    record: index,
                    call,
                    source,
                })?;
            report.records_decoded += 1;
            report.objects_recorded += objects.len();
        }

        debug!(
            decoded = report.records_decoded,
            skipped = report.records_skipped,
            objects = report.objects_recorded,
            "batch complete"
        );
        Ok(report)
    }
}
