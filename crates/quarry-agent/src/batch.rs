//! Sequential JSONL batch runner.
//!
//! One output record per job line, in input order. A malformed line or a panic
//! while answering yields a zero-confidence record and the batch moves on.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use tracing::{info, warn};

use quarry_core::constants::CONFIDENCE_NONE;
use quarry_core::errors::JobError;
use quarry_core::types::answer::truncate_explanation;
use quarry_core::types::{FinalAnswer, Job, OutputRecord};

use crate::agent::HybridAgent;

/// Counts from one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    /// Records produced from a contained fault rather than an answer.
    pub faults: usize,
}

/// Answer every job in `input`, writing one JSON line per job to `output`.
/// Blank lines are skipped. Only a failing reader or writer aborts the run;
/// a line that is not UTF-8 or not a job becomes a fault record.
pub fn run_batch<R: BufRead, W: Write>(
    agent: &mut HybridAgent,
    input: R,
    mut output: W,
) -> Result<BatchReport, JobError> {
    let mut report = BatchReport::default();

    for (index, bytes) in input.split(b'\n').enumerate() {
        let line_no = index + 1;
        let mut bytes = bytes.map_err(|e| io_err("<input>", e))?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        let record = match String::from_utf8(bytes) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => match serde_json::from_str::<Job>(&line) {
                Ok(job) => answer_contained(agent, &job),
                Err(e) => Err((
                    fallback_id(&line, line_no),
                    JobError::InvalidJob {
                        line: line_no,
                        message: e.to_string(),
                    },
                )),
            },
            Err(e) => Err((
                format!("line-{line_no}"),
                JobError::InvalidJob {
                    line: line_no,
                    message: format!("not valid UTF-8: {e}"),
                },
            )),
        };

        let record = record.unwrap_or_else(|(id, err)| {
            warn!(event = "job_fault", line = line_no, error = %err, "job fault contained");
            report.faults += 1;
            fault_record(id, &err)
        });

        let json = serde_json::to_string(&record).map_err(|e| JobError::Io {
            path: "<output>".to_string(),
            message: e.to_string(),
        })?;
        writeln!(output, "{json}").map_err(|e| io_err("<output>", e))?;
        report.processed += 1;
    }

    output.flush().map_err(|e| io_err("<output>", e))?;
    info!(
        event = "batch_complete",
        processed = report.processed,
        faults = report.faults,
        "batch complete"
    );
    Ok(report)
}

/// File-based wrapper around [`run_batch`].
pub fn run_batch_files(
    agent: &mut HybridAgent,
    batch: &Path,
    out: &Path,
) -> Result<BatchReport, JobError> {
    let input = File::open(batch).map_err(|e| io_err(&batch.display().to_string(), e))?;
    let output = File::create(out).map_err(|e| io_err(&out.display().to_string(), e))?;
    run_batch(agent, BufReader::new(input), BufWriter::new(output))
}

fn answer_contained(agent: &mut HybridAgent, job: &Job) -> Result<OutputRecord, (String, JobError)> {
    let result = catch_unwind(AssertUnwindSafe(|| agent.answer(&job.question, &job.format_hint)));
    match result {
        Ok(envelope) => Ok(OutputRecord::from_envelope(job.id.clone(), envelope)),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err((job.id.clone(), JobError::Panicked { message }))
        }
    }
}

/// Best-effort id for a line that is not a valid job.
fn fallback_id(line: &str, line_no: usize) -> String {
    serde_json::from_str::<serde_json::Value>(line)
        .ok()
        .and_then(|v| v.get("id").and_then(|id| id.as_str().map(str::to_string)))
        .unwrap_or_else(|| format!("line-{line_no}"))
}

fn fault_record(id: String, err: &JobError) -> OutputRecord {
    OutputRecord {
        id,
        final_answer: FinalAnswer::empty(),
        query: String::new(),
        confidence: CONFIDENCE_NONE,
        explanation: truncate_explanation(&err.to_string()),
        citations: Vec::new(),
    }
}

fn io_err(path: &str, e: std::io::Error) -> JobError {
    JobError::Io {
        path: path.to_string(),
        message: e.to_string(),
    }
}
