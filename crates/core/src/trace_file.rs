//! Decision traces on disk.
//!
//! One JSON object per line. The first line carries the trace format version
//! and the policy config; each later line wraps one [`TraceRecord`] with its
//! sequence number and a SHA-256 link to the line before it. A record is
//! flushed as soon as it is appended. The loader rejects the file at the
//! first line whose shape, sequence number or digest does not check out.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::mem;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::PolicyConfig;
use crate::trace::{DecisionTrace, TRACE_FORMAT_VERSION, TraceRecord};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct FileHeader {
    format_version: u16,
    config: PolicyConfig,
}

/// Fields hashed for a record, serialized as JSON and concatenated with
/// `prev_sha256_hex`.
#[derive(Serialize)]
struct RecordBody<'a> {
    seq: u64,
    record: &'a TraceRecord,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    record: TraceRecord,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// `prev_sha256_hex` of record 0.
const GENESIS_DIGEST: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn chain_digest(body_json: &str, previous: &str) -> String {
    let digest = Sha256::new().chain_update(body_json).chain_update(previous).finalize();
    format!("{digest:064x}")
}

/// Appends decisions to a JSONL trace file.
pub struct TraceWriter {
    writer: BufWriter<File>,
    head: String,
    next_seq: u64,
}

impl TraceWriter {
    /// Creates the file and writes the header line immediately.
    pub fn create(path: &Path, config: &PolicyConfig) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);

        let header = FileHeader { format_version: TRACE_FORMAT_VERSION, config: config.clone() };
        serde_json::to_writer(&mut writer, &header).map_err(io::Error::other)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(Self { writer, head: GENESIS_DIGEST.to_owned(), next_seq: 0 })
    }

    /// Appends one record and flushes.
    pub fn append(&mut self, record: &TraceRecord) -> io::Result<()> {
        let seq = self.next_seq;
        let body = serde_json::to_string(&RecordBody { seq, record }).map_err(io::Error::other)?;
        let digest = chain_digest(&body, &self.head);
        let prev_sha256_hex = mem::replace(&mut self.head, digest.clone());

        let line = FileRecord { seq, record: record.clone(), prev_sha256_hex, sha256_hex: digest };
        serde_json::to_writer(&mut self.writer, &line).map_err(io::Error::other)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.next_seq += 1;
        Ok(())
    }

    pub fn records_written(&self) -> u64 {
        self.next_seq
    }
}

/// Writes a whole in-memory trace to `path`.
pub fn save_trace_to_file(path: &Path, trace: &DecisionTrace) -> io::Result<()> {
    let mut writer = TraceWriter::create(path, &trace.config)?;
    for record in &trace.records {
        writer.append(record)?;
    }
    Ok(())
}

#[derive(Debug)]
pub struct LoadedTrace {
    pub trace: DecisionTrace,
    /// Digest of the last record, or all zeros for a trace with no records.
    pub last_sha256_hex: String,
}

#[derive(Debug, Error)]
pub enum TraceLoadError {
    #[error("trace I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("trace file is empty")]
    EmptyFile,

    #[error("invalid trace header at line {line}: {message}")]
    InvalidHeader { line: usize, message: String },

    #[error("invalid trace record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    #[error("incomplete trace line at line {line}")]
    IncompleteLine { line: usize },

    #[error("SHA-256 hash chain broken at line {line}")]
    HashChainBroken { line: usize },
}

/// Reads `path` back into a [`DecisionTrace`], checking every digest.
pub fn load_trace_from_file(path: &Path) -> Result<LoadedTrace, TraceLoadError> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines().enumerate().map(|(index, text)| (index + 1, text));
    let Some((_, header_line)) = lines.next() else {
        return Err(TraceLoadError::EmptyFile);
    };
    if !content.ends_with('\n') {
        return Err(TraceLoadError::IncompleteLine { line: content.lines().count() });
    }

    let header: FileHeader = serde_json::from_str(header_line)
        .map_err(|e| TraceLoadError::InvalidHeader { line: 1, message: e.to_string() })?;
    if header.format_version != TRACE_FORMAT_VERSION {
        return Err(TraceLoadError::InvalidHeader {
            line: 1,
            message: format!("unsupported format version {}", header.format_version),
        });
    }

    let mut trace = DecisionTrace::new(header.config);
    let mut head = GENESIS_DIGEST.to_owned();

    for (line, text) in lines {
        let invalid = |message: String| TraceLoadError::InvalidRecord { line, message };
        let entry: FileRecord = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;

        let expected = trace.records.len() as u64;
        if entry.seq != expected {
            return Err(invalid(format!("expected seq {expected}, found {}", entry.seq)));
        }
        if entry.prev_sha256_hex != head {
            return Err(TraceLoadError::HashChainBroken { line });
        }
        let body = serde_json::to_string(&RecordBody { seq: entry.seq, record: &entry.record })
            .map_err(|e| invalid(e.to_string()))?;
        if entry.sha256_hex != chain_digest(&body, &head) {
            return Err(TraceLoadError::HashChainBroken { line });
        }

        head = entry.sha256_hex;
        trace.records.push(entry.record);
    }

    Ok(LoadedTrace { trace, last_sha256_hex: head })
}
