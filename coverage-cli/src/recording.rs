//! The external pipeline boundary (spec §1, §6): the MP4-decode and
//! perceptual-hash stages are out of scope for the core, so this module
//! reads their already-computed output from a JSON sidecar instead.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use coverage_core::{FrameCoverage, Hash};

/// Failures from the external pipeline boundary (spec §7's closing
/// paragraph): producing a `Coverage` from a recording may fail; such
/// failures are surfaced to the caller and never enter the monitor.
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("failed to read recording sidecar {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse recording sidecar {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("hash {0:?} in recording sidecar is not valid hex")]
    InvalidHash(String),
}

#[derive(Deserialize)]
struct RecordingFile {
    hashes: Vec<String>,
}

/// Stand-in for the out-of-scope MP4-decode + perceptual-hash pipeline:
/// reads a JSON sidecar of pre-computed hex-encoded 64-bit hashes rather
/// than decoding frames, and builds a [`FrameCoverage`] from it.
///
/// Mirrors `original_source`'s `@safe`-wrapped `get_frame_cov`: failures are
/// returned to the caller and never reach the monitor.
pub fn load_recording_coverage(path: &Path) -> Result<FrameCoverage, RecordingError> {
    let display_path = path.display().to_string();

    let raw = fs::read_to_string(path).map_err(|source| RecordingError::Io {
        path: display_path.clone(),
        source,
    })?;

    let parsed: RecordingFile =
        serde_json::from_str(&raw).map_err(|source| RecordingError::Parse {
            path: display_path.clone(),
            source,
        })?;

    let hashes: HashSet<Hash> = parsed
        .hashes
        .iter()
        .map(|s| parse_hex_hash(s))
        .collect::<Result<_, _>>()?;

    Ok(FrameCoverage::new(hashes))
}

fn parse_hex_hash(s: &str) -> Result<Hash, RecordingError> {
    let trimmed = s.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(trimmed, 16).map_err(|_| RecordingError::InvalidHash(s.to_string()))
}
