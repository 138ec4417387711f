//! Binary save format.
//!
//! ```text
//! offset  size  field
//! 0       8     magic b"ADVSAVE\0"
//! 8       2     format version (u16 LE)
//! 10      4     payload length (u32 LE)
//! 14      32    SHA-256 of the payload
//! 46      n     bincode payload (SavedGameData)
//! ```
//!
//! Decimals travel as exact strings inside the payload and floats as their
//! IEEE bit patterns, so a decode always reproduces the encoded snapshot.

use std::io::{Read, Write};

use bincode::Options;
use game_core::SavedGameData;
use sha2::{Digest, Sha256};

use super::{RepositoryError, Result};

pub const MAGIC: [u8; 8] = *b"ADVSAVE\0";
pub const FORMAT_VERSION: u16 = 1;
pub const HEADER_LEN: usize = MAGIC.len() + 2 + 4 + CHECKSUM_LEN;
/// Upper bound on the payload size accepted by the decoder.
pub const MAX_PAYLOAD_LEN: u32 = 16 * 1024 * 1024;

const CHECKSUM_LEN: usize = 32;

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(u64::from(MAX_PAYLOAD_LEN))
}

/// Encodes a snapshot into the framed save format.
pub fn encode(snapshot: &SavedGameData) -> Result<Vec<u8>> {
    snapshot
        .validate()
        .map_err(RepositoryError::InvalidSnapshot)?;

    let payload = bincode_options()
        .serialize(snapshot)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    let length = u32::try_from(payload.len())
        .ok()
        .filter(|len| *len <= MAX_PAYLOAD_LEN)
        .ok_or_else(|| {
            RepositoryError::Serialization(format!("payload of {} bytes is too large", payload.len()))
        })?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&length.to_le_bytes());
    bytes.extend_from_slice(&Sha256::digest(&payload));
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decodes and validates a framed snapshot.
///
/// Never returns a partially decoded snapshot.
pub fn decode(bytes: &[u8]) -> Result<SavedGameData> {
    if bytes.len() < HEADER_LEN {
        return Err(corrupted(format!(
            "expected at least {HEADER_LEN} header bytes, found {}",
            bytes.len()
        )));
    }

    let (header, payload) = bytes.split_at(HEADER_LEN);
    let (magic, rest) = header.split_at(MAGIC.len());
    let (version, rest) = rest.split_at(2);
    let (length, checksum) = rest.split_at(4);

    if magic != MAGIC {
        return Err(corrupted("not an adventure save file (bad magic)"));
    }

    let version = u16::from_le_bytes([version[0], version[1]]);
    if version != FORMAT_VERSION {
        return Err(RepositoryError::UnsupportedVersion {
            found: version,
            supported: FORMAT_VERSION,
        });
    }

    let length = u32::from_le_bytes([length[0], length[1], length[2], length[3]]);
    if length > MAX_PAYLOAD_LEN {
        return Err(corrupted(format!("declared payload length {length} exceeds limit")));
    }
    if payload.len() != length as usize {
        return Err(corrupted(format!(
            "declared payload length {length}, found {} bytes",
            payload.len()
        )));
    }

    let actual = Sha256::digest(payload);
    if actual.as_slice() != checksum {
        return Err(corrupted(format!(
            "checksum mismatch: expected {}, found {}",
            hex::encode(checksum),
            hex::encode(actual)
        )));
    }

    let snapshot: SavedGameData = bincode_options()
        .deserialize(payload)
        .map_err(|e| corrupted(format!("undecodable payload: {e}")))?;

    snapshot
        .validate()
        .map_err(|e| corrupted(format!("invalid snapshot: {e}")))?;

    Ok(snapshot)
}

/// Writes a framed snapshot to any byte sink.
pub fn write_snapshot<W: Write>(mut writer: W, snapshot: &SavedGameData) -> Result<()> {
    let bytes = encode(snapshot)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Reads a framed snapshot from any byte source.
///
/// Reads at most one maximal frame plus a byte, so oversized input is
/// reported as corrupted instead of being buffered whole.
pub fn read_snapshot<R: Read>(reader: R) -> Result<SavedGameData> {
    let limit = (HEADER_LEN as u64) + u64::from(MAX_PAYLOAD_LEN) + 1;
    let mut bytes = Vec::new();
    reader.take(limit).read_to_end(&mut bytes)?;
    decode(&bytes)
}

fn corrupted(reason: impl Into<String>) -> RepositoryError {
    RepositoryError::CorruptedData(reason.into())
}
