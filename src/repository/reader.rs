use crate::repository::{
    ByteReader, HEADER_LEN, SNAPSHOT_MAGIC, SNAPSHOT_VERSION, SnapshotEntry, SnapshotError,
};
use crate::tree::{NodeShape, OrderedIndex};
use std::fs;
use std::path::Path;

/// Read and decode the snapshot at `path`
pub fn read_snapshot<K: SnapshotEntry + Ord>(path: &Path) -> Result<OrderedIndex<K>, SnapshotError> {
    let bytes = fs::read(path)?;
    decode_snapshot(&bytes)
}

/// Rebuild an index from snapshot bytes, validating every layer
pub fn decode_snapshot<K: SnapshotEntry + Ord>(bytes: &[u8]) -> Result<OrderedIndex<K>, SnapshotError> {
    if bytes.len() < SNAPSHOT_MAGIC.len() || bytes[..SNAPSHOT_MAGIC.len()] != SNAPSHOT_MAGIC {
        return Err(SnapshotError::BadMagic);
    }
    if bytes.len() < HEADER_LEN {
        return Err(SnapshotError::Truncated);
    }

    let mut header = ByteReader::new(&bytes[SNAPSHOT_MAGIC.len()..HEADER_LEN]);
    let version = header.read_u16_le()?;
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: version,
            expected: SNAPSHOT_VERSION,
        });
    }
    let count = header.read_u32_le()? as usize;
    let payload_len = header.read_u64_le()?;

    let body = &bytes[HEADER_LEN..];
    let payload_len = usize::try_from(payload_len).map_err(|_| SnapshotError::Truncated)?;
    if body.len() < payload_len.saturating_add(4) {
        return Err(SnapshotError::Truncated);
    }
    if body.len() > payload_len + 4 {
        return Err(SnapshotError::Malformed("trailing bytes after checksum".into()));
    }

    let (payload, trailer) = body.split_at(payload_len);
    let stored = ByteReader::new(trailer).read_u32_le()?;
    let computed = crc32fast::hash(payload);
    if stored != computed {
        return Err(SnapshotError::ChecksumMismatch { stored, computed });
    }

    // Each entry takes at least two bytes, which bounds the allocation
    let mut entries: Vec<(K, NodeShape)> = Vec::with_capacity(count.min(payload.len() / 2));
    let mut input = ByteReader::new(payload);
    for _ in 0..count {
        let bits = input.read_u8()?;
        let shape = NodeShape::from_bits(bits)
            .ok_or_else(|| SnapshotError::Malformed(format!("invalid shape byte {bits:#04x}")))?;
        entries.push((K::decode(&mut input)?, shape));
    }

    if !input.is_empty() {
        return Err(SnapshotError::Malformed(format!(
            "unexpected data at payload offset {}",
            input.position()
        )));
    }

    Ok(OrderedIndex::from_shape(entries)?)
}
