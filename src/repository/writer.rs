use crate::repository::{SNAPSHOT_MAGIC, SNAPSHOT_VERSION, SnapshotEntry, SnapshotError};
use crate::tree::OrderedIndex;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Serialize the whole index into snapshot bytes
pub fn encode_snapshot<K: SnapshotEntry>(index: &OrderedIndex<K>) -> Result<Vec<u8>, SnapshotError> {
    let count = u32::try_from(index.len())
        .map_err(|_| SnapshotError::Malformed(format!("{} entries exceed the format limit", index.len())))?;

    let mut payload = Vec::new();
    for (entry, shape) in index.shape() {
        payload.push(shape.to_bits());
        entry.encode(&mut payload);
    }

    let mut out = Vec::with_capacity(super::HEADER_LEN + payload.len() + 4);
    out.extend_from_slice(&SNAPSHOT_MAGIC);
    out.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());

    Ok(out)
}

/// Write the index to `path`.
///
/// The snapshot is written to a sibling temp file first and renamed into
/// place, so a failed write leaves the previous snapshot intact.
pub fn write_snapshot<K: SnapshotEntry>(path: &Path, index: &OrderedIndex<K>) -> Result<(), SnapshotError> {
    let bytes = encode_snapshot(index)?;
    let tmp_path = temp_path(path);

    let result = (|| -> Result<(), SnapshotError> {
        let mut file = BufWriter::new(File::create(&tmp_path)?);
        file.write_all(&bytes)?;
        file.flush()?;
        file.get_ref().sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
