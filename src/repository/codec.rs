use crate::record::{FileOccurrences, WordRecord};
use crate::repository::SnapshotError;
use crate::utils::{decode_varint, decode_varint_u64, encode_str, encode_varint, encode_varint_u64};

/// Binary encoding for a value stored in a snapshot
pub trait SnapshotEntry: Sized {
    fn encode(&self, buf: &mut Vec<u8>);
    fn decode(input: &mut ByteReader<'_>) -> Result<Self, SnapshotError>;
}

/// Forward-only reader over a snapshot payload
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8, SnapshotError> {
        let byte = *self.buf.get(self.pos).ok_or(SnapshotError::Truncated)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SnapshotError> {
        let bytes = self
            .buf
            .get(self.pos..self.pos + N)
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or(SnapshotError::Truncated)?;
        self.pos += N;
        Ok(bytes)
    }

    pub fn read_u16_le(&mut self) -> Result<u16, SnapshotError> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub fn read_u32_le(&mut self) -> Result<u32, SnapshotError> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_u64_le(&mut self) -> Result<u64, SnapshotError> {
        self.read_array().map(u64::from_le_bytes)
    }

    pub fn read_varint(&mut self) -> Result<u32, SnapshotError> {
        let (value, consumed) =
            decode_varint(&self.buf[self.pos..]).ok_or(SnapshotError::Truncated)?;
        self.pos += consumed;
        Ok(value)
    }

    pub fn read_varint_u64(&mut self) -> Result<u64, SnapshotError> {
        let (value, consumed) =
            decode_varint_u64(&self.buf[self.pos..]).ok_or(SnapshotError::Truncated)?;
        self.pos += consumed;
        Ok(value)
    }

    /// Read a length prefix that must fit in what is left of the buffer
    pub fn read_len(&mut self) -> Result<usize, SnapshotError> {
        let len = self.read_varint_u64()?;
        let remaining = (self.buf.len() - self.pos) as u64;
        if len > remaining {
            return Err(SnapshotError::Truncated);
        }
        Ok(len as usize)
    }

    pub fn read_str(&mut self) -> Result<String, SnapshotError> {
        let len = self.read_len()?;
        let bytes = &self.buf[self.pos..self.pos + len];
        let value = std::str::from_utf8(bytes)
            .map_err(|_| SnapshotError::Malformed("string is not valid UTF-8".into()))?;
        self.pos += len;
        Ok(value.to_string())
    }
}

impl SnapshotEntry for WordRecord {
    fn encode(&self, buf: &mut Vec<u8>) {
        encode_str(self.word(), buf);
        encode_varint_u64(self.total_frequency(), buf);
        encode_varint_u64(self.occurrences().len() as u64, buf);

        for entry in self.occurrences() {
            encode_str(&entry.filename, buf);
            encode_varint_u64(entry.lines.len() as u64, buf);
            for &line in &entry.lines {
                encode_varint(line, buf);
            }
        }
    }

    fn decode(input: &mut ByteReader<'_>) -> Result<Self, SnapshotError> {
        let word = input.read_str()?;
        if word.is_empty() {
            return Err(SnapshotError::Malformed("empty word".into()));
        }

        let total_frequency = input.read_varint_u64()?;

        // Every entry takes at least one byte, so lengths are capped by
        // what is left to read before anything is allocated
        let file_count = input.read_len()?;
        let mut occurrences: Vec<FileOccurrences> = Vec::with_capacity(file_count);
        let mut distinct_lines = 0u64;

        for _ in 0..file_count {
            let filename = input.read_str()?;
            if occurrences.iter().any(|entry| entry.filename == filename) {
                return Err(SnapshotError::Malformed(format!(
                    "file {filename} listed twice for '{word}'"
                )));
            }

            let line_count = input.read_len()?;
            let mut lines = Vec::with_capacity(line_count);
            for _ in 0..line_count {
                let line = input.read_varint()?;
                if lines.contains(&line) {
                    return Err(SnapshotError::Malformed(format!(
                        "line {line} repeated for '{word}' in {filename}"
                    )));
                }
                lines.push(line);
            }

            distinct_lines += lines.len() as u64;
            occurrences.push(FileOccurrences { filename, lines });
        }

        if total_frequency < distinct_lines {
            return Err(SnapshotError::Malformed(format!(
                "'{word}' has fewer occurrences than recorded lines"
            )));
        }

        Ok(WordRecord::from_parts(word, occurrences, total_frequency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WordRecord {
        let mut record = WordRecord::new("banana").unwrap();
        record.add_occurrence("test2.txt", 2);
        record.add_occurrence("test2.txt", 5);
        record.add_occurrence("test2.txt", 5);
        record.add_occurrence("test1.txt", 300);
        record
    }

    #[test]
    fn test_record_roundtrip() {
        let record = sample();
        let mut buf = Vec::new();
        record.encode(&mut buf);

        let mut input = ByteReader::new(&buf);
        let decoded = WordRecord::decode(&mut input).unwrap();
        assert!(input.is_empty());
        assert_eq!(decoded.word(), "banana");
        assert_eq!(decoded.total_frequency(), 4);
        assert_eq!(decoded.occurrences(), record.occurrences());
    }

    #[test]
    fn test_truncated_record() {
        let mut buf = Vec::new();
        sample().encode(&mut buf);

        for cut in 0..buf.len() {
            let mut input = ByteReader::new(&buf[..cut]);
            assert!(WordRecord::decode(&mut input).is_err(), "cut at {cut}");
        }
    }

    #[test]
    fn test_rejects_repeated_line() {
        let mut buf = Vec::new();
        encode_str("dup", &mut buf);
        encode_varint_u64(2, &mut buf);
        encode_varint_u64(1, &mut buf);
        encode_str("a.txt", &mut buf);
        encode_varint_u64(2, &mut buf);
        encode_varint(7, &mut buf);
        encode_varint(7, &mut buf);

        let err = WordRecord::decode(&mut ByteReader::new(&buf)).unwrap_err();
        assert!(matches!(err, SnapshotError::Malformed(_)));
    }

    #[test]
    fn test_rejects_frequency_below_line_count() {
        let mut buf = Vec::new();
        encode_str("low", &mut buf);
        encode_varint_u64(0, &mut buf);
        encode_varint_u64(1, &mut buf);
        encode_str("a.txt", &mut buf);
        encode_varint_u64(1, &mut buf);
        encode_varint(1, &mut buf);

        let err = WordRecord::decode(&mut ByteReader::new(&buf)).unwrap_err();
        assert!(matches!(err, SnapshotError::Malformed(_)));
    }

    #[test]
    fn test_rejects_huge_length_prefix() {
        let mut buf = Vec::new();
        encode_varint_u64(u64::MAX, &mut buf);
        let err = WordRecord::decode(&mut ByteReader::new(&buf)).unwrap_err();
        assert_eq!(err.to_string(), SnapshotError::Truncated.to_string());
    }

    #[test]
    fn test_fixed_width_reads() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0xBEEFu16.to_le_bytes());
        buf.extend_from_slice(&7u32.to_le_bytes());
        buf.extend_from_slice(&u64::MAX.to_le_bytes());

        let mut input = ByteReader::new(&buf);
        assert_eq!(input.read_u16_le().unwrap(), 0xBEEF);
        assert_eq!(input.read_u32_le().unwrap(), 7);
        assert_eq!(input.read_u64_le().unwrap(), u64::MAX);
        assert!(input.is_empty());
        assert!(matches!(input.read_u16_le(), Err(SnapshotError::Truncated)));

        let mut short = ByteReader::new(&buf[..3]);
        assert!(matches!(short.read_u32_le(), Err(SnapshotError::Truncated)));
        assert_eq!(short.position(), 0);
    }
}
