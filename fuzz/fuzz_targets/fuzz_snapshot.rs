#![no_main]

use libfuzzer_sys::fuzz_target;
use wordtrack::record::WordRecord;
use wordtrack::repository::{decode_snapshot, encode_snapshot};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must be rejected cleanly, never panic
    if let Ok(index) = decode_snapshot::<WordRecord>(data) {
        // Anything accepted re-encodes to an equivalent index
        let bytes = encode_snapshot(&index).expect("re-encode failed");
        let again = decode_snapshot::<WordRecord>(&bytes).expect("re-decode failed");
        assert_eq!(index.len(), again.len());
    }
});
