#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let line = String::from_utf8_lossy(data);
    for word in wordtrack::utils::extract_words(&line) {
        assert!(!word.is_empty());
        assert!(word.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }
});
