#![no_main]

use flate2::write::DeflateEncoder;
use flate2::Compression;
use libfuzzer_sys::fuzz_target;
use rawinflate::decompress_bytes;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    // First byte picks the compression level, the rest is the payload
    let Some((&level, payload)) = data.split_first() else {
        return;
    };

    // Limit data size to avoid slowdowns
    let payload = if payload.len() > 64 * 1024 { &payload[..64 * 1024] } else { payload };

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(u32::from(level % 10)));
    if encoder.write_all(payload).is_err() {
        return;
    }
    let compressed = match encoder.finish() {
        Ok(d) => d,
        Err(_) => return,
    };

    let output = decompress_bytes(&compressed).expect("valid DEFLATE stream rejected");
    assert_eq!(output, payload, "Round-trip mismatch");
});
