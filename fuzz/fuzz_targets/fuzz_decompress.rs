#![no_main]

use libfuzzer_sys::fuzz_target;
use rawinflate::{decompress_bytes, decompress_to_writer, BitReader};
use std::io::Read;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes: errors are expected, panics are not
    let buffered = decompress_bytes(data);

    // Streaming must agree with buffered output on every input
    let mut streamed = Vec::new();
    let streamed_result = decompress_to_writer(BitReader::new(data), &mut streamed);
    assert_eq!(buffered.is_ok(), streamed_result.is_ok());

    if let Ok(output) = buffered {
        assert_eq!(output, streamed);

        // The reference decoder rejects some headers accepted here (HLIT > 286,
        // HDIST > 30), but when both accept the output must match
        let mut reference = Vec::new();
        let mut decoder = flate2::read::DeflateDecoder::new(data);
        if decoder.read_to_end(&mut reference).is_ok() {
            assert_eq!(output, reference, "output differs from reference decoder");
        }
    }
});
