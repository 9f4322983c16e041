#![no_main]

use std::io::{Cursor, Read};

use libfuzzer_sys::fuzz_target;
use partrs::{Multipart, MultipartError, ParseConfig};

/// Reader that yields at most `chunk` bytes per call.
struct ChunkedReader {
    inner: Cursor<Vec<u8>>,
    chunk: usize,
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.chunk.min(buf.len());
        self.inner.read(&mut buf[..n])
    }
}

fn run(data: &[u8], chunk: usize) -> Result<Vec<(Option<String>, Vec<u8>)>, MultipartError> {
    let reader = ChunkedReader {
        inner: Cursor::new(data.to_vec()),
        chunk,
    };
    let mut multipart = Multipart::with_config(reader, "fuzz", ParseConfig::default());

    let mut parts = Vec::new();
    while let Some(mut part) = multipart.next_part()? {
        let name = part.name();
        let data = part.bytes()?.to_vec();
        parts.push((name, data));
    }
    Ok(parts)
}

// Chunk-invariance: the parse result must not depend on how the input is
// sliced into reads, for any input whatsoever.
fuzz_target!(|input: (Vec<u8>, u8)| {
    let (data, chunk_seed) = input;
    let chunk = 1 + (chunk_seed as usize % 64);

    let reference = run(&data, data.len().max(1));
    let chunked = run(&data, chunk);

    match (reference, chunked) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(_), Err(_)) => {}
        (a, b) => panic!("divergent outcomes: {:?} vs {:?}", a.is_ok(), b.is_ok()),
    }
});
