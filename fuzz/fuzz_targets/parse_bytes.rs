#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use partrs::{Multipart, MultipartError, ParseConfig};

// Arbitrary input must never panic, loop, or emit payload past the limits;
// well-formed slices must satisfy the parser laws checked below.
fuzz_target!(|data: Vec<u8>| {
    let configs = [
        ParseConfig::default(),
        ParseConfig::default().with_max_header_size(64),
        ParseConfig::default().with_max_file_size(128),
    ];

    for config in configs {
        let mut multipart = Multipart::with_config(Cursor::new(data.clone()), "fuzz", config);

        let mut payload_total = 0u64;
        let outcome: Result<(), MultipartError> = (|| {
            while let Some(mut part) = multipart.next_part()? {
                while let Some(chunk) = part.chunk()? {
                    payload_total += chunk.len() as u64;
                    // The size counter restarts per part, so a single
                    // chunk can never exceed the configured cap.
                    assert!(chunk.len() as u64 <= config.max_file_size());
                }
            }
            Ok(())
        })();

        match outcome {
            Ok(()) => {
                // A successful parse implies a parse with looser limits
                // yields the identical byte count.
                let loose = ParseConfig::default();
                let mut multipart =
                    Multipart::with_config(Cursor::new(data.clone()), "fuzz", loose);
                let mut loose_total = 0u64;
                while let Some(mut part) = multipart.next_part().expect("loose parse") {
                    loose_total += part.bytes().expect("loose bytes").len() as u64;
                }
                assert_eq!(payload_total, loose_total);
            }
            Err(MultipartError::StreamAlreadyConsumed) => {
                unreachable!("single-consumption loop cannot double-read")
            }
            Err(_) => {}
        }
    }
});
