#![no_main]

use codeunit::DynStr;
use libfuzzer_sys::fuzz_target;

// Drive the string through a chunk-derived edit script and check the
// header invariant (length <= capacity, terminator in place) after every
// operation.
fuzz_target!(|data: &[u8]| {
    let mut chunks = data.split(|&b| b == b'|');
    let Some(mut s) = DynStr::new(chunks.next().unwrap_or(b"")) else {
        return;
    };

    for (i, chunk) in chunks.take(16).enumerate() {
        s = match i % 5 {
            0 => match s.cat(chunk) {
                Some(s) => s,
                None => return,
            },
            1 => match s.replace_range(i, chunk.len(), chunk) {
                Some(s) => s,
                None => return,
            },
            2 => match s.replace_all(b"ab", chunk) {
                Some(s) => s,
                None => return,
            },
            3 => {
                s.trim();
                s
            }
            _ => {
                s.remove_at(i);
                s
            }
        };

        assert!(s.len() <= s.capacity());
        assert_eq!(s.as_bytes_with_nul()[s.len()], 0);
    }
});
