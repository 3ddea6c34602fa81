#![no_main]

use codeunit::{
    utf16ne_to_utf8, utf32ne_to_utf8, utf8_to_utf16, utf8_to_utf16_len, utf8_to_utf32,
    ConvertFlags, Units,
};
use libfuzzer_sys::fuzz_target;

// Arbitrary byte soup through the matrix in replacement mode: the engine
// must never panic, measure must agree with convert, and decoded output
// must contain only scalar values.
fuzz_target!(|data: &[u8]| {
    let flags = ConvertFlags::empty();

    let measured = utf8_to_utf16_len(Units::of(data), flags);
    let mut utf16 = vec![0u16; data.len() + 1];
    let converted = utf8_to_utf16(Some(&mut utf16), Units::of(data), flags);
    match (measured, converted) {
        (Ok(m), Ok(c)) => assert_eq!((m.written, m.processed), (c.written, c.processed)),
        (Err(m), Err(c)) => assert_eq!(m, c),
        (m, c) => panic!("measure {m:?} disagrees with convert {c:?}"),
    }

    let mut utf32 = vec![0u32; data.len() + 1];
    if let Ok(done) = utf8_to_utf32(Some(&mut utf32), Units::of(data), flags) {
        assert!(done.processed <= data.len());
        for &scalar in &utf32[..done.written] {
            assert!(codeunit::is_valid_scalar(scalar));
        }

        // Decoded scalars re-encode cleanly in both directions.
        let mut bytes = vec![0u8; 4 * done.written + 1];
        utf32ne_to_utf8(Some(&mut bytes), Units::of(&utf32[..done.written]), flags)
            .expect("valid scalars must encode");
    }

    if let Ok(done) = converted {
        let mut bytes = vec![0u8; 3 * done.written + 1];
        utf16ne_to_utf8(Some(&mut bytes), Units::of(&utf16[..done.written]), flags)
            .expect("converted UTF-16 must be well formed");
    }

    // NUL-terminated reads never run past the terminator.
    let _ = utf8_to_utf16_len(Units::until_nul(data), flags);
});
