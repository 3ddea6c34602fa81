use super::*;
use crate::error::ErrorKind;
use crate::units::Units;

fn no_flags() -> ConvertFlags {
    ConvertFlags::empty()
}

fn strict() -> ConvertFlags {
    ConvertFlags::STRICT_CODE_POINTS
}

#[test]
fn ascii_to_utf16_native() {
    let mut out = [0u16; 8];
    let done = utf8_to_utf16(Some(&mut out), Units::of(b"ABC"), no_flags()).unwrap();
    assert_eq!(done.written, 3);
    assert_eq!(done.processed, 3);
    assert_eq!(&out[..4], &[0x0041, 0x0042, 0x0043, 0]);
}

#[test]
fn supplementary_plane_to_utf32() {
    // U+1F600 as four UTF-8 bytes.
    let mut out = [0u32; 2];
    let done = utf8_to_utf32(Some(&mut out), Units::of(&[0xF0, 0x9F, 0x98, 0x80]), no_flags())
        .unwrap();
    assert_eq!(done.written, 1);
    assert_eq!(out, [0x0001_F600, 0]);
}

#[test]
fn utf16le_surrogate_pair_to_utf8() {
    let src = [0xD83Du16.to_le(), 0xDE00u16.to_le()];
    let mut out = [0u8; 8];
    let done = utf16le_to_utf8(Some(&mut out), Units::of(&src), no_flags()).unwrap();
    assert_eq!(done.written, 4);
    assert_eq!(done.processed, 2);
    assert_eq!(&out[..5], &[0xF0, 0x9F, 0x98, 0x80, 0]);
}

#[test]
fn bom_selects_big_endian() {
    // FE FF 00 41 00 42 as raw bytes: one BOM unit plus "AB".
    let src = [0xFEFFu16.to_be(), 0x0041u16.to_be(), 0x0042u16.to_be()];
    let mut out = [0u8; 8];
    let done = utf16_to_utf8(Some(&mut out), Units::of(&src), no_flags()).unwrap();
    assert_eq!(done.written, 2);
    assert_eq!(done.processed, 3); // BOM unit + two content units
    assert_eq!(&out[..3], b"AB\0");
}

#[test]
fn bom_selects_little_endian() {
    let src = [0xFEFFu16.to_le(), 0x0041u16.to_le()];
    let mut out = [0u8; 4];
    let done = utf16_to_utf8(Some(&mut out), Units::of(&src), no_flags()).unwrap();
    assert_eq!(done.written, 1);
    assert_eq!(done.processed, 2);
    assert_eq!(out[0], b'A');
}

#[test]
fn second_bom_after_adoption_is_an_error() {
    let src = [0xFEFFu16.to_be(), 0xFEFFu16.to_be(), 0x0041u16.to_be()];
    let err = utf16_to_utf8(None, Units::of(&src), no_flags()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::BomForbidden);
    assert_eq!(err.processed, 1); // the adopted mark was consumed
}

#[test]
fn utf8_bom_is_consumed_and_counted() {
    let src = [0xEF, 0xBB, 0xBF, 0x41];
    let mut out = [0u16; 4];
    let done = utf8_to_utf16(Some(&mut out), Units::of(&src), no_flags()).unwrap();
    assert_eq!(done.written, 1);
    assert_eq!(done.processed, 4);
    assert_eq!(&out[..2], &[0x0041, 0]);
}

#[test]
fn forbid_bom() {
    let src = [0xEF, 0xBB, 0xBF, 0x41];
    let err = utf8_to_utf16(None, Units::of(&src), ConvertFlags::FORBID_BOM).unwrap_err();
    assert_eq!(err.kind, ErrorKind::BomForbidden);
    assert_eq!(err.written, 0);
    assert_eq!(err.processed, 0);
}

#[test]
fn encoded_surrogate_strict_vs_replacement() {
    // ED A0 80 encodes U+D800, which is not a scalar.
    let src = [0xED, 0xA0, 0x80];

    let err = utf8_to_utf16(None, Units::of(&src), strict()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCodePoint);
    assert_eq!(err.processed, 0);

    let mut out = [0u16; 4];
    let done = utf8_to_utf16(Some(&mut out), Units::of(&src), no_flags()).unwrap();
    assert_eq!(done.written, 1);
    assert_eq!(out[0], 0xFFFD);
}

#[test]
fn replacement_never_reports_invalid_codepoint() {
    // A grab bag of invalid leads, stray continuations and an overlong lead.
    let src = [0xC0, 0x80, 0xF5, 0x41, 0xBF];
    let done = utf8_to_utf32_len(Units::of(&src), no_flags()).unwrap();
    assert_eq!(done.processed, 5);
    assert_eq!(done.written, 5); // four replacements and one 'A'
}

#[test]
fn truncated_counted_sequence_halts_at_leader() {
    let src = [0x41, 0xC3];
    let mut out = [0u16; 4];
    let err = utf8_to_utf16(Some(&mut out), Units::of(&src), no_flags()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);
    assert_eq!(err.written, 1);
    assert_eq!(err.processed, 1); // the C3 leader, not the missing byte
    assert_eq!(out[0], 0x0041);
}

#[test]
fn truncated_nul_terminated_sequence() {
    // NUL arrives where a continuation byte is required.
    let src = [0xE2, 0x82, 0x00, 0xFF];
    let err = utf8_to_utf16(None, Units::until_nul(&src), no_flags()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);
    assert_eq!(err.processed, 0);
}

#[test]
fn lone_high_surrogate_at_end_of_input() {
    let err = utf16ne_to_utf8(None, Units::of(&[0xD800u16]), no_flags()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);
    assert_eq!(err.processed, 0);

    let err = utf16ne_to_utf8(None, Units::until_nul(&[0xD800u16, 0]), no_flags()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);
    assert_eq!(err.processed, 0);
}

#[test]
fn lone_low_surrogate() {
    let src = [0xDC00u16, 0x0041];

    let err = utf16ne_to_utf8(None, Units::of(&src), strict()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCodePoint);
    assert_eq!(err.processed, 0);

    let mut out = [0u8; 8];
    let done = utf16ne_to_utf8(Some(&mut out), Units::of(&src), no_flags()).unwrap();
    assert_eq!(&out[..done.written], &[0xEF, 0xBF, 0xBD, 0x41]);
}

#[test]
fn high_surrogate_with_bad_follower_advances_one_unit() {
    // The follower is decoded on its own after the replacement.
    let src = [0xD800u16, 0x0041];
    let mut out = [0u32; 4];
    let done = utf16ne_to_utf32ne(Some(&mut out), Units::of(&src), no_flags()).unwrap();
    assert_eq!(done.written, 2);
    assert_eq!(&out[..2], &[0xFFFD, 0x0041]);
}

#[test]
fn exact_capacity_boundary() {
    // Capacity written + 1 succeeds, capacity written fails.
    let src = b"hey";
    let mut out = [0u16; 4];
    let done = utf8_to_utf16(Some(&mut out[..4]), Units::of(src), no_flags()).unwrap();
    assert_eq!(done.written, 3);
    assert_eq!(out[3], 0);

    let mut out = [0xFFFFu16; 3];
    let err = utf8_to_utf16(Some(&mut out), Units::of(src), no_flags()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NoSpace);
    assert_eq!(err.written, 2);
    assert_eq!(err.processed, 2);
}

#[test]
fn no_space_never_splits_a_code_point() {
    // Three slots: 'A' fits, the pair plus terminator does not.
    let src = [0x0041u32, 0x0001_F600];
    let mut out = [0u16; 3];
    let err = utf32ne_to_utf16ne(Some(&mut out), Units::of(&src), no_flags()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NoSpace);
    assert_eq!(err.written, 1);
    assert_eq!(err.processed, 1);
    assert_eq!(out[1], 0); // nothing of the pair was written
}

#[test]
fn empty_inputs() {
    let done = utf8_to_utf16_len(Units::of(b""), no_flags()).unwrap();
    assert_eq!((done.written, done.processed), (0, 0));

    let mut out = [0xFFFFu16; 1];
    let done = utf8_to_utf16(Some(&mut out), Units::until_nul(b"\0abc"), no_flags()).unwrap();
    assert_eq!(done.written, 0);
    assert_eq!(out[0], 0); // terminator written with capacity 1

    let mut out: [u16; 0] = [];
    let err = utf8_to_utf16(Some(&mut out), Units::of(b""), no_flags()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NoSpace);
}

#[test]
fn counted_spans_convert_interior_nuls() {
    let mut out = [0u16; 4];
    let done = utf8_to_utf16(Some(&mut out), Units::of(b"A\0B"), no_flags()).unwrap();
    assert_eq!(done.written, 3);
    assert_eq!(&out[..3], &[0x0041, 0x0000, 0x0042]);
}

#[test]
fn utf32_without_bom_keeps_first_scalar() {
    // Single-scalar input, no BOM: nothing may be skipped.
    let mut out = [0u8; 8];
    let done = utf32_to_utf8(Some(&mut out), Units::of(&[0x0001_F600u32]), no_flags()).unwrap();
    assert_eq!(done.written, 4);
    assert_eq!(done.processed, 1);
    assert_eq!(&out[..4], &[0xF0, 0x9F, 0x98, 0x80]);
}

#[test]
fn utf32_bom_driven() {
    let src = [0xFEFFu32.to_be(), 0x0041u32.to_be()];
    let mut out = [0u8; 4];
    let done = utf32_to_utf8(Some(&mut out), Units::of(&src), no_flags()).unwrap();
    assert_eq!(done.written, 1);
    assert_eq!(done.processed, 2);
    assert_eq!(out[0], b'A');
}

#[test]
fn le_and_be_destinations_write_requested_order() {
    let mut out = [0u16; 2];
    utf8_to_utf16le(Some(&mut out), Units::of(b"A"), no_flags()).unwrap();
    assert_eq!(out[0].to_ne_bytes(), [0x41, 0x00]);

    let mut out = [0u16; 2];
    utf8_to_utf16be(Some(&mut out), Units::of(b"A"), no_flags()).unwrap();
    assert_eq!(out[0].to_ne_bytes(), [0x00, 0x41]);
}

#[test]
fn matched_endian_utf16_utf32_round_trip() {
    let src = [0xD83Du16.to_be(), 0xDE00u16.to_be(), 0x0041u16.to_be()];
    let mut mid = [0u32; 4];
    let done = utf16be_to_utf32be(Some(&mut mid), Units::of(&src), no_flags()).unwrap();
    assert_eq!(done.written, 2);
    assert_eq!(mid[0], 0x0001_F600u32.to_be());

    let mut back = [0u16; 4];
    let done = utf32be_to_utf16be(Some(&mut back), Units::of(&mid[..2]), no_flags()).unwrap();
    assert_eq!(done.written, 3);
    assert_eq!(&back[..3], &src);
}

#[test]
fn measure_matches_convert() {
    let src = "naïve 😀 text".as_bytes();
    let measured = utf8_to_utf16_len(Units::of(src), no_flags()).unwrap();
    let mut out = [0u16; 32];
    let done = utf8_to_utf16(Some(&mut out), Units::of(src), no_flags()).unwrap();
    assert_eq!(measured.written, done.written);
    assert_eq!(measured.processed, done.processed);
}

#[test]
fn invalid_utf32_scalar_policy() {
    let src = [0xD800u32, 0x0041];

    let err = utf32ne_to_utf8(None, Units::of(&src), strict()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCodePoint);
    assert_eq!(err.processed, 0);

    let mut out = [0u8; 8];
    let done = utf32ne_to_utf8(Some(&mut out), Units::of(&src), no_flags()).unwrap();
    assert_eq!(&out[..done.written], &[0xEF, 0xBF, 0xBD, 0x41]);
}
