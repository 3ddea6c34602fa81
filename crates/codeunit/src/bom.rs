//! Byte-order-mark constants and predicates.
//!
//! A BOM is U+FEFF expressed in the encoding under inspection. The `is_*`
//! predicates take exactly the bytes a BOM occupies; the `has_*` probes
//! take an arbitrary prefix and answer `false` when it is too short.

/// UTF-8 byte order mark.
pub const BOM_UTF8: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian byte order mark (RFC 2781 §3.2).
pub const BOM_UTF16_LE: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian byte order mark.
pub const BOM_UTF16_BE: [u8; 2] = [0xFE, 0xFF];
/// UTF-32 little-endian byte order mark.
pub const BOM_UTF32_LE: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
/// UTF-32 big-endian byte order mark.
pub const BOM_UTF32_BE: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

pub fn utf16_is_bom_le(bom: [u8; 2]) -> bool {
    bom == BOM_UTF16_LE
}

pub fn utf16_is_bom_be(bom: [u8; 2]) -> bool {
    bom == BOM_UTF16_BE
}

pub fn utf32_is_bom_le(bom: [u8; 4]) -> bool {
    bom == BOM_UTF32_LE
}

pub fn utf32_is_bom_be(bom: [u8; 4]) -> bool {
    bom == BOM_UTF32_BE
}

/// Whether `bytes` starts with a UTF-8 BOM. `false` when shorter than one.
pub fn utf8_has_bom(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[..3] == BOM_UTF8
}

/// Whether `bytes` starts with a UTF-16 BOM of either byte order.
pub fn utf16_has_bom(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && (utf16_is_bom_le([bytes[0], bytes[1]]) || utf16_is_bom_be([bytes[0], bytes[1]]))
}

/// Whether `bytes` starts with a UTF-32 BOM of either byte order.
pub fn utf32_has_bom(bytes: &[u8]) -> bool {
    if bytes.len() < 4 {
        return false;
    }
    let bom = [bytes[0], bytes[1], bytes[2], bytes[3]];
    utf32_is_bom_le(bom) || utf32_is_bom_be(bom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_prefixes_have_no_bom() {
        assert!(!utf8_has_bom(&[0xEF, 0xBB]));
        assert!(!utf16_has_bom(&[0xFF]));
        assert!(!utf32_has_bom(&[0xFF, 0xFE, 0x00]));
    }

    #[test]
    fn utf16_bom_orders_are_disjoint() {
        assert!(utf16_is_bom_le([0xFF, 0xFE]));
        assert!(utf16_is_bom_be([0xFE, 0xFF]));
        assert!(!utf16_is_bom_le([0xFE, 0xFF]));
    }

    #[test]
    fn utf32_le_bom_is_not_a_utf16_le_bom_plus_padding() {
        // FF FE 00 00 is a valid UTF-32 LE BOM and also starts with the
        // UTF-16 LE BOM; the width under inspection decides.
        assert!(utf32_has_bom(&BOM_UTF32_LE));
        assert!(utf16_has_bom(&BOM_UTF32_LE));
    }
}
