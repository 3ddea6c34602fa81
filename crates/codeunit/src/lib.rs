//! Conversion between UTF-8, UTF-16 and UTF-32 in every direction, with
//! explicit little-/big-/native-endian handling, byte-order-mark policy and
//! precise error offsets, plus a length-prefixed mutable string buffer.
//!
//! The transcoder allocates nothing: callers provide the output buffer (or
//! pass `None` to measure), and every conversion reports how many
//! destination units were written and how many source units were consumed,
//! on success and on failure alike. [`DynStr`] is the allocating companion:
//! a contiguous, NUL-terminated byte buffer whose length and capacity live
//! in a header in front of the content.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod bom;
mod convert;
mod dynstr;
mod endian;
mod error;
mod flags;
mod scalar;
mod text;
mod units;

pub use bom::{
    utf16_has_bom, utf16_is_bom_be, utf16_is_bom_le, utf32_has_bom, utf32_is_bom_be,
    utf32_is_bom_le, utf8_has_bom, BOM_UTF16_BE, BOM_UTF16_LE, BOM_UTF32_BE, BOM_UTF32_LE,
    BOM_UTF8,
};
pub use convert::{
    utf16_to_utf32, utf16_to_utf32_len, utf16_to_utf8, utf16_to_utf8_len, utf16be_to_utf32be,
    utf16be_to_utf32be_len, utf16be_to_utf8, utf16be_to_utf8_len, utf16le_to_utf32le,
    utf16le_to_utf32le_len, utf16le_to_utf8, utf16le_to_utf8_len, utf16ne_to_utf32ne,
    utf16ne_to_utf32ne_len, utf16ne_to_utf8, utf16ne_to_utf8_len, utf32_to_utf16,
    utf32_to_utf16_len, utf32_to_utf8, utf32_to_utf8_len, utf32be_to_utf16be,
    utf32be_to_utf16be_len, utf32be_to_utf8, utf32be_to_utf8_len, utf32le_to_utf16le,
    utf32le_to_utf16le_len, utf32le_to_utf8, utf32le_to_utf8_len, utf32ne_to_utf16ne,
    utf32ne_to_utf16ne_len, utf32ne_to_utf8, utf32ne_to_utf8_len, utf8_to_utf16,
    utf8_to_utf16_len, utf8_to_utf16be, utf8_to_utf16be_len, utf8_to_utf16le,
    utf8_to_utf16le_len, utf8_to_utf32, utf8_to_utf32_len, utf8_to_utf32be, utf8_to_utf32be_len,
    utf8_to_utf32le, utf8_to_utf32le_len, Converted,
};
pub use dynstr::{find, find_last, substr_tagged, DynStr};
pub use endian::{
    swap_endian_16, swap_endian_16_until_nul, swap_endian_32, swap_endian_32_until_nul, ByteOrder,
};
pub use error::{ConvertError, ErrorKind};
pub use flags::ConvertFlags;
pub use scalar::{is_valid_scalar, REPLACEMENT_SCALAR};
pub use text::{
    cat_n_s, cat_s, copy_n_s, copy_s, is_newline_scalar, is_null_or_whitespace,
    is_whitespace_scalar, itoa, ltrim_offset, next_line, next_whitespace, rtrim_offset, TRUNCATE,
};
pub use units::{strlen, CodeUnit, Units};

#[cfg(test)]
mod tests;
