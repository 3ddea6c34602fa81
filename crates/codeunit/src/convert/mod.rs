//! The conversion matrix: UTF-8 ↔ UTF-16 ↔ UTF-32, each direction in
//! native, little and big endian.
//!
//! Every entry point follows the same contract:
//!
//! - `dst` is the output buffer, or `None` to measure. A successful write
//!   appends a single zero unit after the content; the reported `written`
//!   count excludes it. The `*_len` functions are measuring shorthands.
//! - `src` is a [`Units`] span, counted or NUL-terminated.
//! - A leading BOM of the source encoding is consumed and never re-emitted.
//!   The unsuffixed UTF-16/UTF-32 source variants adopt the byte order the
//!   mark announces; the `ne`/`le`/`be` variants keep their declared order
//!   regardless. [`ConvertFlags::FORBID_BOM`] turns a mark into
//!   [`ErrorKind::BomForbidden`].
//! - Invalid scalars become U+FFFD, or halt the conversion when
//!   [`ConvertFlags::STRICT_CODE_POINTS`] is set. A multi-unit sequence cut
//!   short by the end of input always halts with
//!   [`ErrorKind::InvalidArgument`], reporting the sequence start as the
//!   halting offset.
//!
//! Cross-endian direct conversion (for example UTF-16 LE source straight to
//! UTF-32 BE output) is not offered; convert matched and swap with
//! [`swap_endian_32`](crate::swap_endian_32) afterwards.

mod engine;

use engine::{Decode, Utf16, Utf32, Utf8};

use crate::endian::ByteOrder;
use crate::error::{ConvertError, ErrorKind};
use crate::flags::ConvertFlags;
use crate::units::Units;

/// Accounting for a finished conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converted {
    /// Destination code units produced, excluding the terminator. For the
    /// measuring forms, the units a buffered call would produce.
    pub written: usize,
    /// Source code units consumed, including any skipped BOM. For
    /// NUL-terminated spans this excludes the terminator itself.
    pub processed: usize,
}

/// Folds a BOM the caller already consumed into the accounting.
fn after_bom(
    result: Result<Converted, ConvertError>,
    bom_len: usize,
) -> Result<Converted, ConvertError> {
    match result {
        Ok(done) => Ok(Converted {
            written: done.written,
            processed: done.processed + bom_len,
        }),
        Err(err) => Err(ConvertError {
            processed: err.processed + bom_len,
            ..err
        }),
    }
}

// --- UTF-8 -> UTF-16 ---------------------------------------------------

/// Converts UTF-8 to native-endian UTF-16.
///
/// A UTF-8 BOM announces no byte order, so this is the only endianness
/// question the direction has; `le`/`be` siblings differ purely in the
/// byte order of the units they emit.
pub fn utf8_to_utf16(
    dst: Option<&mut [u16]>,
    src: Units<'_, u8>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf8, Utf16>(dst, src, ByteOrder::native(), ByteOrder::native(), flags)
}

/// Converts UTF-8 to little-endian UTF-16.
pub fn utf8_to_utf16le(
    dst: Option<&mut [u16]>,
    src: Units<'_, u8>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf8, Utf16>(dst, src, ByteOrder::native(), ByteOrder::Little, flags)
}

/// Converts UTF-8 to big-endian UTF-16.
pub fn utf8_to_utf16be(
    dst: Option<&mut [u16]>,
    src: Units<'_, u8>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf8, Utf16>(dst, src, ByteOrder::native(), ByteOrder::Big, flags)
}

/// Measures [`utf8_to_utf16`] without writing.
pub fn utf8_to_utf16_len(
    src: Units<'_, u8>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf8_to_utf16(None, src, flags)
}

/// Measures [`utf8_to_utf16le`] without writing.
pub fn utf8_to_utf16le_len(
    src: Units<'_, u8>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf8_to_utf16le(None, src, flags)
}

/// Measures [`utf8_to_utf16be`] without writing.
pub fn utf8_to_utf16be_len(
    src: Units<'_, u8>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf8_to_utf16be(None, src, flags)
}

// --- UTF-8 -> UTF-32 ---------------------------------------------------

/// Converts UTF-8 to native-endian UTF-32.
pub fn utf8_to_utf32(
    dst: Option<&mut [u32]>,
    src: Units<'_, u8>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf8, Utf32>(dst, src, ByteOrder::native(), ByteOrder::native(), flags)
}

/// Converts UTF-8 to little-endian UTF-32.
pub fn utf8_to_utf32le(
    dst: Option<&mut [u32]>,
    src: Units<'_, u8>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf8, Utf32>(dst, src, ByteOrder::native(), ByteOrder::Little, flags)
}

/// Converts UTF-8 to big-endian UTF-32.
pub fn utf8_to_utf32be(
    dst: Option<&mut [u32]>,
    src: Units<'_, u8>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf8, Utf32>(dst, src, ByteOrder::native(), ByteOrder::Big, flags)
}

/// Measures [`utf8_to_utf32`] without writing.
pub fn utf8_to_utf32_len(
    src: Units<'_, u8>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf8_to_utf32(None, src, flags)
}

/// Measures [`utf8_to_utf32le`] without writing.
pub fn utf8_to_utf32le_len(
    src: Units<'_, u8>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf8_to_utf32le(None, src, flags)
}

/// Measures [`utf8_to_utf32be`] without writing.
pub fn utf8_to_utf32be_len(
    src: Units<'_, u8>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf8_to_utf32be(None, src, flags)
}

// --- UTF-16 -> UTF-8 ---------------------------------------------------

/// Converts UTF-16 to UTF-8, taking the byte order from a leading BOM.
///
/// With a BOM, the announced order governs the remainder of the input and
/// a second mark is reported as [`ErrorKind::BomForbidden`] rather than
/// re-adopted. Without one, the input is read in native order, exactly as
/// [`utf16ne_to_utf8`].
pub fn utf16_to_utf8(
    dst: Option<&mut [u8]>,
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    match Utf16::bom(&src) {
        Some((bom_len, Some(order))) => {
            if flags.contains(ConvertFlags::FORBID_BOM) {
                return Err(ConvertError::new(ErrorKind::BomForbidden, 0, 0));
            }
            let rest = src.skip(bom_len);
            after_bom(
                engine::run::<Utf16, Utf8>(
                    dst,
                    rest,
                    order,
                    ByteOrder::native(),
                    flags | ConvertFlags::FORBID_BOM,
                ),
                bom_len,
            )
        }
        _ => utf16ne_to_utf8(dst, src, flags),
    }
}

/// Converts native-endian UTF-16 to UTF-8.
pub fn utf16ne_to_utf8(
    dst: Option<&mut [u8]>,
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf16, Utf8>(dst, src, ByteOrder::native(), ByteOrder::native(), flags)
}

/// Converts little-endian UTF-16 to UTF-8.
pub fn utf16le_to_utf8(
    dst: Option<&mut [u8]>,
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf16, Utf8>(dst, src, ByteOrder::Little, ByteOrder::native(), flags)
}

/// Converts big-endian UTF-16 to UTF-8.
pub fn utf16be_to_utf8(
    dst: Option<&mut [u8]>,
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf16, Utf8>(dst, src, ByteOrder::Big, ByteOrder::native(), flags)
}

/// Measures [`utf16_to_utf8`] without writing.
pub fn utf16_to_utf8_len(
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf16_to_utf8(None, src, flags)
}

/// Measures [`utf16ne_to_utf8`] without writing.
pub fn utf16ne_to_utf8_len(
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf16ne_to_utf8(None, src, flags)
}

/// Measures [`utf16le_to_utf8`] without writing.
pub fn utf16le_to_utf8_len(
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf16le_to_utf8(None, src, flags)
}

/// Measures [`utf16be_to_utf8`] without writing.
pub fn utf16be_to_utf8_len(
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf16be_to_utf8(None, src, flags)
}

// --- UTF-16 <-> UTF-32 (matched endianness) ----------------------------

/// Converts UTF-16 to UTF-32, taking both sides' byte order from a leading
/// BOM; native order without one.
pub fn utf16_to_utf32(
    dst: Option<&mut [u32]>,
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    match Utf16::bom(&src) {
        Some((bom_len, Some(order))) => {
            if flags.contains(ConvertFlags::FORBID_BOM) {
                return Err(ConvertError::new(ErrorKind::BomForbidden, 0, 0));
            }
            let rest = src.skip(bom_len);
            after_bom(
                engine::run::<Utf16, Utf32>(dst, rest, order, order, flags | ConvertFlags::FORBID_BOM),
                bom_len,
            )
        }
        _ => utf16ne_to_utf32ne(dst, src, flags),
    }
}

/// Converts native-endian UTF-16 to native-endian UTF-32.
pub fn utf16ne_to_utf32ne(
    dst: Option<&mut [u32]>,
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf16, Utf32>(dst, src, ByteOrder::native(), ByteOrder::native(), flags)
}

/// Converts little-endian UTF-16 to little-endian UTF-32.
pub fn utf16le_to_utf32le(
    dst: Option<&mut [u32]>,
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf16, Utf32>(dst, src, ByteOrder::Little, ByteOrder::Little, flags)
}

/// Converts big-endian UTF-16 to big-endian UTF-32.
pub fn utf16be_to_utf32be(
    dst: Option<&mut [u32]>,
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf16, Utf32>(dst, src, ByteOrder::Big, ByteOrder::Big, flags)
}

/// Measures [`utf16_to_utf32`] without writing.
pub fn utf16_to_utf32_len(
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf16_to_utf32(None, src, flags)
}

/// Measures [`utf16ne_to_utf32ne`] without writing.
pub fn utf16ne_to_utf32ne_len(
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf16ne_to_utf32ne(None, src, flags)
}

/// Measures [`utf16le_to_utf32le`] without writing.
pub fn utf16le_to_utf32le_len(
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf16le_to_utf32le(None, src, flags)
}

/// Measures [`utf16be_to_utf32be`] without writing.
pub fn utf16be_to_utf32be_len(
    src: Units<'_, u16>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf16be_to_utf32be(None, src, flags)
}

// --- UTF-32 -> UTF-8 ---------------------------------------------------

/// Converts UTF-32 to UTF-8, taking the byte order from a leading BOM;
/// native order without one.
pub fn utf32_to_utf8(
    dst: Option<&mut [u8]>,
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    match Utf32::bom(&src) {
        Some((bom_len, Some(order))) => {
            if flags.contains(ConvertFlags::FORBID_BOM) {
                return Err(ConvertError::new(ErrorKind::BomForbidden, 0, 0));
            }
            let rest = src.skip(bom_len);
            after_bom(
                engine::run::<Utf32, Utf8>(
                    dst,
                    rest,
                    order,
                    ByteOrder::native(),
                    flags | ConvertFlags::FORBID_BOM,
                ),
                bom_len,
            )
        }
        _ => utf32ne_to_utf8(dst, src, flags),
    }
}

/// Converts native-endian UTF-32 to UTF-8.
pub fn utf32ne_to_utf8(
    dst: Option<&mut [u8]>,
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf32, Utf8>(dst, src, ByteOrder::native(), ByteOrder::native(), flags)
}

/// Converts little-endian UTF-32 to UTF-8.
pub fn utf32le_to_utf8(
    dst: Option<&mut [u8]>,
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf32, Utf8>(dst, src, ByteOrder::Little, ByteOrder::native(), flags)
}

/// Converts big-endian UTF-32 to UTF-8.
pub fn utf32be_to_utf8(
    dst: Option<&mut [u8]>,
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf32, Utf8>(dst, src, ByteOrder::Big, ByteOrder::native(), flags)
}

/// Measures [`utf32_to_utf8`] without writing.
pub fn utf32_to_utf8_len(
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf32_to_utf8(None, src, flags)
}

/// Measures [`utf32ne_to_utf8`] without writing.
pub fn utf32ne_to_utf8_len(
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf32ne_to_utf8(None, src, flags)
}

/// Measures [`utf32le_to_utf8`] without writing.
pub fn utf32le_to_utf8_len(
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf32le_to_utf8(None, src, flags)
}

/// Measures [`utf32be_to_utf8`] without writing.
pub fn utf32be_to_utf8_len(
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf32be_to_utf8(None, src, flags)
}

// --- UTF-32 -> UTF-16 (matched endianness) -----------------------------

/// Converts UTF-32 to UTF-16, taking both sides' byte order from a leading
/// BOM; native order without one.
pub fn utf32_to_utf16(
    dst: Option<&mut [u16]>,
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    match Utf32::bom(&src) {
        Some((bom_len, Some(order))) => {
            if flags.contains(ConvertFlags::FORBID_BOM) {
                return Err(ConvertError::new(ErrorKind::BomForbidden, 0, 0));
            }
            let rest = src.skip(bom_len);
            after_bom(
                engine::run::<Utf32, Utf16>(dst, rest, order, order, flags | ConvertFlags::FORBID_BOM),
                bom_len,
            )
        }
        _ => utf32ne_to_utf16ne(dst, src, flags),
    }
}

/// Converts native-endian UTF-32 to native-endian UTF-16.
pub fn utf32ne_to_utf16ne(
    dst: Option<&mut [u16]>,
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf32, Utf16>(dst, src, ByteOrder::native(), ByteOrder::native(), flags)
}

/// Converts little-endian UTF-32 to little-endian UTF-16.
pub fn utf32le_to_utf16le(
    dst: Option<&mut [u16]>,
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf32, Utf16>(dst, src, ByteOrder::Little, ByteOrder::Little, flags)
}

/// Converts big-endian UTF-32 to big-endian UTF-16.
pub fn utf32be_to_utf16be(
    dst: Option<&mut [u16]>,
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    engine::run::<Utf32, Utf16>(dst, src, ByteOrder::Big, ByteOrder::Big, flags)
}

/// Measures [`utf32_to_utf16`] without writing.
pub fn utf32_to_utf16_len(
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf32_to_utf16(None, src, flags)
}

/// Measures [`utf32ne_to_utf16ne`] without writing.
pub fn utf32ne_to_utf16ne_len(
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf32ne_to_utf16ne(None, src, flags)
}

/// Measures [`utf32le_to_utf16le`] without writing.
pub fn utf32le_to_utf16le_len(
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf32le_to_utf16le(None, src, flags)
}

/// Measures [`utf32be_to_utf16be`] without writing.
pub fn utf32be_to_utf16be_len(
    src: Units<'_, u32>,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    utf32be_to_utf16be(None, src, flags)
}

// Scalar decoding for the UTF-8 text helpers; shares the automaton above.
pub(crate) use engine::Step;

pub(crate) fn decode_one_utf8(src: &Units<'_, u8>, at: usize) -> Step {
    Utf8::decode(src, at, ByteOrder::native())
}

#[cfg(test)]
mod tests;
