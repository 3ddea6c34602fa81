//! The shared conversion loop.
//!
//! Every direction is the same machine: decode one scalar from the source
//! encoding, apply error policy, encode it into the destination encoding,
//! repeat. The machine is factored over a source-reader / destination-writer
//! seam so the nine direction × endianness surfaces in [`super`] stay thin
//! wrappers instead of nine copied loops.
//!
//! Invariants
//! - Output units are written in strict input order; nothing is written
//!   ahead of the scalar currently being produced.
//! - One destination slot is reserved for the terminator at all times, so a
//!   `NoSpace` failure never leaves a partially written code point and
//!   `written` always counts readable units.
//! - `processed` counts fully consumed source units, including a skipped
//!   BOM; on failure it is the offset of the offending unit itself.
//! - No state survives a call. Byte order is resolved per call.

use crate::endian::ByteOrder;
use crate::error::{ConvertError, ErrorKind};
use crate::flags::ConvertFlags;
use crate::scalar;
use crate::units::{CodeUnit, Units};

use super::Converted;

/// Outcome of decoding one scalar from the source.
pub(crate) enum Step {
    /// A scalar and the source units it occupied.
    Scalar { value: u32, len: usize },
    /// An ill-formed sequence or invalid scalar occupying `len` units.
    /// Error policy decides between substituting U+FFFD and halting.
    Invalid { len: usize },
    /// A multi-unit sequence runs past the end of the input.
    Truncated,
    /// End of input.
    End,
}

/// Reads scalars from one encoding's code units.
pub(crate) trait Decode {
    type Unit: CodeUnit;

    /// Decodes the sequence starting at `at`. `order` applies to units
    /// wider than a byte.
    fn decode(src: &Units<'_, Self::Unit>, at: usize, order: ByteOrder) -> Step;

    /// Length in units of a leading BOM, plus the byte order it announces
    /// (`None` for UTF-8, whose mark announces no order).
    fn bom(src: &Units<'_, Self::Unit>) -> Option<(usize, Option<ByteOrder>)>;
}

/// Writes scalars as one encoding's code units.
pub(crate) trait Encode {
    type Unit: CodeUnit;

    /// Destination units `value` occupies.
    fn len_of(value: u32) -> usize;

    /// Encodes `value` into the first `len_of(value)` units of `dst`,
    /// byte-ordered for `order`.
    fn encode(value: u32, order: ByteOrder, dst: &mut [Self::Unit]);
}

pub(crate) struct Utf8;
pub(crate) struct Utf16;
pub(crate) struct Utf32;

impl Decode for Utf8 {
    type Unit = u8;

    fn decode(src: &Units<'_, u8>, at: usize, _order: ByteOrder) -> Step {
        let Some(b0) = src.get(at) else {
            return Step::End;
        };
        if b0 < 0x80 {
            return Step::Scalar {
                value: b0.into(),
                len: 1,
            };
        }
        if scalar::is_invalid_utf8_octet(b0) {
            return Step::Invalid { len: 1 };
        }
        if b0 & 0xE0 == 0xC0 {
            let Some(c1) = src.get(at + 1) else {
                return Step::Truncated;
            };
            Step::Scalar {
                value: (u32::from(b0 & 0x1F) << 6) | u32::from(c1 & 0x3F),
                len: 2,
            }
        } else if b0 & 0xF0 == 0xE0 {
            let (Some(c1), Some(c2)) = (src.get(at + 1), src.get(at + 2)) else {
                return Step::Truncated;
            };
            let value =
                (u32::from(b0 & 0x0F) << 12) | (u32::from(c1 & 0x3F) << 6) | u32::from(c2 & 0x3F);
            // Three bytes can encode the surrogate range; those are not
            // scalars and must go through error policy.
            if scalar::is_surrogate(value) {
                Step::Invalid { len: 3 }
            } else {
                Step::Scalar { value, len: 3 }
            }
        } else if b0 & 0xF8 == 0xF0 {
            let (Some(c1), Some(c2), Some(c3)) = (src.get(at + 1), src.get(at + 2), src.get(at + 3))
            else {
                return Step::Truncated;
            };
            let value = (u32::from(b0 & 0x07) << 18)
                | (u32::from(c1 & 0x3F) << 12)
                | (u32::from(c2 & 0x3F) << 6)
                | u32::from(c3 & 0x3F);
            if scalar::is_valid_scalar(value) {
                Step::Scalar { value, len: 4 }
            } else {
                Step::Invalid { len: 4 }
            }
        } else {
            // Stray continuation byte in leader position.
            Step::Invalid { len: 1 }
        }
    }

    fn bom(src: &Units<'_, u8>) -> Option<(usize, Option<ByteOrder>)> {
        if src.get(0) == Some(0xEF) && src.get(1) == Some(0xBB) && src.get(2) == Some(0xBF) {
            Some((3, None))
        } else {
            None
        }
    }
}

impl Decode for Utf16 {
    type Unit = u16;

    fn decode(src: &Units<'_, u16>, at: usize, order: ByteOrder) -> Step {
        let Some(raw1) = src.get(at) else {
            return Step::End;
        };
        let w1 = raw1.from_order(order);
        if !scalar::is_surrogate(w1.into()) {
            return Step::Scalar {
                value: w1.into(),
                len: 1,
            };
        }
        if scalar::is_high_surrogate(w1) {
            let Some(raw2) = src.get(at + 1) else {
                return Step::Truncated;
            };
            if scalar::is_low_surrogate(raw2.from_order(order)) {
                Step::Scalar {
                    value: scalar::from_surrogate_pair(w1, raw2.from_order(order)),
                    len: 2,
                }
            } else {
                // The non-low follower is re-examined as its own unit.
                Step::Invalid { len: 1 }
            }
        } else {
            // Low surrogate with no preceding high surrogate.
            Step::Invalid { len: 1 }
        }
    }

    fn bom(src: &Units<'_, u16>) -> Option<(usize, Option<ByteOrder>)> {
        // The mark is recognized by its bytes in memory, not by any assumed
        // unit order.
        match src.get(0)?.to_ne_bytes() {
            [0xFF, 0xFE] => Some((1, Some(ByteOrder::Little))),
            [0xFE, 0xFF] => Some((1, Some(ByteOrder::Big))),
            _ => None,
        }
    }
}

impl Decode for Utf32 {
    type Unit = u32;

    fn decode(src: &Units<'_, u32>, at: usize, order: ByteOrder) -> Step {
        let Some(raw) = src.get(at) else {
            return Step::End;
        };
        let value = raw.from_order(order);
        if scalar::is_valid_scalar(value) {
            Step::Scalar { value, len: 1 }
        } else {
            Step::Invalid { len: 1 }
        }
    }

    fn bom(src: &Units<'_, u32>) -> Option<(usize, Option<ByteOrder>)> {
        match src.get(0)?.to_ne_bytes() {
            [0xFF, 0xFE, 0x00, 0x00] => Some((1, Some(ByteOrder::Little))),
            [0x00, 0x00, 0xFE, 0xFF] => Some((1, Some(ByteOrder::Big))),
            _ => None,
        }
    }
}

impl Encode for Utf8 {
    type Unit = u8;

    fn len_of(value: u32) -> usize {
        scalar::utf8_len_of(value)
    }

    fn encode(value: u32, _order: ByteOrder, dst: &mut [u8]) {
        match scalar::utf8_len_of(value) {
            1 => dst[0] = value as u8,
            2 => {
                dst[0] = 0xC0 | (value >> 6) as u8;
                dst[1] = 0x80 | (value & 0x3F) as u8;
            }
            3 => {
                dst[0] = 0xE0 | (value >> 12) as u8;
                dst[1] = 0x80 | ((value >> 6) & 0x3F) as u8;
                dst[2] = 0x80 | (value & 0x3F) as u8;
            }
            _ => {
                dst[0] = 0xF0 | (value >> 18) as u8;
                dst[1] = 0x80 | ((value >> 12) & 0x3F) as u8;
                dst[2] = 0x80 | ((value >> 6) & 0x3F) as u8;
                dst[3] = 0x80 | (value & 0x3F) as u8;
            }
        }
    }
}

impl Encode for Utf16 {
    type Unit = u16;

    fn len_of(value: u32) -> usize {
        scalar::utf16_len_of(value)
    }

    fn encode(value: u32, order: ByteOrder, dst: &mut [u16]) {
        if value <= 0xFFFF {
            dst[0] = (value as u16).to_order(order);
        } else {
            let (high, low) = scalar::to_surrogate_pair(value);
            dst[0] = high.to_order(order);
            dst[1] = low.to_order(order);
        }
    }
}

impl Encode for Utf32 {
    type Unit = u32;

    fn len_of(_value: u32) -> usize {
        1
    }

    fn encode(value: u32, order: ByteOrder, dst: &mut [u32]) {
        dst[0] = value.to_order(order);
    }
}

/// Runs one full conversion.
///
/// With `dst == None` this measures: `written` reports the destination
/// units the conversion would produce, terminator excluded. With a buffer
/// it additionally writes the units followed by a single zero unit.
pub(crate) fn run<S: Decode, D: Encode>(
    mut dst: Option<&mut [D::Unit]>,
    src: Units<'_, S::Unit>,
    src_order: ByteOrder,
    dst_order: ByteOrder,
    flags: ConvertFlags,
) -> Result<Converted, ConvertError> {
    let mut pos = 0usize;
    let mut written = 0usize;

    if let Some((bom_len, _)) = S::bom(&src) {
        if flags.contains(ConvertFlags::FORBID_BOM) {
            return Err(ConvertError::new(ErrorKind::BomForbidden, 0, 0));
        }
        // Consumed, counted in `processed`, never re-emitted.
        pos = bom_len;
    }

    loop {
        let (value, len) = match S::decode(&src, pos, src_order) {
            Step::End => break,
            Step::Truncated => {
                return Err(ConvertError::new(ErrorKind::InvalidArgument, written, pos));
            }
            Step::Invalid { len } => {
                if flags.contains(ConvertFlags::STRICT_CODE_POINTS) {
                    return Err(ConvertError::new(ErrorKind::InvalidCodePoint, written, pos));
                }
                (scalar::REPLACEMENT_SCALAR, len)
            }
            Step::Scalar { value, len } => (value, len),
        };

        let need = D::len_of(value);
        if let Some(buf) = dst.as_deref_mut() {
            if buf.len() - written < need + 1 {
                return Err(ConvertError::new(ErrorKind::NoSpace, written, pos));
            }
            D::encode(value, dst_order, &mut buf[written..written + need]);
        }
        written += need;
        pos += len;
    }

    if let Some(buf) = dst {
        if written >= buf.len() {
            return Err(ConvertError::new(ErrorKind::NoSpace, written, pos));
        }
        buf[written] = D::Unit::ZERO;
    }

    Ok(Converted {
        written,
        processed: pos,
    })
}
