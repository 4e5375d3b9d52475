//! Low-level encode and decode of CBOR items.
//!
//! Encoders append to a caller-owned buffer; decoders read through a
//! [`Reader`] and advance it only when the whole item parsed cleanly.

use devwire_buffers::{Reader, Writer};

use super::constants::*;

/// Packs a major type and additional info into an initial byte.
pub fn encode_initial_byte(major: MajorType, additional_info: u8) -> u8 {
    ((major as u8) << MAJOR_TYPE_SHIFT) | (additional_info & ADDITIONAL_INFO_MASK)
}

/// Writes the start of an item, choosing the shortest encoding of
/// `value` (the payload for the integer majors, the size for everything
/// else): inline for 0..=23, otherwise a 1/2/4/8-byte big-endian
/// payload.
pub fn write_item_start(major: MajorType, value: u64, out: &mut Vec<u8>) {
    let mut w = Writer::new(out);
    if value < 24 {
        w.u8(encode_initial_byte(major, value as u8));
    } else if value <= u8::MAX as u64 {
        w.u8(encode_initial_byte(major, INFO_1_BYTE));
        w.u8(value as u8);
    } else if value <= u16::MAX as u64 {
        w.u8(encode_initial_byte(major, INFO_2_BYTES));
        w.u16(value as u16);
    } else if value <= u32::MAX as u64 {
        w.u8(encode_initial_byte(major, INFO_4_BYTES));
        w.u32(value as u32);
    } else {
        w.u8(encode_initial_byte(major, INFO_8_BYTES));
        w.u64(value);
    }
}

/// Reads an item start. Additional info 28..=31 (reserved values and
/// the indefinite marker) is rejected.
pub fn read_item_start(r: &mut Reader<'_>) -> Option<(MajorType, u64)> {
    let mut probe = *r;
    let initial_byte = probe.u8()?;
    let major = MajorType::of(initial_byte);
    let value = match initial_byte & ADDITIONAL_INFO_MASK {
        info @ 0..=23 => info as u64,
        INFO_1_BYTE => probe.u8()? as u64,
        INFO_2_BYTES => probe.u16()? as u64,
        INFO_4_BYTES => probe.u32()? as u64,
        INFO_8_BYTES => probe.u64()?,
        _ => return None,
    };
    *r = probe;
    Some((major, value))
}

/// Encodes `value` as UNSIGNED (major type 0).
pub fn encode_unsigned(value: u64, out: &mut Vec<u8>) {
    write_item_start(MajorType::Unsigned, value, out);
}

pub fn decode_unsigned(r: &mut Reader<'_>) -> Option<u64> {
    let mut probe = *r;
    let (major, value) = read_item_start(&mut probe)?;
    if major != MajorType::Unsigned {
        return None;
    }
    *r = probe;
    Some(value)
}

/// Encodes a negative `value` as NEGATIVE (major type 1), whose payload
/// is `-(value + 1)`.
pub fn encode_negative(value: i64, out: &mut Vec<u8>) {
    debug_assert!(value < 0);
    write_item_start(MajorType::Negative, (-(value + 1)) as u64, out);
}

pub fn decode_negative(r: &mut Reader<'_>) -> Option<i64> {
    let mut probe = *r;
    let (major, value) = read_item_start(&mut probe)?;
    if major != MajorType::Negative {
        return None;
    }
    let n = i64::try_from(value).ok()?;
    *r = probe;
    Some(-n - 1)
}

/// Encodes `value` as UNSIGNED when non-negative, NEGATIVE otherwise.
pub fn encode_signed(value: i32, out: &mut Vec<u8>) {
    if value >= 0 {
        encode_unsigned(value as u64, out);
    } else {
        encode_negative(value as i64, out);
    }
}

/// Decodes either integer major type, failing if the value falls
/// outside the `i32` range.
pub fn decode_signed(r: &mut Reader<'_>) -> Option<i32> {
    let mut probe = *r;
    let (major, value) = read_item_start(&mut probe)?;
    let decoded = match major {
        MajorType::Unsigned => i32::try_from(value).ok()?,
        MajorType::Negative => {
            let n = i64::try_from(value).ok()?;
            i32::try_from(-n - 1).ok()?
        }
        _ => return None,
    };
    *r = probe;
    Some(decoded)
}

/// Encodes UTF-16 code units as a BYTE_STRING (major type 2) of
/// `2 * chars.len()` bytes, each unit least-significant byte first.
/// The wire order is fixed regardless of host endianness.
pub fn encode_utf16_string(chars: &[u16], out: &mut Vec<u8>) {
    write_item_start(MajorType::ByteString, (chars.len() * 2) as u64, out);
    let mut w = Writer::new(out);
    for &ch in chars {
        w.u16_le(ch);
    }
}

/// Decodes a BYTE_STRING into UTF-16 code units. The byte length must
/// be even.
pub fn decode_utf16_string(r: &mut Reader<'_>) -> Option<Vec<u16>> {
    let mut probe = *r;
    let (major, num_bytes) = read_item_start(&mut probe)?;
    if major != MajorType::ByteString || num_bytes & 1 != 0 {
        return None;
    }
    let payload = probe.take(usize::try_from(num_bytes).ok()?)?;
    let chars = payload
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    *r = probe;
    Some(chars)
}

/// Encodes a double: major type 7 with additional info 27, then 8
/// big-endian IEEE-754 bytes.
pub fn encode_double(value: f64, out: &mut Vec<u8>) {
    let mut w = Writer::new(out);
    w.u8(ENCODED_DOUBLE);
    w.f64(value);
}

pub fn decode_double(r: &mut Reader<'_>) -> Option<f64> {
    let mut probe = *r;
    if probe.u8()? != ENCODED_DOUBLE {
        return None;
    }
    let value = probe.f64()?;
    *r = probe;
    Some(value)
}
