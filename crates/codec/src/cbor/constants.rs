//! Initial-byte layout for the constrained CBOR profile.
//!
//! An item's initial byte carries the major type in its high 3 bits and
//! additional information in the low 5 (RFC 7049 section 2.1).

/// Major type of a CBOR item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorType {
    Unsigned = 0,
    Negative = 1,
    ByteString = 2,
    String = 3,
    Array = 4,
    Map = 5,
    Tag = 6,
    Simple = 7,
}

impl MajorType {
    /// Major type encoded in an initial byte.
    pub fn of(initial_byte: u8) -> MajorType {
        match initial_byte >> MAJOR_TYPE_SHIFT {
            0 => MajorType::Unsigned,
            1 => MajorType::Negative,
            2 => MajorType::ByteString,
            3 => MajorType::String,
            4 => MajorType::Array,
            5 => MajorType::Map,
            6 => MajorType::Tag,
            _ => MajorType::Simple,
        }
    }
}

pub const MAJOR_TYPE_SHIFT: u8 = 5;
pub const ADDITIONAL_INFO_MASK: u8 = 0x1f;

// Additional info 24..=27 selects the payload width of an item start;
// 28..=30 is reserved.
pub const INFO_1_BYTE: u8 = 24;
pub const INFO_2_BYTES: u8 = 25;
pub const INFO_4_BYTES: u8 = 26;
pub const INFO_8_BYTES: u8 = 27;
/// Additional info 31 marks indefinite-length containers and the stop
/// byte.
pub const INFO_INDEFINITE: u8 = 31;

// Simple values (major type 7).
pub const ENCODED_FALSE: u8 = (7 << 5) | 20;
pub const ENCODED_TRUE: u8 = (7 << 5) | 21;
pub const ENCODED_NULL: u8 = (7 << 5) | 22;
/// Initial byte of a double; 8 big-endian IEEE-754 bytes follow.
pub const ENCODED_DOUBLE: u8 = (7 << 5) | 27;

pub const INDEFINITE_ARRAY_START: u8 = (4 << 5) | INFO_INDEFINITE;
pub const INDEFINITE_MAP_START: u8 = (5 << 5) | INFO_INDEFINITE;
/// Terminates the innermost indefinite-length container.
pub const STOP_BYTE: u8 = (7 << 5) | INFO_INDEFINITE;
