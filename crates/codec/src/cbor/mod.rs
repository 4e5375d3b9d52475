//! Constrained CBOR (RFC 7049 subset): item primitives, document
//! parser, event encoder.

pub mod constants;
pub mod encoder;
pub mod parser;
pub mod primitives;

pub use constants::MajorType;
pub use encoder::CborEncoder;
pub use parser::parse_cbor;
pub use primitives::{
    decode_double, decode_negative, decode_signed, decode_unsigned, decode_utf16_string,
    encode_double, encode_initial_byte, encode_negative, encode_signed, encode_unsigned,
    encode_utf16_string, read_item_start, write_item_start,
};
