//! Validates and parses a constrained CBOR document into events.

use devwire_buffers::Reader;

use crate::events::EventSink;
use crate::status::{ErrorKind, Status};

use super::constants::*;
use super::primitives::{decode_double, decode_signed, decode_utf16_string};

const STACK_LIMIT: usize = 1000;

/// Parses a CBOR document into events. The top-level item must be an
/// indefinite-length map; nested containers are indefinite-length too,
/// and scalars are limited to the profile (i32 integers, UTF-16 byte
/// strings, doubles, booleans, null).
///
/// On failure the sink receives exactly one `error` event carrying the
/// offset of the offending byte; bytes after the balanced top-level map
/// are not inspected.
pub fn parse_cbor(bytes: &[u8], sink: &mut dyn EventSink) {
    if bytes.is_empty() {
        sink.error(Status::at(ErrorKind::CborNoInput, 0));
        return;
    }
    if bytes[0] != INDEFINITE_MAP_START {
        sink.error(Status::at(ErrorKind::CborInvalidStartByte, 0));
        return;
    }
    let mut r = Reader::new(bytes);
    r.skip(1);
    let mut parser = CborParser { sink };
    parser.sink.object_begin();
    let _ = parser.parse_map_items(&mut r, 1);
}

/// Marker that the error event has been delivered; unwinds the descent.
struct Stop;

struct CborParser<'a> {
    sink: &'a mut dyn EventSink,
}

impl CborParser<'_> {
    fn fail(&mut self, kind: ErrorKind, pos: usize) -> Stop {
        self.sink.error(Status::at(kind, pos as i64));
        Stop
    }

    fn parse_value(&mut self, r: &mut Reader<'_>, depth: usize) -> Result<(), Stop> {
        if depth > STACK_LIMIT {
            return Err(self.fail(ErrorKind::CborStackLimitExceeded, r.pos()));
        }
        let pos = r.pos();
        let Some(initial_byte) = r.peek() else {
            return Err(self.fail(ErrorKind::CborUnexpectedEofExpectedValue, pos));
        };
        match initial_byte {
            ENCODED_TRUE => {
                r.skip(1);
                self.sink.boolean(true);
                Ok(())
            }
            ENCODED_FALSE => {
                r.skip(1);
                self.sink.boolean(false);
                Ok(())
            }
            ENCODED_NULL => {
                r.skip(1);
                self.sink.null();
                Ok(())
            }
            ENCODED_DOUBLE => match decode_double(r) {
                Some(value) => {
                    self.sink.double(value);
                    Ok(())
                }
                None => Err(self.fail(ErrorKind::CborInvalidDouble, pos)),
            },
            INDEFINITE_ARRAY_START => {
                r.skip(1);
                self.sink.array_begin();
                self.parse_array_items(r, depth + 1)
            }
            INDEFINITE_MAP_START => {
                r.skip(1);
                self.sink.object_begin();
                self.parse_map_items(r, depth + 1)
            }
            _ => match MajorType::of(initial_byte) {
                MajorType::Unsigned | MajorType::Negative => match decode_signed(r) {
                    Some(value) => {
                        self.sink.int(value);
                        Ok(())
                    }
                    None => Err(self.fail(ErrorKind::CborInvalidSigned, pos)),
                },
                MajorType::ByteString => match decode_utf16_string(r) {
                    Some(chars) => {
                        self.sink.string(chars);
                        Ok(())
                    }
                    None => Err(self.fail(ErrorKind::CborInvalidString16, pos)),
                },
                // STRING, TAG, definite-length containers and the other
                // simple values are outside the profile.
                _ => Err(self.fail(ErrorKind::CborUnsupportedValue, pos)),
            },
        }
    }

    fn parse_array_items(&mut self, r: &mut Reader<'_>, depth: usize) -> Result<(), Stop> {
        loop {
            let Some(initial_byte) = r.peek() else {
                return Err(self.fail(ErrorKind::CborUnexpectedEofInArray, r.pos()));
            };
            if initial_byte == STOP_BYTE {
                r.skip(1);
                self.sink.array_end();
                return Ok(());
            }
            self.parse_value(r, depth)?;
        }
    }

    fn parse_map_items(&mut self, r: &mut Reader<'_>, depth: usize) -> Result<(), Stop> {
        loop {
            let pos = r.pos();
            let Some(initial_byte) = r.peek() else {
                return Err(self.fail(ErrorKind::CborUnexpectedEofInMap, pos));
            };
            if initial_byte == STOP_BYTE {
                r.skip(1);
                self.sink.object_end();
                return Ok(());
            }
            if MajorType::of(initial_byte) != MajorType::ByteString {
                return Err(self.fail(ErrorKind::CborInvalidMapKey, pos));
            }
            match decode_utf16_string(r) {
                Some(key) => self.sink.string(key),
                None => return Err(self.fail(ErrorKind::CborInvalidString16, pos)),
            }
            self.parse_value(r, depth)?;
        }
    }
}
