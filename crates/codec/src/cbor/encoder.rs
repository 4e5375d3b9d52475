//! Event sink that emits constrained CBOR.

use crate::events::EventSink;
use crate::status::Status;

use super::constants::*;
use super::primitives::{encode_double, encode_signed, encode_utf16_string};

/// Encodes events into a caller-owned buffer. Piping a JSON parse into
/// this sink converts JSON to the constrained CBOR profile.
///
/// Containers are emitted indefinite-length; the event stream itself
/// supplies the structure, so no frame stack is kept here. On an
/// `error` event the status slot is set, the output buffer is cleared,
/// and all further events are ignored.
pub struct CborEncoder<'a> {
    out: &'a mut Vec<u8>,
    status: &'a mut Status,
}

impl<'a> CborEncoder<'a> {
    pub fn new(out: &'a mut Vec<u8>, status: &'a mut Status) -> Self {
        *status = Status::default();
        Self { out, status }
    }
}

impl EventSink for CborEncoder<'_> {
    fn object_begin(&mut self) {
        if !self.status.ok() {
            return;
        }
        self.out.push(INDEFINITE_MAP_START);
    }

    fn object_end(&mut self) {
        if !self.status.ok() {
            return;
        }
        self.out.push(STOP_BYTE);
    }

    fn array_begin(&mut self) {
        if !self.status.ok() {
            return;
        }
        self.out.push(INDEFINITE_ARRAY_START);
    }

    fn array_end(&mut self) {
        if !self.status.ok() {
            return;
        }
        self.out.push(STOP_BYTE);
    }

    fn string(&mut self, chars: Vec<u16>) {
        if !self.status.ok() {
            return;
        }
        encode_utf16_string(&chars, self.out);
    }

    fn int(&mut self, value: i32) {
        if !self.status.ok() {
            return;
        }
        encode_signed(value, self.out);
    }

    fn double(&mut self, value: f64) {
        if !self.status.ok() {
            return;
        }
        encode_double(value, self.out);
    }

    fn boolean(&mut self, value: bool) {
        if !self.status.ok() {
            return;
        }
        self.out.push(if value { ENCODED_TRUE } else { ENCODED_FALSE });
    }

    fn null(&mut self) {
        if !self.status.ok() {
            return;
        }
        self.out.push(ENCODED_NULL);
    }

    fn error(&mut self, status: Status) {
        *self.status = status;
        self.out.clear();
    }
}
