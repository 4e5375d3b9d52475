//! Event sink that renders canonical JSON text.

use devwire_buffers::Writer;

use crate::events::EventSink;
use crate::status::Status;
use crate::sysdeps::SystemDeps;

const HEX: &[u8; 16] = b"0123456789abcdef";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    None,
    Object,
    Array,
}

/// One open container and how many elements it has received so far. In
/// an object, even counts are key slots and odd counts are value slots.
#[derive(Debug)]
struct Frame {
    container: Container,
    size: usize,
}

impl Frame {
    fn new(container: Container) -> Self {
        Self { container, size: 0 }
    }
}

/// Renders events as canonical JSON into a caller-owned buffer: no
/// whitespace, printable ASCII literal, everything else `\uXXXX`.
///
/// On an `error` event the status slot is set, the output buffer is
/// cleared, and all further events are ignored.
pub struct JsonWriter<'a> {
    deps: &'a dyn SystemDeps,
    out: Writer<'a>,
    status: &'a mut Status,
    stack: Vec<Frame>,
}

impl<'a> JsonWriter<'a> {
    pub fn new(deps: &'a dyn SystemDeps, out: &'a mut Vec<u8>, status: &'a mut Status) -> Self {
        *status = Status::default();
        Self {
            deps,
            out: Writer::new(out),
            status,
            stack: vec![Frame::new(Container::None)],
        }
    }

    fn start_element(&mut self) {
        // The top-level frame stays on the stack for the writer's whole
        // life, so last_mut always succeeds on well-formed streams.
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        debug_assert!(frame.container != Container::None || frame.size == 0);
        if frame.size != 0 {
            let delim = if frame.size % 2 == 0 || frame.container == Container::Array {
                b','
            } else {
                b':'
            };
            self.out.u8(delim);
        }
        frame.size += 1;
    }

    fn end_container(&mut self, container: Container, close: u8) {
        debug_assert!(
            self.stack.len() >= 2
                && self.stack.last().map(|frame| frame.container) == Some(container)
        );
        if self.stack.len() >= 2 {
            self.stack.pop();
        }
        self.out.u8(close);
    }
}

impl EventSink for JsonWriter<'_> {
    fn object_begin(&mut self) {
        if !self.status.ok() {
            return;
        }
        self.start_element();
        self.stack.push(Frame::new(Container::Object));
        self.out.u8(b'{');
    }

    fn object_end(&mut self) {
        if !self.status.ok() {
            return;
        }
        self.end_container(Container::Object, b'}');
    }

    fn array_begin(&mut self) {
        if !self.status.ok() {
            return;
        }
        self.start_element();
        self.stack.push(Frame::new(Container::Array));
        self.out.u8(b'[');
    }

    fn array_end(&mut self) {
        if !self.status.ok() {
            return;
        }
        self.end_container(Container::Array, b']');
    }

    fn string(&mut self, chars: Vec<u16>) {
        if !self.status.ok() {
            return;
        }
        self.start_element();
        self.out.u8(b'"');
        for ch in chars {
            match ch {
                0x22 => self.out.ascii("\\\""),
                0x5c => self.out.ascii("\\\\"),
                0x08 => self.out.ascii("\\b"),
                0x0c => self.out.ascii("\\f"),
                0x0a => self.out.ascii("\\n"),
                0x0d => self.out.ascii("\\r"),
                0x09 => self.out.ascii("\\t"),
                0x20..=0x7e => self.out.u8(ch as u8),
                _ => {
                    // Four lowercase hex digits, most significant first.
                    // Surrogate halves come through as two such escapes.
                    self.out.ascii("\\u");
                    for shift in [12, 8, 4, 0] {
                        self.out.u8(HEX[(ch >> shift) as usize & 0xf]);
                    }
                }
            }
        }
        self.out.u8(b'"');
    }

    fn int(&mut self, value: i32) {
        if !self.status.ok() {
            return;
        }
        self.start_element();
        self.out.ascii(&value.to_string());
    }

    fn double(&mut self, value: f64) {
        if !self.status.ok() {
            return;
        }
        self.start_element();
        let text = self.deps.format_double(value);
        self.out.buf(&text);
    }

    fn boolean(&mut self, value: bool) {
        if !self.status.ok() {
            return;
        }
        self.start_element();
        self.out.ascii(if value { "true" } else { "false" });
    }

    fn null(&mut self) {
        if !self.status.ok() {
            return;
        }
        self.start_element();
        self.out.ascii("null");
    }

    fn error(&mut self, status: Status) {
        *self.status = status;
        self.out.clear();
    }
}
