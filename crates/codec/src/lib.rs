//! Streaming JSON and constrained-CBOR codecs for a wire-level
//! inspector protocol, joined by a SAX-style event interface.
//!
//! Either format parses into a stream of [`Event`]s pushed at an
//! [`EventSink`]. Sinks that re-encode those events as canonical JSON
//! text ([`JsonWriter`]) or constrained CBOR ([`CborEncoder`]) make the
//! two formats interconvertible by piping a parser into the opposite
//! writer; [`json_to_cbor`] and [`cbor_to_json`] are those pipelines in
//! one call.
//!
//! Parsing is purely synchronous: a parse call runs to completion,
//! delivering either a balanced event stream or exactly one error event
//! carrying an [`ErrorKind`] and a byte position.
//!
//! ```
//! use devwire_codec::{json_to_cbor, StdSystemDeps};
//!
//! let cbor = json_to_cbor(&StdSystemDeps, b"{\"foo\": 42}".as_slice()).unwrap();
//! assert_eq!(cbor, [0xbf, 0x46, b'f', 0, b'o', 0, b'o', 0, 0x18, 42, 0xff]);
//! ```

pub mod cbor;
pub mod events;
pub mod json;
pub mod status;
pub mod sysdeps;
pub mod transcode;

pub use cbor::{parse_cbor, CborEncoder};
pub use events::{replay, Event, EventSink};
pub use json::{parse_json, CodeUnit, JsonWriter};
pub use status::{ErrorKind, Status};
pub use sysdeps::{StdSystemDeps, SystemDeps};
pub use transcode::{cbor_to_json, json_to_cbor};
