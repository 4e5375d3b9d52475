//! Binary buffer utilities for the devwire codecs.
//!
//! - [`Reader`] - Checked cursor reads over a borrowed byte slice
//! - [`Writer`] - Append-only writes into a caller-owned output buffer
//!
//! # Example
//!
//! ```
//! use devwire_buffers::{Reader, Writer};
//!
//! let mut data = Vec::new();
//! let mut writer = Writer::new(&mut data);
//! writer.u8(0x01);
//! writer.u16(0x0203);
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8(), Some(0x01));
//! assert_eq!(reader.u16(), Some(0x0203));
//! assert!(reader.is_empty());
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;
