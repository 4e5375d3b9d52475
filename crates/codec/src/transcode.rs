//! One-call pipelines between the two wire formats.

use crate::cbor::{parse_cbor, CborEncoder};
use crate::json::{parse_json, CodeUnit, JsonWriter};
use crate::status::Status;
use crate::sysdeps::SystemDeps;

/// Parses JSON (8-bit or 16-bit code units) and re-encodes it as
/// constrained CBOR. On failure the partial output is discarded and the
/// terminal status returned.
pub fn json_to_cbor<C: CodeUnit>(deps: &dyn SystemDeps, json: &[C]) -> Result<Vec<u8>, Status> {
    let mut out = Vec::new();
    let mut status = Status::default();
    {
        let mut encoder = CborEncoder::new(&mut out, &mut status);
        parse_json(deps, json, &mut encoder);
    }
    if status.ok() {
        Ok(out)
    } else {
        Err(status)
    }
}

/// Parses constrained CBOR and re-encodes it as canonical JSON text.
pub fn cbor_to_json(deps: &dyn SystemDeps, bytes: &[u8]) -> Result<Vec<u8>, Status> {
    let mut out = Vec::new();
    let mut status = Status::default();
    {
        let mut writer = JsonWriter::new(deps, &mut out, &mut status);
        parse_cbor(bytes, &mut writer);
    }
    if status.ok() {
        Ok(out)
    } else {
        Err(status)
    }
}
