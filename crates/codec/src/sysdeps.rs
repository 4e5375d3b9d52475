//! Host numeric services: locale-independent string <-> double.

/// Capability interface for the two numeric conversions the codecs
/// delegate to the host.
///
/// Both operations are pure; every parser and writer takes its handle
/// explicitly, so there is no process-wide state.
pub trait SystemDeps {
    /// Parses an ASCII decimal into an `f64`. Returns `None` unless the
    /// whole input was consumed and the result is finite; overflow to
    /// infinity is treated as a range error.
    fn parse_double(&self, ascii: &[u8]) -> Option<f64>;

    /// Formats `value` as decimal ASCII adequate for JSON output, with
    /// no locale-dependent separators.
    fn format_double(&self, value: f64) -> Vec<u8>;
}

/// Standard-library-backed numeric services.
///
/// `str::parse::<f64>` and the `Display` impl for `f64` are both
/// locale-independent, and `Display` output round-trips exactly through
/// `parse` for finite values.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdSystemDeps;

impl SystemDeps for StdSystemDeps {
    fn parse_double(&self, ascii: &[u8]) -> Option<f64> {
        let text = std::str::from_utf8(ascii).ok()?;
        let value: f64 = text.parse().ok()?;
        value.is_finite().then_some(value)
    }

    fn format_double(&self, value: f64) -> Vec<u8> {
        value.to_string().into_bytes()
    }
}
