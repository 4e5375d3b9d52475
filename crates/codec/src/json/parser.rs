//! Streaming JSON tokenizer and recursive-descent value parser.

use crate::events::EventSink;
use crate::status::{ErrorKind, Status};
use crate::sysdeps::SystemDeps;

const STACK_LIMIT: usize = 1000;

/// Input element for the JSON parser: an 8-bit or 16-bit code unit.
///
/// 8-bit units are zero-extended when they reach a string payload, so
/// non-ASCII bytes pass through unchanged.
pub trait CodeUnit: Copy {
    /// Bytes per code unit; error positions are byte offsets, so they
    /// scale by this.
    const WIDTH: usize;

    fn value(self) -> u16;
}

impl CodeUnit for u8 {
    const WIDTH: usize = 1;

    #[inline]
    fn value(self) -> u16 {
        self as u16
    }
}

impl CodeUnit for u16 {
    const WIDTH: usize = 2;

    #[inline]
    fn value(self) -> u16 {
        self
    }
}

/// Parses a single JSON value followed only by whitespace, pushing
/// events into `sink`.
///
/// Line comments (`// ...`) and block comments (`/* ... */`) are
/// accepted between tokens. On failure the sink receives exactly one
/// `error` event carrying the byte offset of the offending token.
pub fn parse_json<C: CodeUnit>(deps: &dyn SystemDeps, input: &[C], sink: &mut dyn EventSink) {
    let mut parser = JsonParser { deps, sink };
    parser.parse(input);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    StringLiteral,
    Number,
    BoolTrue,
    BoolFalse,
    NullLiteral,
    ListSeparator,
    PairSeparator,
    NoInput,
    InvalidNumber,
    InvalidString,
    Invalid,
}

#[inline]
fn is<C: CodeUnit>(c: C, ch: u8) -> bool {
    c.value() == ch as u16
}

#[inline]
fn is_digit<C: CodeUnit>(c: C) -> bool {
    (0x30..=0x39).contains(&c.value())
}

fn is_whitespace<C: CodeUnit>(c: C) -> bool {
    matches!(c.value(), 0x20 | 0x09 | 0x0a | 0x0b | 0x0c | 0x0d)
}

/// Skips a `//` or `/*` comment starting at `start`; `None` if there is
/// no comment there or a block comment never closes.
fn skip_comment<C: CodeUnit>(s: &[C], start: usize) -> Option<usize> {
    if start + 1 >= s.len() || !is(s[start], b'/') {
        return None;
    }
    let mut i = start + 1;
    if is(s[i], b'/') {
        i += 1;
        while i < s.len() {
            if is(s[i], b'\n') || is(s[i], b'\r') {
                return Some(i + 1);
            }
            i += 1;
        }
        // A line comment may run to end of input.
        return Some(s.len());
    }
    if is(s[i], b'*') {
        i += 1;
        let mut prev_star = false;
        while i < s.len() {
            if prev_star && is(s[i], b'/') {
                return Some(i + 1);
            }
            prev_star = is(s[i], b'*');
            i += 1;
        }
        return None;
    }
    None
}

fn skip_whitespace_and_comments<C: CodeUnit>(s: &[C], start: usize) -> usize {
    let mut i = start;
    while i < s.len() {
        if is_whitespace(s[i]) {
            i += 1;
        } else if is(s[i], b'/') {
            match skip_comment(s, i) {
                Some(end) => i = end,
                None => break,
            }
        } else {
            break;
        }
    }
    i
}

fn parse_const_token<C: CodeUnit>(s: &[C], start: usize, literal: &[u8]) -> Option<usize> {
    let end = start + literal.len();
    if end > s.len() {
        return None;
    }
    for (c, &ch) in s[start..end].iter().zip(literal) {
        if !is(*c, ch) {
            return None;
        }
    }
    Some(end)
}

fn read_int<C: CodeUnit>(s: &[C], start: usize, allow_leading_zeros: bool) -> Option<usize> {
    let mut i = start;
    while i < s.len() && is_digit(s[i]) {
        i += 1;
    }
    let length = i - start;
    if length == 0 {
        return None;
    }
    if !allow_leading_zeros && length > 1 && is(s[start], b'0') {
        return None;
    }
    Some(i)
}

/// Scans `[-] int [frac] [exp]`, with no leading zeros in the integer
/// part. Returns the index just past the token.
fn parse_number_token<C: CodeUnit>(s: &[C], start: usize) -> Option<usize> {
    let mut i = start;
    if i < s.len() && is(s[i], b'-') {
        i += 1;
    }
    i = read_int(s, i, false)?;
    if i == s.len() {
        return Some(i);
    }

    if is(s[i], b'.') {
        i = read_int(s, i + 1, true)?;
        if i == s.len() {
            return Some(i);
        }
    }

    if is(s[i], b'e') || is(s[i], b'E') {
        i += 1;
        if i == s.len() {
            return None;
        }
        if is(s[i], b'-') || is(s[i], b'+') {
            i += 1;
        }
        i = read_int(s, i, true)?;
    }
    Some(i)
}

fn read_hex_digits<C: CodeUnit>(s: &[C], start: usize, digits: usize) -> Option<usize> {
    let end = start + digits;
    if end > s.len() {
        return None;
    }
    for c in &s[start..end] {
        hex_value(*c)?;
    }
    Some(end)
}

fn hex_value<C: CodeUnit>(c: C) -> Option<u16> {
    match c.value() {
        v @ 0x30..=0x39 => Some(v - 0x30),
        v @ 0x41..=0x46 => Some(v - 0x41 + 10),
        v @ 0x61..=0x66 => Some(v - 0x61 + 10),
        _ => None,
    }
}

/// Scans a quoted string starting just after the opening quote,
/// validating escape shapes. Returns the index just past the closing
/// quote.
fn parse_string_token<C: CodeUnit>(s: &[C], start: usize) -> Option<usize> {
    let mut i = start;
    while i < s.len() {
        let c = s[i];
        i += 1;
        if is(c, b'\\') {
            if i == s.len() {
                return None;
            }
            let escaped = s[i];
            i += 1;
            if is(escaped, b'x') {
                i = read_hex_digits(s, i, 2)?;
            } else if is(escaped, b'u') {
                i = read_hex_digits(s, i, 4)?;
            } else if !(is(escaped, b'\\')
                || is(escaped, b'/')
                || is(escaped, b'b')
                || is(escaped, b'f')
                || is(escaped, b'n')
                || is(escaped, b'r')
                || is(escaped, b't')
                || is(escaped, b'v')
                || is(escaped, b'"'))
            {
                return None;
            }
        } else if is(c, b'"') {
            return Some(i);
        }
    }
    None
}

/// Reads one token after skipping whitespace and comments. Returns the
/// token kind, the index of its first code unit, and the index just
/// past it.
fn parse_token<C: CodeUnit>(s: &[C], start: usize) -> (Token, usize, usize) {
    let token_start = skip_whitespace_and_comments(s, start);
    if token_start == s.len() {
        return (Token::NoInput, token_start, token_start);
    }
    let c = s[token_start];
    let one_past = token_start + 1;
    if is(c, b'n') {
        if let Some(end) = parse_const_token(s, token_start, b"null") {
            return (Token::NullLiteral, token_start, end);
        }
    } else if is(c, b't') {
        if let Some(end) = parse_const_token(s, token_start, b"true") {
            return (Token::BoolTrue, token_start, end);
        }
    } else if is(c, b'f') {
        if let Some(end) = parse_const_token(s, token_start, b"false") {
            return (Token::BoolFalse, token_start, end);
        }
    } else if is(c, b'{') {
        return (Token::ObjectBegin, token_start, one_past);
    } else if is(c, b'}') {
        return (Token::ObjectEnd, token_start, one_past);
    } else if is(c, b'[') {
        return (Token::ArrayBegin, token_start, one_past);
    } else if is(c, b']') {
        return (Token::ArrayEnd, token_start, one_past);
    } else if is(c, b',') {
        return (Token::ListSeparator, token_start, one_past);
    } else if is(c, b':') {
        return (Token::PairSeparator, token_start, one_past);
    } else if is(c, b'-') || is_digit(c) {
        return match parse_number_token(s, token_start) {
            Some(end) => (Token::Number, token_start, end),
            None => (Token::InvalidNumber, token_start, token_start),
        };
    } else if is(c, b'"') {
        return match parse_string_token(s, one_past) {
            Some(end) => (Token::StringLiteral, token_start, end),
            None => (Token::InvalidString, token_start, token_start),
        };
    }
    (Token::Invalid, token_start, token_start)
}

/// Decodes the contents of a lexed string token (the code units between
/// the quotes) into UTF-16. `\uXXXX` is taken verbatim as one code
/// unit, so surrogate halves survive unpaired; `\xXX` is rejected.
fn decode_string<C: CodeUnit>(s: &[C]) -> Option<Vec<u16>> {
    let mut out = Vec::with_capacity(s.len());
    let mut i = 0;
    while i < s.len() {
        let c = s[i].value();
        i += 1;
        if c != b'\\' as u16 {
            out.push(c);
            continue;
        }
        let escaped = s.get(i)?.value();
        i += 1;
        let decoded = match u8::try_from(escaped).unwrap_or(0) {
            b'x' => return None,
            b'"' | b'/' | b'\\' => escaped,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => 0x0a,
            b'r' => 0x0d,
            b't' => 0x09,
            b'v' => 0x0b,
            b'u' => {
                if i + 4 > s.len() {
                    return None;
                }
                let value = (hex_value(s[i])? << 12)
                    | (hex_value(s[i + 1])? << 8)
                    | (hex_value(s[i + 2])? << 4)
                    | hex_value(s[i + 3])?;
                i += 4;
                value
            }
            _ => return None,
        };
        out.push(decoded);
    }
    Some(out)
}

/// Collects a number token into ASCII and converts it through the host.
/// Non-ASCII code units inside the token are rejected.
fn chars_to_double<C: CodeUnit>(deps: &dyn SystemDeps, s: &[C]) -> Option<f64> {
    let mut ascii = Vec::with_capacity(s.len());
    for c in s {
        let v = c.value();
        if v & !0x7f != 0 {
            return None;
        }
        ascii.push(v as u8);
    }
    deps.parse_double(&ascii)
}

/// Marker that the error event has been delivered; unwinds the descent.
struct Stop;

struct JsonParser<'a> {
    deps: &'a dyn SystemDeps,
    sink: &'a mut dyn EventSink,
}

impl JsonParser<'_> {
    fn parse<C: CodeUnit>(&mut self, s: &[C]) {
        if let Ok(end) = self.parse_value(s, 0, 0) {
            if end != s.len() {
                self.fail_at::<C>(ErrorKind::JsonUnprocessedInputRemains, end);
            }
        }
    }

    fn fail_at<C: CodeUnit>(&mut self, kind: ErrorKind, index: usize) -> Stop {
        self.sink.error(Status::at(kind, (index * C::WIDTH) as i64));
        Stop
    }

    /// Parses one value starting at `start`. Returns the index just past
    /// the value and any trailing whitespace or comments.
    fn parse_value<C: CodeUnit>(&mut self, s: &[C], start: usize, depth: usize) -> Result<usize, Stop> {
        if depth > STACK_LIMIT {
            return Err(self.fail_at::<C>(ErrorKind::JsonStackLimitExceeded, start));
        }
        let (token, token_start, token_end) = parse_token(s, start);
        match token {
            Token::NoInput => {
                return Err(self.fail_at::<C>(ErrorKind::JsonNoInput, token_start));
            }
            Token::Invalid => {
                return Err(self.fail_at::<C>(ErrorKind::JsonInvalidToken, token_start));
            }
            Token::InvalidNumber => {
                return Err(self.fail_at::<C>(ErrorKind::JsonInvalidNumber, token_start));
            }
            Token::InvalidString => {
                return Err(self.fail_at::<C>(ErrorKind::JsonInvalidString, token_start));
            }
            Token::NullLiteral => self.sink.null(),
            Token::BoolTrue => self.sink.boolean(true),
            Token::BoolFalse => self.sink.boolean(false),
            Token::Number => {
                let Some(value) = chars_to_double(self.deps, &s[token_start..token_end]) else {
                    return Err(self.fail_at::<C>(ErrorKind::JsonInvalidNumber, token_start));
                };
                if value >= i32::MIN as f64 && value <= i32::MAX as f64 && (value as i32) as f64 == value
                {
                    self.sink.int(value as i32);
                } else {
                    self.sink.double(value);
                }
            }
            Token::StringLiteral => {
                let Some(chars) = decode_string(&s[token_start + 1..token_end - 1]) else {
                    return Err(self.fail_at::<C>(ErrorKind::JsonInvalidString, token_start));
                };
                self.sink.string(chars);
            }
            Token::ArrayBegin => {
                let end = self.parse_array(s, token_end, depth)?;
                return Ok(skip_whitespace_and_comments(s, end));
            }
            Token::ObjectBegin => {
                let end = self.parse_object(s, token_end, depth)?;
                return Ok(skip_whitespace_and_comments(s, end));
            }
            Token::ObjectEnd | Token::ArrayEnd | Token::ListSeparator | Token::PairSeparator => {
                return Err(self.fail_at::<C>(ErrorKind::JsonValueExpected, token_start));
            }
        }
        Ok(skip_whitespace_and_comments(s, token_end))
    }

    /// Parses array elements after the opening bracket. Returns the
    /// index just past the closing bracket.
    fn parse_array<C: CodeUnit>(&mut self, s: &[C], after_open: usize, depth: usize) -> Result<usize, Stop> {
        self.sink.array_begin();
        let mut start = after_open;
        loop {
            let (token, _, token_end) = parse_token(s, start);
            if token == Token::ArrayEnd {
                self.sink.array_end();
                return Ok(token_end);
            }
            start = self.parse_value(s, start, depth + 1)?;

            // After an element: a comma continues the array, the closing
            // bracket ends it. A comma directly before the bracket is a
            // trailing comma, which is an error.
            let (token, token_start, token_end) = parse_token(s, start);
            if token == Token::ListSeparator {
                start = token_end;
                let (token, token_start, _) = parse_token(s, start);
                if token == Token::ArrayEnd {
                    return Err(self.fail_at::<C>(ErrorKind::JsonUnexpectedArrayEnd, token_start));
                }
            } else if token == Token::ArrayEnd {
                self.sink.array_end();
                return Ok(token_end);
            } else {
                return Err(
                    self.fail_at::<C>(ErrorKind::JsonCommaOrArrayEndExpected, token_start)
                );
            }
        }
    }

    /// Parses key/value pairs after the opening brace. Returns the index
    /// just past the closing brace.
    fn parse_object<C: CodeUnit>(&mut self, s: &[C], after_open: usize, depth: usize) -> Result<usize, Stop> {
        self.sink.object_begin();
        let mut start = after_open;
        loop {
            let (token, token_start, token_end) = parse_token(s, start);
            if token == Token::ObjectEnd {
                self.sink.object_end();
                return Ok(token_end);
            }
            if token != Token::StringLiteral {
                return Err(self.fail_at::<C>(ErrorKind::JsonStringLiteralExpected, token_start));
            }
            let Some(key) = decode_string(&s[token_start + 1..token_end - 1]) else {
                return Err(self.fail_at::<C>(ErrorKind::JsonInvalidString, token_start));
            };
            self.sink.string(key);
            start = token_end;

            let (token, token_start, token_end) = parse_token(s, start);
            if token != Token::PairSeparator {
                return Err(self.fail_at::<C>(ErrorKind::JsonColonExpected, token_start));
            }
            start = token_end;

            start = self.parse_value(s, start, depth + 1)?;

            let (token, token_start, token_end) = parse_token(s, start);
            if token == Token::ListSeparator {
                start = token_end;
                let (token, token_start, _) = parse_token(s, start);
                if token == Token::ObjectEnd {
                    return Err(self.fail_at::<C>(ErrorKind::JsonUnexpectedObjectEnd, token_start));
                }
            } else if token == Token::ObjectEnd {
                self.sink.object_end();
                return Ok(token_end);
            } else {
                return Err(
                    self.fail_at::<C>(ErrorKind::JsonCommaOrObjectEndExpected, token_start)
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_punctuators_and_literals() {
        let s = b" \t{}[],:null true false".as_slice();
        let mut at = 0;
        let mut tokens = Vec::new();
        loop {
            let (token, _, end) = parse_token(s, at);
            if token == Token::NoInput {
                break;
            }
            tokens.push(token);
            at = end;
        }
        assert_eq!(
            tokens,
            [
                Token::ObjectBegin,
                Token::ObjectEnd,
                Token::ArrayBegin,
                Token::ArrayEnd,
                Token::ListSeparator,
                Token::PairSeparator,
                Token::NullLiteral,
                Token::BoolTrue,
                Token::BoolFalse,
            ]
        );
    }

    #[test]
    fn number_token_grammar() {
        for ok in ["0", "-0", "7", "123", "1.5", "0.25", "-1e9", "31415e-4", "2E+1", "1.0e0"] {
            let s = ok.as_bytes();
            assert_eq!(parse_number_token(s, 0), Some(s.len()), "{ok}");
        }
        for bad in ["01", "-", "1.", ".5x", "1e", "1e+", "-a"] {
            let s = bad.as_bytes();
            let (token, _, _) = parse_token(s, 0);
            assert_ne!(token, Token::Number, "{bad}");
        }
    }

    #[test]
    fn string_token_accepts_hex_escapes_decoder_rejects_x() {
        // The lexer admits \xXX, the decoder does not.
        let s = br#""a\x41b""#.as_slice();
        let (token, start, end) = parse_token(s, 0);
        assert_eq!(token, Token::StringLiteral);
        assert_eq!(decode_string(&s[start + 1..end - 1]), None);
    }

    #[test]
    fn decode_string_escapes() {
        let s = br#"\"\/\\\b\f\n\r\t\v\u12ab"#.as_slice();
        assert_eq!(
            decode_string(s),
            Some(vec![
                0x22, 0x2f, 0x5c, 0x08, 0x0c, 0x0a, 0x0d, 0x09, 0x0b, 0x12ab
            ])
        );
    }

    #[test]
    fn unterminated_block_comment_is_not_whitespace() {
        let s = b"/* never closed".as_slice();
        assert_eq!(skip_whitespace_and_comments(s, 0), 0);
        let s = b"/**/ 1".as_slice();
        assert_eq!(skip_whitespace_and_comments(s, 0), 5);
        let s = b"// to eol\n1".as_slice();
        assert_eq!(skip_whitespace_and_comments(s, 0), 10);
    }
}
