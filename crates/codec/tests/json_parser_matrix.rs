use devwire_codec::{parse_json, ErrorKind, Event, StdSystemDeps};

fn utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

fn events_of(json: &str) -> Vec<Event> {
    let mut events = Vec::new();
    parse_json(&StdSystemDeps, json.as_bytes(), &mut events);
    events
}

fn events_of_utf16(json: &str) -> Vec<Event> {
    let mut events = Vec::new();
    let units = utf16(json);
    parse_json(&StdSystemDeps, &units, &mut events);
    events
}

fn error_of(json: &str) -> (ErrorKind, i64) {
    match events_of(json).last() {
        Some(Event::Error(status)) => (status.error, status.pos),
        other => panic!("expected a terminal error for {json:?}, got {other:?}"),
    }
}

#[test]
fn simple_dictionary() {
    assert_eq!(
        events_of(r#"{"foo": 42}"#),
        [
            Event::ObjectBegin,
            Event::String(utf16("foo")),
            Event::Int(42),
            Event::ObjectEnd,
        ]
    );
}

#[test]
fn nested_dictionary() {
    assert_eq!(
        events_of(r#"{"foo": {"bar": {"baz": 1}, "bar2": 2}}"#),
        [
            Event::ObjectBegin,
            Event::String(utf16("foo")),
            Event::ObjectBegin,
            Event::String(utf16("bar")),
            Event::ObjectBegin,
            Event::String(utf16("baz")),
            Event::Int(1),
            Event::ObjectEnd,
            Event::String(utf16("bar2")),
            Event::Int(2),
            Event::ObjectEnd,
            Event::ObjectEnd,
        ]
    );
}

#[test]
fn doubles_in_plain_and_scientific_notation() {
    assert_eq!(
        events_of(r#"{"foo": 3.1415, "bar": 31415e-4}"#),
        [
            Event::ObjectBegin,
            Event::String(utf16("foo")),
            Event::Double(3.1415),
            Event::String(utf16("bar")),
            Event::Double(3.1415),
            Event::ObjectEnd,
        ]
    );
}

#[test]
fn int_versus_double_split_on_the_i32_range() {
    let cases = [
        ("0", Event::Int(0)),
        ("-0", Event::Int(0)),
        ("1e2", Event::Int(100)),
        ("2147483647", Event::Int(i32::MAX)),
        ("-2147483648", Event::Int(i32::MIN)),
        ("2147483648", Event::Double(2147483648.0)),
        ("-2147483649", Event::Double(-2147483649.0)),
        ("0.5", Event::Double(0.5)),
    ];
    for (json, expected) in cases {
        assert_eq!(events_of(json), [expected.clone()], "{json}");
    }
}

#[test]
fn unicode_escapes_decode_to_verbatim_code_units() {
    // Globe emoji: a surrogate pair, kept as two units.
    assert_eq!(
        events_of(r#"{"msg": "Hello, \uD83C\uDF0E."}"#),
        [
            Event::ObjectBegin,
            Event::String(utf16("msg")),
            Event::String(utf16("Hello, \u{1F30E}.")),
            Event::ObjectEnd,
        ]
    );
    // An unpaired half survives too.
    assert_eq!(events_of(r#""\uD800""#), [Event::String(vec![0xd800])]);
}

#[test]
fn non_ascii_bytes_zero_extend_into_the_payload() {
    assert_eq!(
        events_of("\"caf\u{e9}\""),
        [Event::String(vec![b'c' as u16, b'a' as u16, b'f' as u16, 0xc3, 0xa9])]
    );
    assert_eq!(
        events_of_utf16("\"caf\u{e9}\""),
        [Event::String(vec![b'c' as u16, b'a' as u16, b'f' as u16, 0xe9])]
    );
}

#[test]
fn comments_and_odd_whitespace_between_tokens() {
    assert_eq!(
        events_of("/* leading */[1, // rest of line\n 2]\t\x0b\x0c"),
        [
            Event::ArrayBegin,
            Event::Int(1),
            Event::Int(2),
            Event::ArrayEnd,
        ]
    );
    assert_eq!(events_of("42 // trailing comment"), [Event::Int(42)]);
}

#[test]
fn eight_and_sixteen_bit_inputs_agree() {
    let inputs = [
        r#"{"foo": 42}"#,
        r#"[null, true, false, "x", -7, 0.25]"#,
        r#"{"a": {"b": []}}"#,
        r#""esc \" \\ \/ \b \f \n \r \t \v""#,
    ];
    for json in inputs {
        assert_eq!(events_of(json), events_of_utf16(json), "{json}");
    }
}

#[test]
fn error_kinds_and_positions() {
    let cases: [(&str, ErrorKind, i64); 22] = [
        ("", ErrorKind::JsonNoInput, 0),
        ("   ", ErrorKind::JsonNoInput, 3),
        ("01", ErrorKind::JsonInvalidNumber, 0),
        ("1e999", ErrorKind::JsonInvalidNumber, 0),
        ("\"abc", ErrorKind::JsonInvalidString, 0),
        ("\"a\\x41\"", ErrorKind::JsonInvalidString, 0),
        ("[\"\\q\"]", ErrorKind::JsonInvalidString, 1),
        ("nul", ErrorKind::JsonInvalidToken, 0),
        ("/*", ErrorKind::JsonInvalidToken, 0),
        (",", ErrorKind::JsonValueExpected, 0),
        ("[}", ErrorKind::JsonValueExpected, 1),
        ("{\"a\":}", ErrorKind::JsonValueExpected, 5),
        ("[", ErrorKind::JsonNoInput, 1),
        ("[1", ErrorKind::JsonCommaOrArrayEndExpected, 2),
        ("[1 2]", ErrorKind::JsonCommaOrArrayEndExpected, 3),
        ("[1,]", ErrorKind::JsonUnexpectedArrayEnd, 3),
        ("{", ErrorKind::JsonStringLiteralExpected, 1),
        ("{1:2}", ErrorKind::JsonStringLiteralExpected, 1),
        ("{\"a\" 1}", ErrorKind::JsonColonExpected, 5),
        ("{\"a\":1:", ErrorKind::JsonCommaOrObjectEndExpected, 6),
        ("{\"a\":1,}", ErrorKind::JsonUnexpectedObjectEnd, 7),
        ("42 x", ErrorKind::JsonUnprocessedInputRemains, 3),
    ];
    for (json, kind, pos) in cases {
        assert_eq!(error_of(json), (kind, pos), "{json:?}");
    }
}

#[test]
fn events_before_the_error_are_still_delivered() {
    // The key and first value land before the malformed second key.
    let events = events_of(r#"{"foo": 3.1415, "bar: 31415e-4}"#);
    assert_eq!(events.len(), 4);
    assert_eq!(events[0], Event::ObjectBegin);
    assert_eq!(events[1], Event::String(utf16("foo")));
    assert_eq!(events[2], Event::Double(3.1415));
    let Some(Event::Error(status)) = events.last() else {
        panic!("expected terminal error, got {:?}", events[3]);
    };
    assert_eq!(status.error, ErrorKind::JsonStringLiteralExpected);
    assert_eq!(status.pos, 16);
}

#[test]
fn mismatched_separator_between_pairs() {
    let events = events_of(r#"{"foo": 3.1415: "bar": 0}"#);
    let Some(Event::Error(status)) = events.last() else {
        panic!("expected terminal error");
    };
    assert_eq!(status.error, ErrorKind::JsonCommaOrObjectEndExpected);
    assert_eq!(status.pos, 14);
}

#[test]
fn sixteen_bit_positions_are_byte_offsets() {
    let units = utf16("{\"a\":1:");
    let mut events = Vec::new();
    parse_json(&StdSystemDeps, &units, &mut events);
    let Some(Event::Error(status)) = events.last() else {
        panic!("expected terminal error");
    };
    assert_eq!(status.error, ErrorKind::JsonCommaOrObjectEndExpected);
    assert_eq!(status.pos, 12);
}

#[test]
fn nesting_beyond_the_stack_limit() {
    let mut deep = String::new();
    for _ in 0..1100 {
        deep.push('[');
    }
    let events = events_of(&deep);
    let Some(Event::Error(status)) = events.last() else {
        panic!("expected terminal error");
    };
    assert_eq!(status.error, ErrorKind::JsonStackLimitExceeded);

    // Just inside the limit parses fine.
    let nested = format!("{}1{}", "[".repeat(900), "]".repeat(900));
    let events = events_of(&nested);
    assert_eq!(events.len(), 1801);
    assert!(!matches!(events.last(), Some(Event::Error(_))));
}

#[test]
fn exactly_one_error_event_per_parse() {
    for json in ["", "[1,", "{\"a\"", "[[[", "01", "\"", "[1}]", "{\"a\":1}}"] {
        let errors = events_of(json)
            .iter()
            .filter(|event| matches!(event, Event::Error(_)))
            .count();
        assert_eq!(errors, 1, "{json:?}");
    }
}
