//! Flat JSON codec for CREOSON envelopes.
//!
//! CREOSON exchanges shallow JSON objects: one level of keys, with at most
//! one nested object per value (`status`, `data`). This codec covers exactly
//! that shape and nothing more. It is not a general-purpose JSON parser:
//! arrays are unsupported, numeric edge cases beyond `i64`/`f64` are not
//! handled, and Unicode escapes pass through verbatim.
//!
//! Decoding is permissive by contract: unrecognized input degrades to raw
//! string values rather than failing, matching the bridge's tolerance for
//! extra response fields.

use crate::models::{Params, Value};

/// Encodes a map as a JSON object string, preserving insertion order.
///
/// String values are escaped for backslash, double quote, newline, carriage
/// return, and tab. Booleans and numbers use their literal textual form,
/// nested maps encode recursively.
pub fn encode(map: &Params) -> String {
    let mut out = String::from("{");
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        out.push_str(&escape(key));
        out.push_str("\":");
        write_value(&mut out, value);
    }
    out.push('}');
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Float(x) => out.push_str(&format_float(*x)),
        Value::Str(s) => {
            out.push('"');
            out.push_str(&escape(s));
            out.push('"');
        }
        Value::Object(map) => out.push_str(&encode(map)),
    }
}

/// Whole floats keep a trailing `.0` so the decoder classifies them back as
/// floats instead of integers.
fn format_float(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            // Unknown escape: keep both characters verbatim.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Decodes a JSON object string into a map.
///
/// Strips one leading `{` and trailing `}`, splits the body on top-level
/// commas, then splits each pair on the first top-level colon. Keys have
/// surrounding quotes stripped. Values are classified as boolean, null,
/// nested object, quoted string, integer, float, or raw string, in that
/// order. The splitter tracks quote state and brace depth, so nested
/// objects containing commas decode intact.
pub fn decode(json: &str) -> Params {
    let body = json.trim();
    let body = body.strip_prefix('{').unwrap_or(body);
    let body = body.strip_suffix('}').unwrap_or(body);

    let mut map = Params::new();
    for pair in split_top_level(body, ',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let Some((raw_key, raw_value)) = split_first_top_level(pair, ':') else {
            continue;
        };
        let key = strip_quotes(raw_key.trim());
        map.insert(key, parse_value(raw_value.trim()));
    }
    map
}

fn parse_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }
    if raw.starts_with('{') {
        return Value::Object(decode(raw));
    }
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Value::Str(unescape(&raw[1..raw.len() - 1]));
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Int(n);
    }
    if let Ok(x) = raw.parse::<f64>() {
        return Value::Float(x);
    }
    Value::Str(raw.to_string())
}

fn strip_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Splits `body` on every occurrence of `sep` that is outside quotes and at
/// brace depth zero. Separators are all ASCII, so slicing at their byte
/// offsets is safe.
fn split_top_level(body: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => depth = depth.saturating_sub(1),
            c if c == sep && !in_string && depth == 0 => {
                parts.push(&body[start..i]);
                start = i + sep.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

/// Splits on the first top-level occurrence of `sep`, or `None` if absent.
fn split_first_top_level(body: &str, sep: char) -> Option<(&str, &str)> {
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            c if c == sep && !in_string => {
                return Some((&body[..i], &body[i + sep.len_utf8()..]));
            }
            _ => {}
        }
    }
    None
}
