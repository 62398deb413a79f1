//! Text helpers shared by every format-specific normalizer
//!
//! All functions are pure and total: unexpected input is passed through as
//! literal text instead of failing.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Marker appended to truncated excerpts.
pub const ELLIPSIS: &str = "...";

/// Displayed characters kept in a section excerpt before [`ELLIPSIS`].
pub const DEFAULT_EXCERPT_CHARS: usize = 150;

static RE_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,31});")
        .expect("valid entity regex")
});

/// Collapse every run of whitespace to a single space and trim both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters, appending [`ELLIPSIS`] when
/// anything was cut. Counts characters, never splits a code point.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` for safe embedding in HTML.
///
/// Must run exactly once, after every other rewrite.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(ch),
        }
    }
    result
}

/// Decode named and numeric HTML character references.
///
/// Unknown names and invalid code points are left untouched.
#[must_use]
pub fn decode_html_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    RE_ENTITY
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(num) = body.strip_prefix('#') {
                let code = match num.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse::<u32>().ok(),
                };
                code.and_then(char::from_u32).map(String::from)
            } else {
                named_entity(body).map(String::from)
            };
            decoded.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<&'static str> {
    let value = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" | "ensp" | "emsp" | "thinsp" => " ",
        "shy" | "zwj" | "zwnj" => "",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201C}",
        "rdquo" => "\u{201D}",
        "laquo" => "\u{00AB}",
        "raquo" => "\u{00BB}",
        "copy" => "\u{00A9}",
        "reg" => "\u{00AE}",
        "trade" => "\u{2122}",
        "times" => "\u{00D7}",
        "divide" => "\u{00F7}",
        "plusmn" => "\u{00B1}",
        "middot" => "\u{00B7}",
        "bull" => "\u{2022}",
        "deg" => "\u{00B0}",
        "sect" => "\u{00A7}",
        "para" => "\u{00B6}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "asymp" => "\u{2248}",
        "infin" => "\u{221E}",
        "alpha" => "\u{03B1}",
        "beta" => "\u{03B2}",
        "gamma" => "\u{03B3}",
        "delta" => "\u{03B4}",
        "epsilon" => "\u{03B5}",
        "lambda" => "\u{03BB}",
        "mu" => "\u{03BC}",
        "pi" => "\u{03C0}",
        "sigma" => "\u{03C3}",
        "theta" => "\u{03B8}",
        _ => return None,
    };
    Some(value)
}

/// Slice at most `len` bytes of `source` starting at `start`, shrinking the
/// end to the nearest character boundary.
///
/// Out-of-range starts yield an empty slice.
#[must_use]
pub fn raw_window(source: &str, start: usize, len: usize) -> &str {
    if start >= source.len() || !source.is_char_boundary(start) {
        return "";
    }
    let mut end = start.saturating_add(len).min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    &source[start..end]
}

/// Final stage shared by every normalizer: collapse whitespace, apply the
/// optional character budget, then HTML-escape.
#[must_use]
pub fn finish_plain_text(text: &str, max_chars: Option<usize>) -> String {
    let collapsed = collapse_whitespace(text);
    let bounded = match max_chars {
        Some(max) => truncate_chars(&collapsed, max),
        None => collapsed,
    };
    escape_html(&bounded)
}
