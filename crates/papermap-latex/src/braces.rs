//! Balanced-delimiter extraction
//!
//! A regex such as `\\title\{([^}]+)\}` stops at the first closing brace and
//! silently truncates arguments like `\title{Study of {X} and {Y}}`. These
//! helpers walk the bytes instead, tracking nesting depth.
//!
//! Delimiters are ASCII, so byte positions are always char boundaries.

/// Extract the text between the delimiter at `open_pos` and its matching
/// closing delimiter, skipping nested pairs of the same kind.
///
/// A backslash escapes the following byte, so `\{` and `\}` never count.
/// Returns the inner slice and the position just past the closing delimiter,
/// or `None` if `open_pos` does not point at `open` or the construct is
/// unterminated.
#[must_use]
pub fn extract_delimited(
    source: &str,
    open_pos: usize,
    open: u8,
    close: u8,
) -> Option<(&str, usize)> {
    let bytes = source.as_bytes();
    if bytes.get(open_pos) != Some(&open) {
        return None;
    }

    let mut depth = 0usize;
    let mut escaped = false;
    for (i, &byte) in bytes.iter().enumerate().skip(open_pos) {
        if escaped {
            escaped = false;
            continue;
        }
        if byte == b'\\' {
            escaped = true;
        } else if byte == open {
            depth += 1;
        } else if byte == close {
            depth -= 1;
            if depth == 0 {
                return Some((&source[open_pos + 1..i], i + 1));
            }
        }
    }

    None // Unterminated
}

/// Brace-specific form of [`extract_delimited`].
#[inline]
#[must_use]
pub fn extract_braced_arg(source: &str, open_pos: usize) -> Option<(&str, usize)> {
    extract_delimited(source, open_pos, b'{', b'}')
}

/// Position of the first `{` at or after `pos`, skipping whitespace and any
/// number of `[...]` optional arguments. Returns `None` if anything else
/// comes first.
#[must_use]
pub fn skip_to_required_arg(source: &str, mut pos: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        match bytes.get(pos)? {
            b'{' => return Some(pos),
            b'[' => {
                let (_, next) = extract_delimited(source, pos, b'[', b']')?;
                pos = next;
            }
            _ => return None,
        }
    }
}

/// Rewrite every `\name{arg}` (for any `name` in `commands`) with
/// `render(name, arg)`, honoring nested braces in `arg`.
///
/// Occurrences whose argument is missing or unterminated are kept verbatim.
/// The argument is handed over raw; callers re-run their own cleaning on it.
pub fn replace_command_args<F>(source: &str, commands: &[&str], mut render: F) -> String
where
    F: FnMut(&str, &str) -> String,
{
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    let bytes = source.as_bytes();

    while let Some(rel) = source[cursor..].find('\\') {
        let start = cursor + rel;
        let name_start = start + 1;
        let name_end = bytes[name_start..]
            .iter()
            .position(|b| !b.is_ascii_alphabetic())
            .map_or(bytes.len(), |n| name_start + n);
        let name = &source[name_start..name_end];

        let replaced = if commands.contains(&name) {
            skip_to_required_arg(source, name_end)
                .and_then(|open| extract_braced_arg(source, open))
                .map(|(arg, next)| (render(name, arg), next))
        } else {
            None
        };

        match replaced {
            Some((text, next)) => {
                out.push_str(&source[cursor..start]);
                out.push_str(&text);
                cursor = next;
            }
            None => {
                // Copy the backslash (and an escaped byte, if any) unchanged.
                let step = if name_end > name_start {
                    name_end
                } else {
                    (name_start + 1).min(bytes.len())
                };
                let step = next_char_boundary(source, step);
                out.push_str(&source[cursor..step]);
                cursor = step;
            }
        }
    }

    out.push_str(&source[cursor..]);
    out
}

fn next_char_boundary(source: &str, mut pos: usize) -> usize {
    while pos < source.len() && !source.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}
