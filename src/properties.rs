//! Parser for the flat `key=value` properties format.
//!
//! The grammar is the conventional one for `.properties`-style files:
//!
//! - Natural lines end at `\n`, `\r` or `\r\n`.
//! - Leading blanks (space, tab, form feed) are skipped. A line whose first
//!   non-blank character is `#` or `!` is a comment.
//! - The key runs up to the first unescaped `=`, `:` or blank. Blanks around
//!   the separator are skipped, and at most one `=`/`:` is consumed.
//! - A line ending in an odd number of backslashes continues onto the next
//!   natural line, whose leading blanks are dropped.
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` are escapes; any other `\c` stands
//!   for `c`.
//!
//! Config files are not handed to [`parse_properties`] verbatim: the loader
//! runs them through [`escape_backslashes`] first so that every backslash in
//! a file survives as a literal character (see [`resolve`](crate::resolve)).

use thiserror::Error;

/// A line of properties text that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    /// 1-based line on which the offending logical line starts.
    pub line: usize,
    pub message: String,
}

impl SyntaxError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

const BLANKS: [char; 3] = [' ', '\t', '\u{000C}'];

fn is_blank(c: char) -> bool {
    BLANKS.contains(&c)
}

/// Double every backslash so the properties grammar reads each one literally.
pub fn escape_backslashes(text: &str) -> String {
    text.replace('\\', "\\\\")
}

/// Parse properties text into `(key, value)` pairs in order of appearance.
///
/// Duplicate keys are all returned; callers inserting into a map get
/// last-one-wins behavior.
pub fn parse_properties(text: &str) -> Result<Vec<(String, String)>, SyntaxError> {
    let mut entries = Vec::new();
    let mut lines = natural_lines(text).into_iter().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let trimmed = raw.trim_start_matches(BLANKS);
        if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
            continue;
        }

        let line_no = idx + 1;
        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(BLANKS)),
                None => break,
            }
        }

        entries.push(split_entry(&logical, line_no)?);
    }

    Ok(entries)
}

/// Split text into natural lines, accepting `\n`, `\r` and `\r\n` endings.
fn natural_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    trailing % 2 == 1
}

/// Split one logical line into its unescaped key and value.
fn split_entry(line: &str, line_no: usize) -> Result<(String, String), SyntaxError> {
    let chars: Vec<char> = line.chars().collect();

    let mut key_end = 0;
    let mut escaped = false;
    while key_end < chars.len() {
        let c = chars[key_end];
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            break;
        }
        key_end += 1;
    }

    let mut value_start = key_end;
    while value_start < chars.len() && is_blank(chars[value_start]) {
        value_start += 1;
    }
    if value_start < chars.len() && matches!(chars[value_start], '=' | ':') {
        value_start += 1;
        while value_start < chars.len() && is_blank(chars[value_start]) {
            value_start += 1;
        }
    }

    let key = unescape(&chars[..key_end], line_no)?;
    let value = unescape(&chars[value_start..], line_no)?;
    Ok((key, value))
}

/// Resolve backslash escapes. Consecutive `\uXXXX` escapes are decoded as
/// UTF-16, so surrogate pairs combine into one character.
fn unescape(chars: &[char], line_no: usize) -> Result<String, SyntaxError> {
    let mut out = String::with_capacity(chars.len());
    let mut utf16: Vec<u16> = Vec::new();
    let mut it = chars.iter().copied();

    while let Some(c) = it.next() {
        if c != '\\' {
            flush_utf16(&mut utf16, &mut out);
            out.push(c);
            continue;
        }
        match it.next() {
            Some('u') => {
                let mut unit: u16 = 0;
                for _ in 0..4 {
                    let digit = it
                        .next()
                        .and_then(|d| d.to_digit(16))
                        .ok_or_else(|| SyntaxError::new(line_no, "malformed \\uxxxx encoding"))?;
                    unit = (unit << 4) | digit as u16;
                }
                utf16.push(unit);
            }
            Some(other) => {
                flush_utf16(&mut utf16, &mut out);
                out.push(match other {
                    't' => '\t',
                    'n' => '\n',
                    'r' => '\r',
                    'f' => '\u{000C}',
                    c => c,
                });
            }
            None => {}
        }
    }
    flush_utf16(&mut utf16, &mut out);
    Ok(out)
}

fn flush_utf16(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}
