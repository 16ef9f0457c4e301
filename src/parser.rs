// src/parser.rs

use crate::error::ParseError;
use crate::model::RecordMap;

/// Lines per record: a title line followed by two element lines
pub const RECORD_LINES: usize = 3;

/// Splits one snapshot of the tracked file into records keyed by object id.
///
/// Lines are grouped into consecutive triples in file order. The id is the
/// second whitespace-delimited token of a triple's last line (the catalog
/// number field of TLE line 2). If an id repeats, the last record wins.
pub fn parse_snapshot(content: &[u8]) -> Result<RecordMap, ParseError> {
    let text = std::str::from_utf8(content)?;
    let lines = split_lines(trim(text));

    let mut records = RecordMap::new();
    if lines.is_empty() {
        return Ok(records);
    }

    for (index, group) in lines.chunks(RECORD_LINES).enumerate() {
        if group.len() < RECORD_LINES {
            return Err(ParseError::IncompleteRecord { index, lines: group.len() });
        }
        let id = group[RECORD_LINES - 1]
            .split_whitespace()
            .nth(1)
            .ok_or(ParseError::MissingIdentifier { index })?;
        records.insert(id.to_string(), trim(&group.join("\n")).to_string());
    }

    Ok(records)
}

/// Line terminators besides `\r\n`: the ASCII breaks plus the file, group and
/// record separators, NEL, and the Unicode line and paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

fn trim(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Splits on any line break, treating `\r\n` as one. A trailing break does
/// not produce an empty last line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(_, '\n')) = chars.peek() {
                chars.next();
                start += 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
