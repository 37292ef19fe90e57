//! Offset to line/column mapping for content matches

use super::results::Position;

/// Map a byte offset in `content` to a 1-based line/column pair.
///
/// Lines are delimited by `\n`; a preceding `\r` belongs to the break, not to
/// the column count, so `\r\n` and `\n` content index identically. Offset 0 is
/// line 1, column 1. Columns count characters, not bytes.
pub fn line_column(content: &str, offset: usize) -> Position {
    let prefix = &content[..offset];

    let line = prefix.bytes().filter(|&b| b == b'\n').count() as u32 + 1;
    let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = prefix[line_start..].chars().count() as u32 + 1;

    Position { line, column }
}
