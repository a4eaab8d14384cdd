use super::ParseError;
use super::adapt::AdaptFn;
use super::cursor::TextCursor;
use super::scanner::{self, LineKind};
use crate::models::value::{Fields, Value};

/// Tags with this suffix switch their children to raw-line capture.
pub const RAW_TEXT_SUFFIX: &str = " text";

/// Reads one block starting at the cursor's current line.
///
/// A `key: value` line is a complete block of its own and is returned
/// immediately. A `tag:` line opens a group: every following line with a
/// strictly longer indent belongs to it, recursively. Nesting is decided by
/// indent length alone, so tabs and spaces never compare equal by accident.
///
/// On success the cursor rests on the first line not belonging to the block.
/// On error the cursor is rewound to where it was when the call was made.
pub fn read_block(
    cursor: &mut TextCursor<'_>,
    adapter: Option<&AdaptFn>,
) -> Result<(String, Value), ParseError> {
    cursor.with_rewind(|cursor| read_block_inner(cursor, adapter))
}

fn read_block_inner(
    cursor: &mut TextCursor<'_>,
    adapter: Option<&AdaptFn>,
) -> Result<(String, Value), ParseError> {
    let offset = cursor.pos();
    let first = cursor.next_line().unwrap_or("");
    let (base_indent, base_tag) = match scanner::classify(first) {
        LineKind::GroupOpen { indent, tag } => (indent, tag),
        LineKind::KeyValue { key, value, .. } => {
            return adapt_pair(adapter, key.to_string(), Value::Text(value.to_string()));
        }
        LineKind::Malformed => {
            return Err(ParseError::ExpectedTag {
                line: first.to_string(),
                offset,
            });
        }
    };

    if base_tag.ends_with(RAW_TEXT_SUFFIX) {
        let lines = read_raw_lines(cursor, base_indent);
        return adapt_pair(adapter, base_tag.to_string(), Value::Lines(lines));
    }

    let mut fields = Fields::new();
    while let Some(line) = cursor.peek_line() {
        let line_offset = cursor.pos();
        match scanner::classify(line) {
            LineKind::GroupOpen { indent, .. } => {
                if indent.len() <= base_indent.len() {
                    break;
                }
                // The recursive call runs the adapter on its own pair, so the
                // result is inserted as-is.
                let (tag, value) = read_block(cursor, adapter)?;
                fields.insert(tag, value);
            }
            LineKind::KeyValue { indent, key, value } => {
                if indent.len() <= base_indent.len() {
                    break;
                }
                cursor.next_line();
                let (key, value) =
                    adapt_pair(adapter, key.to_string(), Value::Text(value.to_string()))?;
                fields.insert(key, value);
            }
            LineKind::Malformed => {
                return Err(ParseError::MalformedLine {
                    line: line.to_string(),
                    offset: line_offset,
                });
            }
        }
    }

    adapt_pair(adapter, base_tag.to_string(), Value::Block(fields))
}

/// Raw-capture mode for " text" groups: lines keep their terminator and any
/// indentation beyond the one level that establishes nesting.
fn read_raw_lines(cursor: &mut TextCursor<'_>, base_indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(line) = cursor.peek_line() {
        let indent = scanner::leading_indent(line);
        if indent.len() <= base_indent.len() {
            break;
        }
        lines.push(line[base_indent.len() + 1..].to_string());
        cursor.next_line();
    }
    lines
}

fn adapt_pair(
    adapter: Option<&AdaptFn>,
    key: String,
    value: Value,
) -> Result<(String, Value), ParseError> {
    match adapter {
        Some(adapt) => adapt(key, value),
        None => Ok((key, value)),
    }
}

/// Lazily yields top-level `(tag, value)` pairs until the text is exhausted.
///
/// One [`read_block`] call per item; the iterator is fused after the first
/// error, since the cursor is then back on the line that failed.
pub struct Blocks<'c, 'a> {
    cursor: &'c mut TextCursor<'a>,
    adapter: Option<&'c AdaptFn>,
    failed: bool,
}

impl<'c, 'a> Blocks<'c, 'a> {
    pub fn new(cursor: &'c mut TextCursor<'a>, adapter: Option<&'c AdaptFn>) -> Self {
        Self {
            cursor,
            adapter,
            failed: false,
        }
    }
}

impl Iterator for Blocks<'_, '_> {
    type Item = Result<(String, Value), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.eof() {
            return None;
        }
        let item = read_block(self.cursor, self.adapter);
        self.failed = item.is_err();
        Some(item)
    }
}
