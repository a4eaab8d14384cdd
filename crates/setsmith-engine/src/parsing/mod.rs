pub mod adapt;
pub mod blocks;
pub mod cursor;
pub mod scanner;

/// Structural failure while reading setfile text.
///
/// Every variant produced during block collection carries the offending line
/// and its absolute byte offset. Whenever one of these is returned from a
/// parse entry point, the cursor has already been rewound to where it stood
/// when the attempt began.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Expected a `tag:` or `key: value` line at byte {offset}, found {line:?}")]
    ExpectedTag { line: String, offset: usize },
    #[error("Unparseable line at byte {offset}: {line:?}")]
    MalformedLine { line: String, offset: usize },
    #[error("Expected an indented block under {tag:?} at byte {offset}")]
    MissingIndent { tag: String, offset: usize },
    #[error("Expected a {expected:?} block at byte {offset}, found {found:?}")]
    WrongTag {
        expected: &'static str,
        found: String,
        offset: usize,
    },
    #[error("Card block at byte {offset} is missing required field {field:?}")]
    MissingField { field: &'static str, offset: usize },
    #[error("Invalid timestamp {text:?} under key {key:?}")]
    InvalidTimestamp {
        key: String,
        text: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Invalid date {text:?} under key {key:?}")]
    InvalidDate {
        key: String,
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}
