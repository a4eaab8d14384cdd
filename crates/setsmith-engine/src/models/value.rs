use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDateTime, NaiveTime};
use indexmap::IndexMap;

use crate::models::card::Card;

/// Full timestamp format used by card time fields.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Date-only format used by the version fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ordered entries of one block. Insertion order is the only order; nothing
/// in the crate ever sorts one of these.
pub type Fields = IndexMap<String, Value>;

/// Every shape a parsed setfile value can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Raw text from a `key: value` line.
    Text(String),
    /// A parsed time field; dates are carried with a midnight time-of-day.
    Timestamp(NaiveDateTime),
    /// A nested block of entries.
    Block(Fields),
    /// Raw lines captured under a tag ending in " text", each with its
    /// original terminator.
    Lines(Vec<String>),
    /// A card, shared with the owning set's by-name index.
    Card(Rc<RefCell<Card>>),
}

impl Value {
    /// Returns the raw text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a time value.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Returns the nested entries if this is a block.
    pub fn as_block(&self) -> Option<&Fields> {
        match self {
            Value::Block(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns the raw lines if this is a rules-text value.
    pub fn as_lines(&self) -> Option<&[String]> {
        match self {
            Value::Lines(lines) => Some(lines),
            _ => None,
        }
    }

    /// Returns the shared card handle if this is a card.
    pub fn as_card(&self) -> Option<&Rc<RefCell<Card>>> {
        match self {
            Value::Card(card) => Some(card),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(t: NaiveDateTime) -> Self {
        Value::Timestamp(t)
    }
}

impl From<Card> for Value {
    fn from(card: Card) -> Self {
        Value::Card(Rc::new(RefCell::new(card)))
    }
}

/// Writes one entry at the given indent, recursing into nested blocks one
/// tab deeper. This is the single serialization path; card serialization
/// calls back into it for extra fields, so nesting of any depth renders the
/// same way everywhere.
pub fn write_entry(out: &mut String, key: &str, value: &Value, indent: &str) {
    match value {
        Value::Text(text) => {
            out.push_str(&format!("{indent}{key}: {text}\n"));
        }
        Value::Timestamp(t) => {
            out.push_str(&format!("{indent}{key}: {}\n", render_timestamp(*t)));
        }
        Value::Block(fields) => {
            out.push_str(&format!("{indent}{key}:\n"));
            let deeper = format!("{indent}\t");
            for (k, v) in fields {
                write_entry(out, k, v, &deeper);
            }
        }
        Value::Lines(lines) => {
            out.push_str(&format!("{indent}{key}:\n"));
            for line in lines {
                out.push_str(indent);
                out.push('\t');
                out.push_str(line);
            }
        }
        Value::Card(card) => card.borrow().write(out, indent),
    }
}

/// Exact midnight renders date-only; anything else gets the full format.
fn render_timestamp(t: NaiveDateTime) -> String {
    if t.time() == NaiveTime::MIN {
        t.format(DATE_FORMAT).to_string()
    } else {
        t.format(TIME_FORMAT).to_string()
    }
}
