use chrono::{Local, NaiveDateTime};

use crate::models::value::{Fields, TIME_FORMAT, Value, write_entry};
use crate::parsing::ParseError;
use crate::parsing::blocks::read_block;
use crate::parsing::cursor::TextCursor;

/// The five fields every card block must carry, in their serialized order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "has_styling",
    "notes",
    "time_created",
    "time_modified",
    "name",
];

/// One card from a setfile.
///
/// The required fields are typed; every other entry stays in `remaining` in
/// the order it was first seen. Two cards are equal when their names are
/// equal; [`is_identical_to`](Card::is_identical_to) compares every field.
#[derive(Debug, Clone)]
pub struct Card {
    pub has_styling: bool,
    pub notes: String,
    pub time_created: NaiveDateTime,
    pub time_modified: NaiveDateTime,
    pub name: String,
    pub remaining: Fields,
}

impl Card {
    /// A blank unstyled card named "" whose timestamps are the current time.
    pub fn new() -> Self {
        let now = Local::now().naive_local();
        Self {
            has_styling: false,
            notes: String::new(),
            time_created: now,
            time_modified: now,
            name: String::new(),
            remaining: Fields::new(),
        }
    }

    /// Builds a card from a collected block, leniently.
    ///
    /// Missing required entries fall back to the [`new`](Card::new)
    /// defaults. Time entries accept an already-parsed timestamp or raw text
    /// in the full format; raw text in any other shape is an error.
    pub fn from_fields(mut fields: Fields) -> Result<Card, ParseError> {
        let has_styling = matches!(
            fields.shift_remove("has_styling"),
            Some(Value::Text(text)) if text == "true"
        );
        let notes = match fields.shift_remove("notes") {
            Some(Value::Text(text)) => text,
            _ => String::new(),
        };
        let time_created = take_time(&mut fields, "time_created")?;
        let time_modified = take_time(&mut fields, "time_modified")?;
        let name = match fields.shift_remove("name") {
            Some(Value::Text(text)) => text,
            _ => String::new(),
        };
        Ok(Card {
            has_styling,
            notes,
            time_created,
            time_modified,
            name,
            remaining: fields,
        })
    }

    /// Parses one card block from a cursor positioned at a `card:` line.
    ///
    /// Drives the generic collector and then insists the tag is exactly
    /// "card" and that all of [`REQUIRED_FIELDS`] were present. On any
    /// failure the cursor is restored to where it was before the call; on
    /// success it rests just past the card block.
    pub fn read_from(cursor: &mut TextCursor<'_>) -> Result<Card, ParseError> {
        cursor.with_rewind(|cursor| {
            let offset = cursor.pos();
            let (tag, value) = read_block(cursor, None)?;
            if tag != "card" {
                return Err(ParseError::WrongTag {
                    expected: "card",
                    found: tag,
                    offset,
                });
            }
            let fields = match value {
                Value::Block(fields) if !fields.is_empty() => fields,
                _ => return Err(ParseError::MissingIndent { tag, offset }),
            };
            for field in REQUIRED_FIELDS {
                if !fields.contains_key(field) {
                    return Err(ParseError::MissingField { field, offset });
                }
            }
            Card::from_fields(fields)
        })
    }

    /// Deep comparison of two cards.
    pub fn is_identical_to(&self, other: &Card) -> bool {
        self.has_styling == other.has_styling
            && self.notes == other.notes
            && self.time_created == other.time_created
            && self.time_modified == other.time_modified
            && self.name == other.name
            && self.remaining == other.remaining
    }

    /// Writes the card block at the given indent: the `card:` tag, the five
    /// required fields in fixed order, then the extras in encounter order.
    pub fn write(&self, out: &mut String, indent: &str) {
        out.push_str(&format!("{indent}card:\n"));
        let field_indent = format!("{indent}\t");
        out.push_str(&format!(
            "{field_indent}has_styling: {}\n",
            if self.has_styling { "true" } else { "false" }
        ));
        out.push_str(&format!("{field_indent}notes: {}\n", self.notes));
        out.push_str(&format!(
            "{field_indent}time_created: {}\n",
            self.time_created.format(TIME_FORMAT)
        ));
        out.push_str(&format!(
            "{field_indent}time_modified: {}\n",
            self.time_modified.format(TIME_FORMAT)
        ));
        out.push_str(&format!("{field_indent}name: {}\n", self.name));
        for (key, value) in &self.remaining {
            write_entry(out, key, value, &field_indent);
        }
    }

    /// The card block as top-level setfile text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, "");
        out
    }
}

/// Pulls one time entry out of a field map. Pre-parsed timestamps and full
/// format text are accepted; anything else falls back to the current time.
fn take_time(fields: &mut Fields, key: &str) -> Result<NaiveDateTime, ParseError> {
    match fields.shift_remove(key) {
        Some(Value::Timestamp(t)) => Ok(t),
        Some(Value::Text(text)) => NaiveDateTime::parse_from_str(text.trim(), TIME_FORMAT)
            .map_err(|source| ParseError::InvalidTimestamp {
                key: key.to_string(),
                text,
                source,
            }),
        _ => Ok(Local::now().naive_local()),
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Card {
    // Identity is the name; deep comparison is `is_identical_to`.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
