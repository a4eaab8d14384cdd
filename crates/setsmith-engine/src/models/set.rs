use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::models::card::Card;
use crate::models::value::{Fields, Value, write_entry};
use crate::parsing::ParseError;
use crate::parsing::adapt::{AdaptFn, cardify};
use crate::parsing::blocks::Blocks;
use crate::parsing::cursor::TextCursor;

/// A whole setfile: every top-level entry, plus a by-name view of the cards.
///
/// Both views hold the same `Rc<RefCell<Card>>` handles, so a card edited
/// through `cards` is the card that `all_data` serializes.
#[derive(Debug)]
pub struct Set {
    /// Top-level entries in encounter order. Serialization walks this map
    /// as-is and never sorts it.
    pub all_data: Fields,
    pub cards: IndexMap<String, Rc<RefCell<Card>>>,
}

impl Set {
    /// Wraps a map of top-level entries, indexing its cards by name.
    pub fn new(all_data: Fields) -> Set {
        let mut cards = IndexMap::new();
        for value in all_data.values() {
            if let Value::Card(card) = value {
                cards.insert(card.borrow().name.clone(), Rc::clone(card));
            }
        }
        Set { all_data, cards }
    }

    /// Parses full setfile text, tolerating a leading byte order mark.
    pub fn from_text(text: &str) -> Result<Set, ParseError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut cursor = TextCursor::new(text);
        let adapter: &AdaptFn = &cardify;
        let mut all_data = Fields::new();
        for entry in Blocks::new(&mut cursor, Some(adapter)) {
            let (key, value) = entry?;
            all_data.insert(key, value);
        }
        Ok(Set::new(all_data))
    }

    /// Renders the set back to setfile text, entry for entry.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.all_data {
            write_entry(&mut out, key, value, "");
        }
        out
    }
}
