use chrono::{NaiveDate, NaiveDateTime};

use super::ParseError;
use crate::models::card::Card;
use crate::models::value::{DATE_FORMAT, TIME_FORMAT, Value};

/// Adapter hook applied to every `(key, value)` pair the collector produces,
/// children before parents. The collector itself knows nothing about cards
/// or timestamps; everything format-specific lives behind this type.
pub type AdaptFn = dyn Fn(String, Value) -> Result<(String, Value), ParseError>;

/// The setfile adapter.
///
/// `card` blocks become shared [`Card`] handles keyed by the card's own
/// name, keys containing "time" parse as full timestamps, and the two
/// version keys parse as dates carried at midnight. Every other pair passes
/// through untouched.
pub fn cardify(key: String, value: Value) -> Result<(String, Value), ParseError> {
    if key == "card" {
        return match value {
            Value::Block(fields) => {
                let card = Card::from_fields(fields)?;
                let name = card.name.clone();
                Ok((name, Value::from(card)))
            }
            other => Ok((key, other)),
        };
    }
    if let Value::Text(text) = &value {
        if key.contains("time") {
            return match NaiveDateTime::parse_from_str(text.trim(), TIME_FORMAT) {
                Ok(t) => Ok((key, Value::Timestamp(t))),
                Err(source) => Err(ParseError::InvalidTimestamp {
                    key,
                    text: text.clone(),
                    source,
                }),
            };
        }
        if key == "game_version" || key == "stylesheet_version" {
            return match NaiveDate::parse_from_str(text.trim(), DATE_FORMAT) {
                Ok(d) => Ok((key, Value::Timestamp(d.into()))),
                Err(source) => Err(ParseError::InvalidDate {
                    key,
                    text: text.clone(),
                    source,
                }),
            };
        }
    }
    Ok((key, value))
}
