//! Mapping from store rows to client attribute objects.
//!
//! Column names come back in whatever casing the store uses (`GOAL`,
//! `client_plan`, ...). They are camel-cased here so the entity only ever sees
//! its own attribute names.

use serde_json::{Map, Value};

use super::StoreRow;
use crate::models::FIELD_NAMES;

const ID: &str = "id";

/// Normalize a row's column names and keep only the client attributes.
pub fn client_object(row: StoreRow) -> Map<String, Value> {
    row.into_iter()
        .map(|(column, value)| (camelize(&column), value))
        .filter(|(key, _)| key == ID || FIELD_NAMES.contains(&key.as_str()))
        .collect()
}

/// `snake_case`, `kebab-case`, `dotted.names` and upper-case names to camelCase
pub fn camelize(column: &str) -> String {
    let mut out = String::with_capacity(column.len());

    for (i, segment) in column
        .split(|c: char| matches!(c, '_' | '-' | '.'))
        .filter(|s| !s.is_empty())
        .enumerate()
    {
        let lower = segment.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}
