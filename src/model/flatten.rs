//! Flattening of nested API records into uniform tabular rows
//!
//! Nested objects collapse into single-level records whose keys are the
//! joined object path (`album.name` becomes `album_name`). Arrays and other
//! non-object values are kept as they are.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_SEPARATOR: &str = "_";

/// Nesting deeper than this is rejected instead of walked.
pub const MAX_DEPTH: usize = 32;

/// A single-level record keyed by joined path.
pub type FlatRecord = BTreeMap<String, Value>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlattenError {
    #[error("flattened key `{0}` is produced by more than one path")]
    PathCollision(String),

    #[error("record nesting exceeds {MAX_DEPTH} levels at `{0}`")]
    TooDeep(String),

    #[error("item {0} is not an object")]
    NotAnObject(usize),
}

fn join_key(prefix: &str, key: &str, sep: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{sep}{key}")
    }
}

/// Flatten one nested record.
///
/// Walks the record with an explicit stack, so stack usage does not grow
/// with nesting depth.
pub fn flatten(record: &Map<String, Value>, prefix: &str, sep: &str) -> Result<FlatRecord, FlattenError> {
    let mut flat = FlatRecord::new();
    let mut stack: Vec<(String, &Map<String, Value>, usize)> = vec![(prefix.to_string(), record, 0)];

    while let Some((path, map, depth)) = stack.pop() {
        for (key, value) in map {
            let new_key = join_key(&path, key, sep);
            match value {
                Value::Object(nested) => {
                    if depth + 1 > MAX_DEPTH {
                        return Err(FlattenError::TooDeep(new_key));
                    }
                    stack.push((new_key, nested, depth + 1));
                }
                other => {
                    if flat.insert(new_key.clone(), other.clone()).is_some() {
                        return Err(FlattenError::PathCollision(new_key));
                    }
                }
            }
        }
    }

    Ok(flat)
}

/// Flattened response items with the union of their keys as columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tabular {
    columns: BTreeSet<String>,
    rows: Vec<FlatRecord>,
}

/// Flatten every item of a response list.
pub fn flatten_records(items: &[Value]) -> Result<Tabular, FlattenError> {
    let mut table = Tabular::default();
    for (index, item) in items.iter().enumerate() {
        let Value::Object(map) = item else {
            return Err(FlattenError::NotAnObject(index + 1));
        };
        let row = flatten(map, "", DEFAULT_SEPARATOR)?;
        table.columns.extend(row.keys().cloned());
        table.rows.push(row);
    }
    Ok(table)
}

impl Tabular {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Display text of one cell; missing and null cells are empty.
    pub fn cell(&self, row: usize, column: &str) -> String {
        self.rows
            .get(row)
            .and_then(|record| record.get(column))
            .map(display_value)
            .unwrap_or_default()
    }

    /// Selected columns of every row as display strings.
    pub fn project(&self, columns: &[&str]) -> Vec<Vec<String>> {
        (0..self.rows.len())
            .map(|row| columns.iter().map(|column| self.cell(row, column)).collect())
            .collect()
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn flat_input_is_returned_unchanged() {
        let record = object(json!({"id": "1", "name": "Creep", "popularity": 80, "explicit": false}));
        let flat = flatten(&record, "", "_").unwrap();
        let expected: FlatRecord = record.into_iter().collect();
        assert_eq!(flat, expected);
    }

    #[test]
    fn empty_input_yields_empty_record() {
        assert!(flatten(&Map::new(), "", "_").unwrap().is_empty());
    }

    #[test]
    fn nested_objects_are_joined_by_separator() {
        let record = object(json!({
            "name": "Creep",
            "album": {"name": "Pablo Honey", "images": {"small": "s.jpg"}},
            "artist": {"name": "Radiohead"}
        }));
        let flat = flatten(&record, "", "_").unwrap();
        assert_eq!(flat["name"], json!("Creep"));
        assert_eq!(flat["album_name"], json!("Pablo Honey"));
        assert_eq!(flat["album_images_small"], json!("s.jpg"));
        assert_eq!(flat["artist_name"], json!("Radiohead"));
        assert_eq!(flat.len(), 4);
    }

    #[test]
    fn prefix_and_separator_are_honoured() {
        let record = object(json!({"album": {"id": "x"}}));
        let flat = flatten(&record, "track", ".").unwrap();
        assert_eq!(flat.keys().collect::<Vec<_>>(), vec!["track.album.id"]);
    }

    #[test]
    fn arrays_are_not_flattened() {
        let record = object(json!({"artists": [{"name": "A"}, {"name": "B"}]}));
        let flat = flatten(&record, "", "_").unwrap();
        assert_eq!(flat["artists"], json!([{"name": "A"}, {"name": "B"}]));
    }

    #[test]
    fn colliding_paths_are_an_error() {
        let record = object(json!({"a": {"b": 1}, "a_b": 2}));
        assert_eq!(
            flatten(&record, "", "_"),
            Err(FlattenError::PathCollision("a_b".to_string()))
        );
    }

    #[test]
    fn nesting_past_the_depth_guard_is_rejected() {
        let mut value = json!("leaf");
        for _ in 0..=MAX_DEPTH {
            value = json!({ "k": value });
        }
        let record = object(json!({ "root": value }));
        assert!(matches!(
            flatten(&record, "", "_"),
            Err(FlattenError::TooDeep(_))
        ));
    }

    #[test]
    fn records_become_a_uniform_table() {
        let items = vec![
            json!({"name": "Creep", "album": {"name": "Pablo Honey"}}),
            json!({"name": "Airbag", "preview_url": null}),
        ];
        let table = flatten_records(&items).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.columns().collect::<Vec<_>>(),
            vec!["album_name", "name", "preview_url"]
        );
        assert_eq!(
            table.project(&["name", "album_name"]),
            vec![
                vec!["Creep".to_string(), "Pablo Honey".to_string()],
                vec!["Airbag".to_string(), String::new()],
            ]
        );
        assert_eq!(table.cell(1, "preview_url"), "");
        assert_eq!(table.cell(5, "name"), "");
    }

    #[test]
    fn non_object_items_are_rejected() {
        let items = vec![json!({"name": "ok"}), json!(["not", "a", "record"])];
        assert_eq!(flatten_records(&items), Err(FlattenError::NotAnObject(2)));
    }
}
