//! Collection helpers
//!
//! Extraction, keyed indexing, sorting and small aggregate functions over
//! record collections and JSON value sequences. None of these functions
//! modify their input; every result is a fresh value.

use crate::core::{KeyedIndex, Record};
use crate::utils::error::{BoxError, Result};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `"desc"` selects descending order, any other tag falls back to ascending.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// Takes the `key` field out of every record, keeping order.
pub fn extract_from_each(items: &[Record], key: &str) -> Result<Vec<Value>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.get(key).cloned().ok_or_else(|| BoxError::KeyNotFound {
                key: key.to_string(),
                index,
            })
        })
        .collect()
}

/// Indexes records by the value of `key`. Records where the field is missing
/// or empty are skipped; a later record overwrites an earlier one with the
/// same key value.
pub fn extract_keys(items: &[Record], key: &str) -> KeyedIndex {
    let mut result = KeyedIndex::new();

    for (index, item) in items.iter().enumerate() {
        match item.get(key).and_then(index_key) {
            Some(id) => {
                result.insert(id, item.clone());
            }
            None => {
                tracing::debug!("Skipping item {} without a usable '{}' value", index, key);
            }
        }
    }

    result
}

/// Like [`extract_keys`], but in `strict` mode a record without a usable
/// primary key is an error instead of being skipped. Empty records are always
/// ignored.
pub fn to_hashtable(items: &[Record], primary_key: &str, strict: bool) -> Result<KeyedIndex> {
    let mut result = KeyedIndex::new();

    for (index, item) in items.iter().enumerate() {
        if item.is_empty() {
            continue;
        }

        match item.get(primary_key).and_then(index_key) {
            Some(id) => {
                result.insert(id, item.clone());
            }
            None if strict => {
                return Err(BoxError::MissingPrimaryKey {
                    key: primary_key.to_string(),
                    index,
                });
            }
            None => {
                tracing::debug!(
                    "Skipping item {} without a '{}' primary key",
                    index,
                    primary_key
                );
            }
        }
    }

    Ok(result)
}

/// Stable sort of records by the value of `attribute`.
///
/// Records sharing an attribute value are all kept, in their input order.
pub fn sort_by(items: &[Record], attribute: &str, order: SortOrder) -> Result<Vec<Record>> {
    let mut keyed = keyed_by_attribute(items, attribute)?;
    sort_keyed(&mut keyed, order);
    Ok(keyed.into_iter().map(|(_, item)| item.clone()).collect())
}

/// Sorts by `attribute` keeping only the last record for each distinct
/// attribute value, the way an index keyed by that value would.
pub fn sort_by_unique(items: &[Record], attribute: &str, order: SortOrder) -> Result<Vec<Record>> {
    let keyed = keyed_by_attribute(items, attribute)?;

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<(&Value, &Record)> = Vec::new();
    for (value, item) in keyed {
        let slot = scalar_to_string(value);
        match positions.get(&slot) {
            Some(&position) => unique[position] = (value, item),
            None => {
                positions.insert(slot, unique.len());
                unique.push((value, item));
            }
        }
    }

    let collapsed = items.len() - unique.len();
    if collapsed > 0 {
        tracing::debug!("sort_by_unique collapsed {} records on '{}'", collapsed, attribute);
    }

    sort_keyed(&mut unique, order);
    Ok(unique.into_iter().map(|(_, item)| item.clone()).collect())
}

pub fn has_duplicates<T: Eq + Hash>(items: &[T]) -> bool {
    let unique: HashSet<&T> = items.iter().collect();
    unique.len() < items.len()
}

/// [`has_duplicates`] for JSON values. `1` and `"1"` are different values.
pub fn has_duplicate_values(items: &[Value]) -> bool {
    let unique: HashSet<String> = items.iter().map(Value::to_string).collect();
    unique.len() < items.len()
}

/// Removes exactly one level of nesting. Object members are emitted as bare
/// values; scalars pass through.
pub fn flatten(items: &[Value]) -> Vec<Value> {
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Array(inner) => result.extend(inner.iter().cloned()),
            Value::Object(inner) => result.extend(inner.values().cloned()),
            other => result.push(other.clone()),
        }
    }
    result
}

pub fn true_any_of<T, F>(items: &[T], predicate: F) -> bool
where
    F: Fn(&T) -> bool,
{
    items.iter().any(predicate)
}

pub fn true_every_of<T, F>(items: &[T], predicate: F) -> bool
where
    F: Fn(&T) -> bool,
{
    items.iter().all(predicate)
}

pub fn median(numbers: &[f64]) -> Result<f64> {
    if numbers.is_empty() {
        return Err(BoxError::EmptyInput {
            operation: "median".to_string(),
        });
    }

    let mut sorted = numbers.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Builds a cache key such as `"user_1_10-20"` out of a list of arguments.
pub fn serialize_cache_key(args: &[Value]) -> Result<String> {
    if args.is_empty() {
        return Err(BoxError::EmptyArguments);
    }

    let parts: Vec<String> = args.iter().map(cache_key_part).collect();
    Ok(parts.join("_"))
}

fn cache_key_part(arg: &Value) -> String {
    match arg {
        Value::Bool(flag) => String::from(if *flag { "1" } else { "0" }),
        Value::Array(items) => items.iter().map(cache_key_part).collect::<Vec<_>>().join("-"),
        Value::Object(members) => members
            .values()
            .map(cache_key_part)
            .collect::<Vec<_>>()
            .join("-"),
        other => scalar_to_string(other),
    }
}

fn keyed_by_attribute<'a>(items: &'a [Record], attribute: &str) -> Result<Vec<(&'a Value, &'a Record)>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.get(attribute)
                .map(|value| (value, item))
                .ok_or_else(|| BoxError::KeyNotFound {
                    key: attribute.to_string(),
                    index,
                })
        })
        .collect()
}

fn sort_keyed(keyed: &mut [(&Value, &Record)], order: SortOrder) {
    keyed.sort_by(|(a, _), (b, _)| match order {
        SortOrder::Asc => compare_values(a, b),
        SortOrder::Desc => compare_values(b, a),
    });
}

/// Total order over JSON values: null < bool < number < string < array < object.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x
                .as_f64()
                .unwrap_or(0.0)
                .total_cmp(&y.as_f64().unwrap_or(0.0)),
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// String form of a value usable as an index key, or `None` for empty values
/// (`null`, `false`, `0`, `""`, `"0"`) and for arrays or objects.
pub fn index_key(value: &Value) -> Option<String> {
    match value {
        Value::Bool(true) => Some("1".to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() && s != "0" => Some(s.clone()),
        _ => None,
    }
}

/// Plain string conversion of a scalar; composite values render as JSON.
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => String::from(if *flag { "1" } else { "0" }),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
