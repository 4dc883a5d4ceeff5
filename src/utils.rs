use std::{cmp::Ordering, collections::HashSet};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{SecondsFormat, Utc};
use rand::{Rng, distr::Alphanumeric};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::types::Record;

pub const DEFAULT_SAMPLE_SIZE: usize = 5;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Draws `min(n, len)` items uniformly at random without replacement in a
/// single pass (reservoir sampling, algorithm R).
///
/// The first `n` items fill the reservoir. The item at index `i` then takes a
/// uniformly chosen slot with probability `n / (i + 1)`.
pub fn sample<T, I, R>(items: I, n: usize, rng: &mut R) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    R: Rng + ?Sized,
{
    let mut reservoir = Vec::new();
    if n == 0 {
        return reservoir;
    }

    for (i, item) in items.into_iter().enumerate() {
        if i < n {
            reservoir.push(item);
            continue;
        }

        let slot = rng.random_range(0..=i);
        if slot < n {
            reservoir[slot] = item;
        }
    }

    reservoir
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// Collects the `id` of every object in a JSON array. Anything else yields
/// an empty list.
pub fn ids_of(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Drops repeated ids, keeping the first occurrence.
pub fn remove_duplicate_ids(ids: &mut Vec<String>) {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

/// Parses `created,played_at` or `-created` into (keys, descending).
pub fn parse_order_by(order_by: &str) -> (Vec<String>, bool) {
    let trimmed = order_by.trim();
    let (keys, descending) = match trimmed.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (trimmed, false),
    };

    let keys = keys
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();

    (keys, descending)
}

/// Sorts records by the given keys. Numbers compare numerically, everything
/// else by its cell text; missing fields sort as the empty string.
pub fn sort_records(records: &mut [&Record], keys: &[String], descending: bool) {
    records.sort_by(|a, b| {
        for key in keys {
            let ord = compare_fields(a.get(key), b.get(key));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    if descending {
        records.reverse();
    }
}

fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(Value::Number(x)), Some(Value::Number(y))) = (a, b) {
        if let (Some(x), Some(y)) = (x.as_f64(), y.as_f64()) {
            return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
        }
    }

    let key = |v: Option<&Value>| v.map(display_value).unwrap_or_default();
    key(a).cmp(&key(b))
}

/// Renders a JSON value for a table cell; strings lose their quotes.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
