/// Dataset records and field-path resolution.
///
/// A `Record` is one character from the external dataset: a JSON object with
/// flat scalar fields (`id`, `slug`, `name`, `images`) plus the nested
/// `powerstats`, `biography`, and `appearance` groupings. Records are
/// read-only; the query pipeline never mutates them.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// A raw value resolved from a record field, before coercion.
///
/// `Missing` stands in for absent keys, empty strings, the dataset's
/// `"N/A"` / `"-"` placeholders, and malformed paired fields. It is never
/// an error: unresolvable paths degrade to `Missing` so downstream sorting
/// and filtering can handle them uniformly.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
}

impl<'a> RawValue<'a> {
    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }
}

/// One character record. Wraps the raw JSON object so arbitrary dotted
/// field paths stay resolvable and the detail view can walk every grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Record(fields)
    }

    /// The underlying JSON object (used by the detail view's flattening).
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn slug(&self) -> Option<&str> {
        self.0.get("slug").and_then(Value::as_str)
    }

    pub fn name(&self) -> &str {
        self.0.get("name").and_then(Value::as_str).unwrap_or("")
    }

    /// Image URL for the given size key (`"xs"`, `"sm"`, `"md"`, `"lg"`).
    pub fn image(&self, size: &str) -> Option<&str> {
        self.0
            .get("images")
            .and_then(Value::as_object)
            .and_then(|imgs| imgs.get(size))
            .and_then(Value::as_str)
    }

    /// Resolve a dotted field path (e.g. `"powerstats.strength"`) against
    /// this record.
    ///
    /// Any missing intermediate key yields `Missing`. A terminal `height`
    /// or `weight` key must resolve to an array of length >= 2 and yields
    /// its second element (the metric-unit encoding); a second element
    /// beginning with the digit `0` is a known malformed-data sentinel and
    /// also yields `Missing`. Never panics and never errors.
    pub fn resolve(&self, path: &str) -> RawValue<'_> {
        let mut segments = path.split('.');
        let first = match segments.next() {
            Some(s) if !s.is_empty() => s,
            _ => return RawValue::Missing,
        };
        let mut current = match self.0.get(first) {
            Some(v) => v,
            None => return RawValue::Missing,
        };
        let mut terminal = first;
        for seg in segments {
            current = match current.as_object().and_then(|obj| obj.get(seg)) {
                Some(v) => v,
                None => return RawValue::Missing,
            };
            terminal = seg;
        }

        if terminal == "height" || terminal == "weight" {
            return match current.as_array() {
                Some(pair) if pair.len() >= 2 => match &pair[1] {
                    Value::String(s) if s.starts_with('0') => RawValue::Missing,
                    other => scalar_raw(other),
                },
                _ => RawValue::Missing,
            };
        }

        scalar_raw(current)
    }
}

/// Normalize a terminal JSON value: empty strings and the dataset's
/// placeholder strings count as missing; non-scalar values have no raw
/// representation.
fn scalar_raw(value: &Value) -> RawValue<'_> {
    match value {
        Value::String(s) => match s.as_str() {
            "" | "N/A" | "-" => RawValue::Missing,
            s => RawValue::Text(s),
        },
        Value::Number(n) => n.as_f64().map_or(RawValue::Missing, RawValue::Number),
        _ => RawValue::Missing,
    }
}

/// Parse a JSON array of records from a reader. Non-object elements are
/// skipped rather than failing the whole load.
pub fn load_records(reader: impl Read) -> Result<Vec<Record>> {
    let root: Value = serde_json::from_reader(reader).context("dataset is not valid JSON")?;
    let items = match root {
        Value::Array(items) => items,
        _ => anyhow::bail!("dataset root is not a JSON array"),
    };
    Ok(items
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(obj) => Some(Record(obj)),
            _ => None,
        })
        .collect())
}

/// Load the dataset from a file, or return the empty collection on any
/// failure. The failure is logged as a diagnostic; downstream views show
/// their "no data" state instead of erroring.
pub fn load_records_or_empty(path: &Path) -> Vec<Record> {
    let loaded = File::open(path)
        .with_context(|| format!("failed to open dataset: {}", path.display()))
        .and_then(|f| load_records(BufReader::new(f)));
    match loaded {
        Ok(records) => records,
        Err(err) => {
            tracing::error!("dataset load failed: {err:#}");
            Vec::new()
        }
    }
}

/// Look up one record by its slug.
pub fn find_by_slug<'a>(records: &'a [Record], slug: &str) -> Option<&'a Record> {
    records.iter().find(|r| r.slug() == Some(slug))
}
