/// Detail view: one record looked up by slug, flattened to label/value
/// lines.
use std::io::{self, Write};

use serde_json::{Map, Value};

use crate::record::{Record, find_by_slug};

/// Identity fields carried by the table view; the detail body skips them.
const IDENTITY_KEYS: [&str; 4] = ["id", "slug", "name", "images"];

/// Flatten all non-identity fields into label/value pairs, recursing into
/// the nested groupings. Height and weight show only their secondary
/// encoded element; other arrays join with `", "`.
pub fn flatten(record: &Record) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    flatten_object(record.fields(), "", &mut pairs);
    pairs
}

fn flatten_object(obj: &Map<String, Value>, prefix: &str, out: &mut Vec<(String, String)>) {
    for (key, value) in obj {
        if IDENTITY_KEYS.contains(&key.as_str()) {
            continue;
        }
        match value {
            Value::Array(items) => {
                if prefix == "appearance" && (key == "height" || key == "weight") {
                    let secondary = items.get(1).map(display_scalar).unwrap_or_default();
                    out.push((key.clone(), or_placeholder(secondary)));
                } else {
                    let joined = items.iter().map(display_scalar).collect::<Vec<_>>().join(", ");
                    out.push((key.clone(), or_placeholder(joined)));
                }
            }
            Value::Object(nested) => flatten_object(nested, key, out),
            scalar => out.push((key.clone(), or_placeholder(display_scalar(scalar)))),
        }
    }
}

fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn or_placeholder(s: String) -> String {
    if s.is_empty() { "N/A".to_string() } else { s }
}

/// Render the detail view for a slug. An unknown slug renders a
/// "not found" placeholder rather than nothing.
pub fn render_detail(out: &mut impl Write, records: &[Record], slug: &str) -> io::Result<()> {
    let Some(record) = find_by_slug(records, slug) else {
        return writeln!(out, "character not found: {slug}");
    };
    writeln!(out, "{}", record.name())?;
    if let Some(url) = record.image("lg") {
        writeln!(out, "image: {url}")?;
    }
    for (label, value) in flatten(record) {
        writeln!(out, "{label}: {value}")?;
    }
    Ok(())
}
