/// Value coercion and ordering.
///
/// Turns raw resolved values into typed sort/filter keys per field class,
/// and provides the total-order comparator used by the pipeline's stable
/// sort. `Missing` orders after every valid value in both directions.
use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::field::{Field, FieldClass, STATS};
use crate::record::{RawValue, Record};

/// Leading quantity plus unit token, e.g. `"95 kg"`, `"2 tons"`,
/// `"1,000 kg"`. Commas are stripped before parsing.
static WEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:,\d+)*)\s*(kg|tons)").unwrap());

/// Leading quantity plus unit token, e.g. `"188 cm"`, `"1.88 meters"`.
static HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(meters|cm)").unwrap());

/// A coerced, comparable value. `Missing` is distinct from every valid
/// value and never compares equal to one.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparable {
    Missing,
    Number(f64),
    Text(String),
    Rank(u32),
}

impl Comparable {
    pub fn is_missing(&self) -> bool {
        matches!(self, Comparable::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Comparable::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Query-string token (`order=asc|desc`).
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Anything other than `"desc"` reads as ascending.
    pub fn from_param(s: &str) -> SortOrder {
        if s.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Coerce a raw resolved value per the field's class.
///
/// Stats parse as integers; height and weight extract a quantity plus unit
/// token and normalize to centimeters / kilograms; alignment maps to an
/// ordinal rank (bad=1, neutral=2, good=3, unrecognized=999); text fields
/// lowercase. Anything unparsable is `Missing`.
pub fn coerce(raw: &RawValue<'_>, field: Field) -> Comparable {
    if raw.is_missing() {
        return Comparable::Missing;
    }
    match field.class() {
        FieldClass::Stat => match raw {
            RawValue::Number(n) => Comparable::Number(*n),
            RawValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_or(Comparable::Missing, |n| Comparable::Number(n as f64)),
            RawValue::Missing => Comparable::Missing,
        },
        FieldClass::Weight => match raw {
            RawValue::Text(s) => weight_kg(s).map_or(Comparable::Missing, Comparable::Number),
            _ => Comparable::Missing,
        },
        FieldClass::Height => match raw {
            RawValue::Text(s) => height_cm(s).map_or(Comparable::Missing, Comparable::Number),
            _ => Comparable::Missing,
        },
        FieldClass::Alignment => match raw {
            RawValue::Text(s) => Comparable::Rank(alignment_rank(s)),
            _ => Comparable::Missing,
        },
        FieldClass::Text => match raw {
            RawValue::Text(s) => Comparable::Text(s.to_lowercase()),
            RawValue::Number(n) => Comparable::Text(n.to_string()),
            RawValue::Missing => Comparable::Missing,
        },
        // The aggregate key is derived from the whole powerstats grouping,
        // not from a single resolved value.
        FieldClass::StatTotal => Comparable::Missing,
    }
}

/// Derive the sort key for a record under the given column.
///
/// Text columns additionally strip non-letters so punctuation does not
/// perturb alphabetic order. The aggregate powerstats column sums the six
/// stats, counting unparsable entries as zero.
pub fn sort_key(record: &Record, field: Field) -> Comparable {
    if field.class() == FieldClass::StatTotal {
        let total: f64 = STATS
            .iter()
            .map(|stat| {
                coerce(&record.resolve(stat.path()), *stat)
                    .as_number()
                    .unwrap_or(0.0)
            })
            .sum();
        return Comparable::Number(total);
    }
    match coerce(&record.resolve(field.path()), field) {
        Comparable::Text(s) => Comparable::Text(s.chars().filter(|c| c.is_alphabetic()).collect()),
        other => other,
    }
}

/// Three-way comparison of two coerced values under a sort direction.
///
/// `Missing` sorts last irrespective of direction; the direction inverts
/// only the ordering of valid values. Used with a stable sort, so records
/// that compare equal keep their relative order.
pub fn compare(a: &Comparable, b: &Comparable, order: SortOrder) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = compare_values(a, b);
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        }
    }
}

fn compare_values(a: &Comparable, b: &Comparable) -> Ordering {
    match (a, b) {
        (Comparable::Number(x), Comparable::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (Comparable::Text(x), Comparable::Text(y)) => x.cmp(y),
        (Comparable::Rank(x), Comparable::Rank(y)) => x.cmp(y),
        // Mixed kinds cannot arise from one field's coercion; treat as ties.
        _ => Ordering::Equal,
    }
}

/// `"95 kg"` -> 95, `"2 tons"` -> 2000. `None` without a recognized unit.
pub fn weight_kg(s: &str) -> Option<f64> {
    let caps = WEIGHT_RE.captures(s)?;
    let digits = caps[1].replace(',', "");
    let value: f64 = digits.parse().ok()?;
    Some(if caps[2].eq_ignore_ascii_case("tons") {
        value * 1000.0
    } else {
        value
    })
}

/// `"188 cm"` -> 188, `"1.88 meters"` -> 188. `None` without a recognized
/// unit.
pub fn height_cm(s: &str) -> Option<f64> {
    let caps = HEIGHT_RE.captures(s)?;
    let value: f64 = caps[1].parse().ok()?;
    Some(if caps[2].eq_ignore_ascii_case("meters") {
        value * 100.0
    } else {
        value
    })
}

/// Ordinal alignment rank: bad < neutral < good, unrecognized last among
/// valid values.
pub fn alignment_rank(s: &str) -> u32 {
    match s.to_lowercase().as_str() {
        "bad" => 1,
        "neutral" => 2,
        "good" => 3,
        _ => 999,
    }
}
