/// Search term parsing and predicate evaluation.
///
/// A search term optionally starts with an operator token; the remainder is
/// the operand. Numeric-class fields only answer relational and equality
/// operators, text-class fields only text operators, and a mismatch simply
/// excludes the record. The `~` operator adds a fuzzy match with edit
/// distance <= 2.
use crate::coerce::{Comparable, coerce};
use crate::field::Field;
use crate::record::{RawValue, Record};

/// Search operator, classified from the term's leading token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOp {
    /// `+` substring contains.
    Contains,
    /// `-` substring absent.
    Excludes,
    /// `=` equality.
    Eq,
    /// `!=` inequality.
    Ne,
    /// `>` greater-than (numeric fields only).
    Gt,
    /// `<` less-than (numeric fields only).
    Lt,
    /// `~` substring contains or fuzzy match.
    Fuzzy,
    /// No recognized token: starts-with.
    StartsWith,
}

/// Operator tokens in match order. `!=` must precede every single-character
/// token so `!=x` never classifies as `Excludes`.
const OPERATORS: [(&str, SearchOp); 7] = [
    ("!=", SearchOp::Ne),
    ("+", SearchOp::Contains),
    ("-", SearchOp::Excludes),
    ("=", SearchOp::Eq),
    (">", SearchOp::Gt),
    ("<", SearchOp::Lt),
    ("~", SearchOp::Fuzzy),
];

/// Split a search term into its operator and trimmed operand.
pub fn parse_term(term: &str) -> (SearchOp, &str) {
    for (token, op) in OPERATORS {
        if let Some(rest) = term.strip_prefix(token) {
            return (op, rest.trim());
        }
    }
    (SearchOp::StartsWith, term.trim())
}

/// Evaluate the predicate for one record.
pub fn matches(record: &Record, field: Field, op: SearchOp, operand: &str) -> bool {
    let raw = record.resolve(field.path());
    if field.is_numeric() {
        let lhs = match coerce(&raw, field) {
            Comparable::Number(n) => n,
            _ => return false,
        };
        let rhs: f64 = match operand.trim().parse() {
            Ok(n) => n,
            Err(_) => return false,
        };
        match op {
            SearchOp::Eq => lhs == rhs,
            SearchOp::Ne => lhs != rhs,
            SearchOp::Gt => lhs > rhs,
            SearchOp::Lt => lhs < rhs,
            // Text operators never match a numeric field.
            SearchOp::Contains | SearchOp::Excludes | SearchOp::Fuzzy | SearchOp::StartsWith => {
                false
            }
        }
    } else {
        let lhs = match raw {
            RawValue::Text(s) => s.to_lowercase(),
            RawValue::Number(n) => n.to_string(),
            // An absent value contains nothing and equals nothing.
            RawValue::Missing => return matches!(op, SearchOp::Excludes | SearchOp::Ne),
        };
        let rhs = operand.to_lowercase();
        match op {
            SearchOp::Contains => lhs.contains(&rhs),
            SearchOp::Excludes => !lhs.contains(&rhs),
            SearchOp::Eq => lhs == rhs,
            SearchOp::Ne => lhs != rhs,
            SearchOp::Fuzzy => lhs.contains(&rhs) || levenshtein(&lhs, &rhs) <= 2,
            SearchOp::StartsWith => lhs.starts_with(&rhs),
            // Relational operators require a numeric field.
            SearchOp::Gt | SearchOp::Lt => false,
        }
    }
}

/// Filter a collection by search key and term, preserving input order.
///
/// An empty term or an unknown key yields the collection unchanged.
pub fn filter_records<'a>(records: &'a [Record], key: &str, term: &str) -> Vec<&'a Record> {
    let term = term.trim();
    if term.is_empty() {
        return records.iter().collect();
    }
    let field = match Field::from_key(key) {
        Some(f) => f,
        None => return records.iter().collect(),
    };
    let (op, operand) = parse_term(term);
    records
        .iter()
        .filter(|r| matches(r, field, op, operand))
        .collect()
}

/// Classic edit distance: unit-cost insert, delete, substitute.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j]
            } else {
                prev[j].min(prev[j + 1]).min(curr[j]) + 1
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::load_records;

    fn fixture() -> Vec<Record> {
        let data = r#"[
            {"name": "Batman", "slug": "70-batman",
             "powerstats": {"strength": 26},
             "biography": {"fullName": "Bruce Wayne", "alignment": "good"},
             "appearance": {"height": ["6'2", "188 cm"], "weight": ["210 lb", "95 kg"], "race": "Human"}},
            {"name": "Superman", "slug": "644-superman",
             "powerstats": {"strength": 100},
             "biography": {"fullName": "Clark Kent", "alignment": "good"},
             "appearance": {"height": ["6'3", "191 cm"], "weight": ["225 lb", "101 kg"], "race": "Kryptonian"}},
            {"name": "Ant-Man", "slug": "30-ant-man",
             "powerstats": {"strength": "n/a"},
             "biography": {"fullName": "Hank Pym", "alignment": "neutral"},
             "appearance": {"height": ["-", "0 cm"], "weight": ["-", "0 kg"], "race": ""}}
        ]"#;
        load_records(data.as_bytes()).unwrap()
    }

    fn names(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn operator_classification() {
        assert_eq!(parse_term("!=50"), (SearchOp::Ne, "50"));
        assert_eq!(parse_term("=bat"), (SearchOp::Eq, "bat"));
        assert_eq!(parse_term(">50"), (SearchOp::Gt, "50"));
        assert_eq!(parse_term("< 50"), (SearchOp::Lt, "50"));
        assert_eq!(parse_term("+man"), (SearchOp::Contains, "man"));
        assert_eq!(parse_term("-man"), (SearchOp::Excludes, "man"));
        assert_eq!(parse_term("~batmen"), (SearchOp::Fuzzy, "batmen"));
        assert_eq!(parse_term("bat"), (SearchOp::StartsWith, "bat"));
    }

    #[test]
    fn numeric_greater_than() {
        let records = fixture();
        let hits = filter_records(&records, "strength", ">50");
        assert_eq!(names(&hits), ["Superman"]);
    }

    #[test]
    fn numeric_excludes_unparsable() {
        let records = fixture();
        // Ant-Man's strength is non-numeric, so != cannot include it.
        let hits = filter_records(&records, "strength", "!=26");
        assert_eq!(names(&hits), ["Superman"]);
    }

    #[test]
    fn unparsable_operand_excludes_everything() {
        let records = fixture();
        assert!(filter_records(&records, "strength", ">lots").is_empty());
    }

    #[test]
    fn text_operator_on_numeric_field_excludes() {
        let records = fixture();
        assert!(filter_records(&records, "strength", "+26").is_empty());
        assert!(filter_records(&records, "strength", "~26").is_empty());
        assert!(filter_records(&records, "strength", "26").is_empty());
    }

    #[test]
    fn relational_on_text_field_excludes() {
        let records = fixture();
        assert!(filter_records(&records, "name", ">a").is_empty());
    }

    #[test]
    fn weight_search_uses_kilograms() {
        let records = fixture();
        let hits = filter_records(&records, "weight", ">100");
        assert_eq!(names(&hits), ["Superman"]);
    }

    #[test]
    fn height_search_excludes_zero_sentinel() {
        let records = fixture();
        // Ant-Man's "0 cm" resolves as missing, so no operator reaches it.
        let hits = filter_records(&records, "height", "<1000");
        assert_eq!(names(&hits), ["Batman", "Superman"]);
    }

    #[test]
    fn default_starts_with() {
        let records = fixture();
        let hits = filter_records(&records, "name", "bat");
        assert_eq!(names(&hits), ["Batman"]);
    }

    #[test]
    fn contains_and_excludes() {
        let records = fixture();
        assert_eq!(names(&filter_records(&records, "name", "+man")), [
            "Batman",
            "Superman",
            "Ant-Man"
        ]);
        assert_eq!(names(&filter_records(&records, "name", "-man")), Vec::<String>::new());
        assert_eq!(names(&filter_records(&records, "full_name", "-kent")), [
            "Batman", "Ant-Man"
        ]);
    }

    #[test]
    fn fuzzy_includes_small_typos() {
        let records = fixture();
        let hits = filter_records(&records, "name", "~batmen");
        assert_eq!(names(&hits), ["Batman"]);
        // distance > 2 from every name
        assert!(filter_records(&records, "name", "~zzzzzz").is_empty());
    }

    #[test]
    fn missing_text_matches_only_negative_operators() {
        let records = fixture();
        // Ant-Man's race is empty, normalized to missing.
        assert_eq!(names(&filter_records(&records, "race", "-human")), [
            "Superman", "Ant-Man"
        ]);
        assert_eq!(names(&filter_records(&records, "race", "+a")), [
            "Batman", "Superman"
        ]);
    }

    #[test]
    fn empty_term_and_unknown_key_pass_through() {
        let records = fixture();
        assert_eq!(filter_records(&records, "name", "").len(), 3);
        assert_eq!(filter_records(&records, "name", "   ").len(), 3);
        assert_eq!(filter_records(&records, "sidekick", "bat").len(), 3);
    }

    #[test]
    fn edit_distance() {
        assert_eq!(levenshtein("batman", "batmen"), 1);
        assert_eq!(levenshtein("batman", "batman"), 0);
        assert_eq!(levenshtein("batman", ""), 6);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }
}
