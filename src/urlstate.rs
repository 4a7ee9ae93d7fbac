/// Query-string codec for the view state.
///
/// `encode` writes the `search, field, sort, order, page, pageSize`
/// parameters (only the ones that carry a value); `decode` restores a
/// state from such a string, falling back to defaults for anything absent
/// or invalid. The CLI prints the encoded string after every render, so a
/// view is shareable and restorable by passing it back via `--state`.
use crate::coerce::SortOrder;
use crate::field::Field;
use crate::pipeline::{PageSize, QueryState};

/// Serialize the state as a percent-encoded query string.
///
/// `search`/`field` are emitted only for a non-empty search, and
/// `sort`/`order` only when a sort column is active.
pub fn encode(state: &QueryState) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if !state.search_term.is_empty() && !state.search_field.is_empty() {
        pairs.push(("search", state.search_term.clone()));
        pairs.push(("field", state.search_field.clone()));
    }
    if let Some(column) = state.sort_column {
        pairs.push(("sort", column.path().to_string()));
        pairs.push(("order", state.sort_order.as_param().to_string()));
    }
    pairs.push(("page", state.page_index.to_string()));
    pairs.push(("pageSize", state.page_size.as_param()));

    pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Restore a state from a query string. A leading `?` is tolerated.
///
/// Unknown keys are ignored; `page` falls back to 1 and `pageSize` to 20
/// when they don't validate. When `search` and `field` are both present
/// and no `sort` was independently specified, the searched field becomes
/// the active sort column.
pub fn decode(query: &str) -> QueryState {
    let mut state = QueryState::default();
    let mut sort_given = false;
    let mut search = None;
    let mut field = None;

    for pair in query.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let Ok(value) = urlencoding::decode(value) else {
            continue;
        };
        match key {
            "search" => search = Some(value.into_owned()),
            "field" => field = Some(value.into_owned()),
            "sort" => {
                // Unknown columns leave the view unsorted (pass-through).
                state.sort_column = Field::from_path(&value);
                sort_given = true;
            }
            "order" => state.sort_order = SortOrder::from_param(&value),
            "page" => {
                state.page_index = value.parse().ok().filter(|&n| n >= 1).unwrap_or(1);
            }
            "pageSize" => {
                state.page_size = PageSize::from_param(&value).unwrap_or_default();
            }
            _ => {}
        }
    }

    if let (Some(term), Some(key)) = (search, field) {
        if !sort_given && let Some(column) = Field::from_key(&key) {
            state.sort_column = Some(column);
        }
        state.search_term = term;
        state.search_field = key;
    }

    state
}
