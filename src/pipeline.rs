/// Query state and the filter -> sort -> paginate pipeline.
///
/// `QueryPipeline` owns the one cached copy of the record collection plus
/// the session's query state, and exposes the user interactions as explicit
/// transitions. Every transition keeps the invariants: the page index stays
/// in `[1, total_pages]`, the filtered set (once a search is active) is the
/// base for sorting and pagination, and sorting is stable.
use crate::coerce::{Comparable, SortOrder, compare, sort_key};
use crate::field::Field;
use crate::record::Record;
use crate::search::{matches, parse_term};

/// Page sizes selectable in the view.
pub const ALLOWED_PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// Number of records per page, or the whole set at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Limit(usize),
    All,
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Limit(20)
    }
}

impl PageSize {
    /// Parse and validate a `pageSize` parameter. Values outside the
    /// allowed set are rejected so the codec can fall back to the default.
    pub fn from_param(s: &str) -> Option<PageSize> {
        if s.eq_ignore_ascii_case("all") {
            return Some(PageSize::All);
        }
        let n: usize = s.parse().ok()?;
        ALLOWED_PAGE_SIZES.contains(&n).then_some(PageSize::Limit(n))
    }

    pub fn as_param(&self) -> String {
        match self {
            PageSize::Limit(n) => n.to_string(),
            PageSize::All => "all".to_string(),
        }
    }

    /// `ceil(len / size)`, at least 1; a single page when `All`.
    pub fn total_pages(&self, len: usize) -> usize {
        match self {
            PageSize::All => 1,
            PageSize::Limit(n) => len.div_ceil(*n).max(1),
        }
    }
}

/// The session-lifetime view configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub search_term: String,
    /// User-facing search key (`"strength"`, `"full_name"`, ...). Kept as
    /// typed by the user; unknown keys make the filter a pass-through.
    pub search_field: String,
    pub sort_column: Option<Field>,
    pub sort_order: SortOrder,
    /// 1-based.
    pub page_index: usize,
    pub page_size: PageSize,
}

impl Default for QueryState {
    fn default() -> Self {
        QueryState {
            search_term: String::new(),
            search_field: String::new(),
            sort_column: Some(Field::Name),
            sort_order: SortOrder::Asc,
            page_index: 1,
            page_size: PageSize::default(),
        }
    }
}

/// One renderable page of the current view.
#[derive(Debug)]
pub struct PageView<'a> {
    pub records: Vec<&'a Record>,
    pub page_index: usize,
    pub total_pages: usize,
    /// Size of the current base set (filtered when a search is active).
    pub total_records: usize,
}

/// Owns the cached collection and the query state.
///
/// The collection is loaded once and reused across interactions; only an
/// explicit reload replaces it.
#[derive(Debug)]
pub struct QueryPipeline {
    records: Vec<Record>,
    /// Indices into `records` matching the active search, input order
    /// preserved. `None` while no search is active.
    filtered: Option<Vec<usize>>,
    state: QueryState,
}

impl QueryPipeline {
    pub fn new(records: Vec<Record>) -> Self {
        Self::with_state(records, QueryState::default())
    }

    /// Start from a restored state: an active search in the state is
    /// re-applied before the first page is produced.
    pub fn with_state(records: Vec<Record>, state: QueryState) -> Self {
        let mut pipeline = QueryPipeline {
            records,
            filtered: None,
            state,
        };
        pipeline.refilter();
        pipeline
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Replace the cached collection (explicit reload). The active search
    /// is re-applied against the new data.
    pub fn reload(&mut self, records: Vec<Record>) {
        self.records = records;
        self.refilter();
    }

    /// Search keystroke: filter the full collection by the new term and
    /// jump back to the first page.
    pub fn set_search(&mut self, field_key: &str, term: &str) {
        self.state.search_field = field_key.to_string();
        self.state.search_term = term.to_string();
        self.state.page_index = 1;
        self.refilter();
    }

    /// Header click: toggle to descending when the column is already the
    /// ascending sort column, otherwise sort the new column ascending.
    pub fn click_column(&mut self, column: Field) {
        if self.state.sort_column == Some(column) && self.state.sort_order == SortOrder::Asc {
            self.state.sort_order = SortOrder::Desc;
        } else {
            self.state.sort_column = Some(column);
            self.state.sort_order = SortOrder::Asc;
        }
    }

    /// Page-size change resets to the first page.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.state.page_size = size;
        self.state.page_index = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.page_index = page.clamp(1, self.total_pages());
    }

    /// Silent no-op on the last page.
    pub fn next_page(&mut self) {
        if self.state.page_index < self.total_pages() {
            self.state.page_index += 1;
        }
    }

    /// Silent no-op on the first page.
    pub fn prev_page(&mut self) {
        if self.state.page_index > 1 {
            self.state.page_index -= 1;
        }
    }

    fn base_len(&self) -> usize {
        self.filtered.as_ref().map_or(self.records.len(), Vec::len)
    }

    fn total_pages(&self) -> usize {
        self.state.page_size.total_pages(self.base_len())
    }

    fn refilter(&mut self) {
        let term = self.state.search_term.trim();
        if term.is_empty() {
            self.filtered = None;
            return;
        }
        let field = match Field::from_key(&self.state.search_field) {
            Some(f) => f,
            // Unknown key: the filter is a pass-through.
            None => {
                self.filtered = None;
                return;
            }
        };
        let (op, operand) = parse_term(term);
        self.filtered = Some(
            (0..self.records.len())
                .filter(|&i| matches(&self.records[i], field, op, operand))
                .collect(),
        );
    }

    /// Produce the current page: base set, stable sort, clamp, slice.
    pub fn current_page(&mut self) -> PageView<'_> {
        let base: Vec<&Record> = match &self.filtered {
            Some(indices) => indices.iter().map(|&i| &self.records[i]).collect(),
            None => self.records.iter().collect(),
        };

        let ordered: Vec<&Record> = match self.state.sort_column {
            Some(column) => {
                let mut keyed: Vec<(Comparable, &Record)> =
                    base.into_iter().map(|r| (sort_key(r, column), r)).collect();
                // Stable: comparator-equal records keep their input order.
                keyed.sort_by(|a, b| compare(&a.0, &b.0, self.state.sort_order));
                keyed.into_iter().map(|(_, r)| r).collect()
            }
            None => base,
        };

        let total_records = ordered.len();
        let total_pages = self.state.page_size.total_pages(total_records);
        self.state.page_index = self.state.page_index.clamp(1, total_pages);

        let (start, end) = match self.state.page_size {
            PageSize::All => (0, total_records),
            PageSize::Limit(n) => {
                let start = (self.state.page_index - 1) * n;
                (start.min(total_records), (start + n).min(total_records))
            }
        };

        PageView {
            records: ordered[start..end].to_vec(),
            page_index: self.state.page_index,
            total_pages,
            total_records,
        }
    }
}
