//! Tabular data engine — holds the committed table inputs and derives a
//! consistent view snapshot by chaining the pure stages.
//!
//! The engine is single-threaded and event-driven: setters commit one input
//! change each, and [`TableEngine::view`] recomputes filter→sort→page over
//! the committed inputs in one pass, so no stage can observe a mixture of
//! old and new inputs.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::record::Record;
use crate::table::{
    filter_records, paginate, sort_records, DateRange, SortDirection, SortStatus, TableKeys,
};

/// Page size choices offered by the pager.
pub const PAGE_SIZES: &[usize] = &[50];

/// Ticket identifying one dispatched remote-refinement request. Tickets are
/// strictly increasing; only the most recently issued one may commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefineTicket(u64);

/// One derived snapshot of the table: the visible slice plus everything the
/// rendering layer needs for headers, the pager, and selection marks.
#[derive(Clone, Debug, PartialEq)]
pub struct TableView {
    pub visible_records: Vec<Record>,
    /// Cardinality of the filtered (not raw) view — "Showing X to Y of Z"
    /// labels count filtered records.
    pub total_filtered: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_sizes: Vec<usize>,
    pub sort: SortStatus,
    pub selected: HashSet<String>,
}

impl TableView {
    /// 1-based index of the first visible record, 0 when the view is empty.
    pub fn showing_from(&self) -> usize {
        if self.visible_records.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last visible record, 0 when the view is empty.
    pub fn showing_to(&self) -> usize {
        if self.visible_records.is_empty() {
            0
        } else {
            self.showing_from() + self.visible_records.len() - 1
        }
    }

    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total_filtered.div_ceil(self.page_size)
        }
    }
}

/// The record browser's state machine: raw dataset, filter/sort/page inputs,
/// selection, and the refinement sequence counter.
#[derive(Clone, Debug, PartialEq)]
pub struct TableEngine {
    keys: TableKeys,
    page_sizes: Vec<usize>,
    raw: Vec<Record>,
    search: String,
    date_range: DateRange,
    sort: SortStatus,
    page: usize,
    page_size: usize,
    selected: HashSet<String>,
    refine_seq: u64,
}

impl TableEngine {
    pub fn new(keys: TableKeys) -> Self {
        Self {
            keys,
            page_sizes: PAGE_SIZES.to_vec(),
            raw: Vec::new(),
            search: String::new(),
            date_range: DateRange::default(),
            sort: SortStatus::ascending("id"),
            page: 1,
            page_size: PAGE_SIZES[0],
            selected: HashSet::new(),
            refine_seq: 0,
        }
    }

    /// Override the page size option set. The first option becomes active.
    pub fn with_page_sizes(mut self, sizes: &[usize]) -> Self {
        if let Some(&first) = sizes.first() {
            self.page_sizes = sizes.to_vec();
            self.page_size = first;
        }
        self
    }

    // -- input commits ------------------------------------------------------

    /// Replace the raw dataset wholesale (caller prop change). Resets to the
    /// first page so a shrunken result set cannot strand the user on an
    /// empty page.
    pub fn set_records(&mut self, rows: Vec<Record>) {
        self.raw = rows;
        self.page = 1;
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 1;
    }

    /// Commit a new date range and reset to the first page. Returns the
    /// endpoints when the range just became complete — the caller's cue to
    /// dispatch a remote refinement. Incomplete or cleared ranges never
    /// trigger a fetch.
    pub fn set_date_range(&mut self, range: DateRange) -> Option<(NaiveDate, NaiveDate)> {
        let previous = self.date_range.complete();
        self.date_range = range;
        self.page = 1;
        match range.complete() {
            Some(bounds) if Some(bounds) != previous => Some(bounds),
            _ => None,
        }
    }

    /// Change the active sort. Deliberately does not touch the page: sorting
    /// within the current result set keeps the user positioned.
    pub fn set_sort(&mut self, sort: SortStatus) {
        self.sort = sort;
    }

    /// Header-click behavior: same key flips direction, new key starts
    /// ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        if self.sort.key == key {
            self.sort.direction = self.sort.direction.toggled();
        } else {
            self.sort = SortStatus::ascending(key);
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Switch page size; unknown sizes are ignored. Back to the first page
    /// since the old index is meaningless under a new slice width.
    pub fn set_page_size(&mut self, size: usize) {
        if self.page_sizes.contains(&size) {
            self.page_size = size;
            self.page = 1;
        }
    }

    // -- selection ----------------------------------------------------------

    /// Toggle a record's membership in the selection. Selection is keyed by
    /// record identity, not array position, so it survives re-sorting,
    /// pagination, and dataset refreshes.
    pub fn toggle_selected(&mut self, record: &Record) {
        let key = record.identity();
        if !self.selected.insert(key.clone()) {
            self.selected.remove(&key);
        }
    }

    pub fn is_selected(&self, record: &Record) -> bool {
        self.selected.contains(&record.identity())
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // -- remote refinement --------------------------------------------------

    /// Register a new refinement dispatch. Any ticket issued earlier is now
    /// stale and its result will be discarded on commit.
    pub fn begin_refine(&mut self) -> RefineTicket {
        self.refine_seq += 1;
        RefineTicket(self.refine_seq)
    }

    /// Apply a refinement result. Only the latest dispatched ticket wins: a
    /// slow response that was superseded by a newer request is dropped, and
    /// the dataset keeps its last-good contents. Returns whether the rows
    /// were applied.
    pub fn commit_refine(&mut self, ticket: RefineTicket, rows: Vec<Record>) -> bool {
        if ticket.0 != self.refine_seq {
            debug!(
                ticket = ticket.0,
                latest = self.refine_seq,
                "discarding stale refinement result"
            );
            return false;
        }
        self.raw = rows;
        self.page = 1;
        true
    }

    // -- accessors ----------------------------------------------------------

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn sort(&self) -> &SortStatus {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn raw_records(&self) -> &[Record] {
        &self.raw
    }

    // -- derivation ---------------------------------------------------------

    /// Run the full pipeline over the committed inputs and return one
    /// consistent snapshot.
    pub fn view(&self) -> TableView {
        let filtered = filter_records(&self.raw, &self.search, &self.date_range, &self.keys);
        let ordered = sort_records(&filtered, &self.sort);
        let visible_records = paginate(&ordered, self.page, self.page_size).to_vec();
        TableView {
            visible_records,
            total_filtered: ordered.len(),
            page: self.page,
            page_size: self.page_size,
            page_sizes: self.page_sizes.clone(),
            sort: self.sort.clone(),
            selected: self.selected.clone(),
        }
    }
}
