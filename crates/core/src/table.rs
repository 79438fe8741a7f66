//! Table stages — pure filter, sort, and pagination functions over record
//! slices, plus the descriptor types shared with the rendering layer.
//!
//! Each stage is a pure function of an explicit snapshot of its inputs so the
//! filter→sort→page pipeline can be recomputed deterministically on any input
//! change; there are no hidden caches to fall out of sync.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde_json::Value;

use crate::record::{parse_date_prefix, Record};

// ---------------------------------------------------------------------------
// Descriptor types
// ---------------------------------------------------------------------------

/// Sort direction for the single active sort key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The active sort: one key, one direction. Ties keep their relative order
/// from the filtered view (stable sort).
#[derive(Clone, Debug, PartialEq)]
pub struct SortStatus {
    pub key: String,
    pub direction: SortDirection,
}

impl SortStatus {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self { key: key.into(), direction: SortDirection::Ascending }
    }
}

/// An inclusive calendar date range. Both endpoints must be present before
/// the range filters anything; a half-picked range is "not yet complete" and
/// is skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Both endpoints, when the range is complete.
    pub fn complete(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Field keys the filter stage operates on: the free-text search key and the
/// timestamp key for the date-range predicate.
#[derive(Clone, Debug, PartialEq)]
pub struct TableKeys {
    pub search: String,
    pub date: String,
}

impl Default for TableKeys {
    fn default() -> Self {
        Self { search: "leadId".to_string(), date: "date".to_string() }
    }
}

/// Column descriptor handed to the rendering layer. `render` is a pure
/// projection of the record; columns never mutate rows.
#[derive(Clone, PartialEq)]
pub struct Column {
    pub key: String,
    pub title: String,
    pub sortable: bool,
    pub render: Option<fn(&Record) -> String>,
}

impl Column {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self { key: key.into(), title: title.into(), sortable: false, render: None }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn render(mut self, render: fn(&Record) -> String) -> Self {
        self.render = Some(render);
        self
    }
}

// ---------------------------------------------------------------------------
// Filter stage
// ---------------------------------------------------------------------------

/// Derive the filtered view: case-insensitive substring match of `search`
/// against the search key, ANDed with the inclusive date-range predicate on
/// the timestamp key. Empty search matches everything; an incomplete range
/// skips the date predicate entirely.
///
/// Records whose timestamp is missing or unparseable are excluded while a
/// date filter is active (fail-closed, for deterministic results).
pub fn filter_records(
    raw: &[Record],
    search: &str,
    range: &DateRange,
    keys: &TableKeys,
) -> Vec<Record> {
    let needle = search.trim().to_lowercase();
    let bounds = range.complete();

    raw.iter()
        .filter(|record| {
            let matches_search = needle.is_empty()
                || record.text(&keys.search).to_lowercase().contains(&needle);

            let matches_date = match bounds {
                None => true,
                Some((start, end)) => record
                    .field(&keys.date)
                    .and_then(Value::as_str)
                    .and_then(parse_date_prefix)
                    .map(|date| date >= start && date <= end)
                    .unwrap_or(false),
            };

            matches_search && matches_date
        })
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Sort stage
// ---------------------------------------------------------------------------

/// Three-way comparison on two present field values: numeric when both are
/// numbers, chronological when both carry an ISO date prefix, lexicographic
/// when both are strings. Mixed types fall back to their display form so the
/// order is still total.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    if let (Some(x), Some(y)) = (a.as_str(), b.as_str()) {
        if let (Some(dx), Some(dy)) = (parse_date_prefix(x), parse_date_prefix(y)) {
            return dx.cmp(&dy);
        }
        return x.cmp(y);
    }
    a.to_string().cmp(&b.to_string())
}

/// Derive the ordered view: a stable permutation of the filtered view by the
/// active sort key and direction. Records without the sort key ("nulls")
/// order after all present values regardless of direction.
pub fn sort_records(filtered: &[Record], status: &SortStatus) -> Vec<Record> {
    let mut ordered = filtered.to_vec();
    ordered.sort_by(|a, b| {
        match (a.field(&status.key), b.field(&status.key)) {
            (Some(x), Some(y)) => {
                let ord = compare_values(x, y);
                match status.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
            // Nulls last, independent of direction.
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    ordered
}

// ---------------------------------------------------------------------------
// Page stage
// ---------------------------------------------------------------------------

/// Derive the visible slice: `ordered[(page-1)·size .. page·size)` clipped to
/// the available length. Pages are 1-based; an out-of-range page yields the
/// empty slice rather than an error.
pub fn paginate(ordered: &[Record], page: usize, page_size: usize) -> &[Record] {
    if page_size == 0 {
        return &[];
    }
    let page = page.max(1);
    let from = (page - 1).saturating_mul(page_size);
    if from >= ordered.len() {
        return &[];
    }
    let to = (from + page_size).min(ordered.len());
    &ordered[from..to]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn lead(id: &str, date: &str) -> Record {
        record(&[("leadId", json!(id)), ("date", json!(date))])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn keys() -> TableKeys {
        TableKeys::default()
    }

    // -- filter --

    #[test]
    fn empty_search_and_empty_range_match_everything() {
        let raw = vec![lead("L0001", "2024-01-01"), lead("L0002", "2024-01-02")];
        let filtered = filter_records(&raw, "", &DateRange::default(), &keys());
        assert_eq!(filtered, raw);
    }

    #[test]
    fn search_is_case_insensitive_substring_on_the_search_key() {
        let raw = vec![lead("L0005", "2024-01-01"), lead("L0100", "2024-01-01")];
        let filtered = filter_records(&raw, "l00", &DateRange::default(), &keys());
        assert_eq!(filtered.len(), 2);
        let filtered = filter_records(&raw, "L01", &DateRange::default(), &keys());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text("leadId"), "L0100");
    }

    #[test]
    fn search_l005_over_120_leads_matches_exactly_11() {
        // L0005 plus L0050..L0059 contain the substring "L005".
        let raw: Vec<Record> =
            (1..=120).map(|i| lead(&format!("L{i:04}"), "2024-01-01")).collect();
        let filtered = filter_records(&raw, "L005", &DateRange::default(), &keys());
        assert_eq!(filtered.len(), 11);
        assert!(filtered
            .iter()
            .all(|r| r.text("leadId").to_lowercase().contains("l005")));
        // With page size 50, page 1 shows all of them.
        assert_eq!(paginate(&filtered, 1, 50).len(), 11);
    }

    #[test]
    fn filtered_view_preserves_raw_order() {
        let raw = vec![lead("L0003", "2024-01-01"), lead("L0001", "2024-01-01"), lead("L0002", "2024-01-01")];
        let filtered = filter_records(&raw, "L000", &DateRange::default(), &keys());
        let ids: Vec<String> = filtered.iter().map(|r| r.text("leadId")).collect();
        assert_eq!(ids, vec!["L0003", "L0001", "L0002"]);
    }

    #[test]
    fn date_range_is_inclusive_on_both_endpoints() {
        let raw = vec![
            lead("L0001", "2024-04-30"),
            lead("L0002", "2024-05-01"),
            lead("L0003", "2024-05-15"),
            lead("L0004", "2024-05-31"),
            lead("L0005", "2024-06-01"),
        ];
        let range = DateRange::new(Some(date(2024, 5, 1)), Some(date(2024, 5, 31)));
        let filtered = filter_records(&raw, "", &range, &keys());
        let ids: Vec<String> = filtered.iter().map(|r| r.text("leadId")).collect();
        assert_eq!(ids, vec!["L0002", "L0003", "L0004"]);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let raw = vec![lead("L0001", "2024-05-15")];
        let range = DateRange::new(Some(date(2024, 6, 1)), Some(date(2024, 5, 1)));
        assert!(filter_records(&raw, "", &range, &keys()).is_empty());
    }

    #[test]
    fn incomplete_range_skips_the_date_predicate() {
        let raw = vec![lead("L0001", "2024-05-15"), lead("L0002", "not a date")];
        let range = DateRange::new(Some(date(2024, 1, 1)), None);
        assert_eq!(filter_records(&raw, "", &range, &keys()).len(), 2);
    }

    #[test]
    fn unparseable_dates_fail_closed_while_a_range_is_active() {
        let raw = vec![
            lead("L0001", "2024-05-15"),
            lead("L0002", "garbage"),
            record(&[("leadId", json!("L0003"))]),
        ];
        let range = DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 12, 31)));
        let filtered = filter_records(&raw, "", &range, &keys());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text("leadId"), "L0001");
    }

    #[test]
    fn search_and_date_predicates_are_anded() {
        let raw = vec![lead("L0005", "2024-05-15"), lead("L0005", "2024-07-01")];
        let range = DateRange::new(Some(date(2024, 5, 1)), Some(date(2024, 5, 31)));
        let filtered = filter_records(&raw, "L005", &range, &keys());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text("date"), "2024-05-15");
    }

    // -- sort --

    #[test]
    fn numeric_fields_sort_numerically_not_lexicographically() {
        let raw = vec![
            record(&[("id", json!(1)), ("monthlyIncome", json!(11))]),
            record(&[("id", json!(2)), ("monthlyIncome", json!(9))]),
        ];
        let ordered = sort_records(&raw, &SortStatus::ascending("monthlyIncome"));
        assert_eq!(ordered[0].text("monthlyIncome"), "9");
        assert_eq!(ordered[1].text("monthlyIncome"), "11");
    }

    #[test]
    fn date_shaped_strings_sort_chronologically() {
        let raw = vec![
            record(&[("id", json!(1)), ("createdAt", json!("2024-12-01"))]),
            record(&[("id", json!(2)), ("createdAt", json!("2024-02-15"))]),
        ];
        let ordered = sort_records(&raw, &SortStatus::ascending("createdAt"));
        assert_eq!(ordered[0].text("createdAt"), "2024-02-15");
    }

    #[test]
    fn descending_reverses_the_comparator() {
        let raw = vec![
            record(&[("id", json!(1)), ("leadId", json!("L0001"))]),
            record(&[("id", json!(2)), ("leadId", json!("L0002"))]),
        ];
        let status = SortStatus { key: "leadId".into(), direction: SortDirection::Descending };
        let ordered = sort_records(&raw, &status);
        assert_eq!(ordered[0].text("leadId"), "L0002");
    }

    #[test]
    fn sort_is_stable_on_equal_keys() {
        // Same lender, distinct ids — relative order must survive the sort,
        // and reversing direction twice must reproduce it exactly.
        let raw: Vec<Record> = (1..=5)
            .map(|i| record(&[("id", json!(i)), ("lenderName", json!("Acme"))]))
            .collect();
        let asc = sort_records(&raw, &SortStatus::ascending("lenderName"));
        assert_eq!(asc, raw, "equal keys must keep input order");

        let desc = sort_records(
            &asc,
            &SortStatus { key: "lenderName".into(), direction: SortDirection::Descending },
        );
        let asc_again = sort_records(&desc, &SortStatus::ascending("lenderName"));
        assert_eq!(asc_again, raw, "double reversal must restore the original order");
    }

    #[test]
    fn missing_sort_keys_order_last_in_both_directions() {
        let with_key = record(&[("id", json!(1)), ("lenderName", json!("Acme"))]);
        let without_key = record(&[("id", json!(2))]);
        let null_key = record(&[("id", json!(3)), ("lenderName", Value::Null)]);
        let raw = vec![without_key.clone(), with_key.clone(), null_key.clone()];

        let asc = sort_records(&raw, &SortStatus::ascending("lenderName"));
        assert_eq!(asc[0], with_key);

        let desc = sort_records(
            &raw,
            &SortStatus { key: "lenderName".into(), direction: SortDirection::Descending },
        );
        assert_eq!(desc[0], with_key, "nulls stay last even when descending");
    }

    #[test]
    fn sorting_preserves_cardinality() {
        let raw: Vec<Record> =
            (1..=7).map(|i| record(&[("id", json!(8 - i))])).collect();
        let ordered = sort_records(&raw, &SortStatus::ascending("id"));
        assert_eq!(ordered.len(), raw.len());
    }

    // -- paginate --

    #[test]
    fn paginate_slices_one_based_pages() {
        let raw: Vec<Record> = (1..=25).map(|i| record(&[("id", json!(i))])).collect();
        assert_eq!(paginate(&raw, 1, 10).len(), 10);
        assert_eq!(paginate(&raw, 3, 10).len(), 5);
        assert_eq!(paginate(&raw, 2, 10)[0].text("id"), "11");
    }

    #[test]
    fn paginate_never_exceeds_page_size() {
        let raw: Vec<Record> = (1..=25).map(|i| record(&[("id", json!(i))])).collect();
        for page in 1..=5 {
            assert!(paginate(&raw, page, 10).len() <= 10);
        }
    }

    #[test]
    fn out_of_range_page_yields_empty_not_error() {
        let raw: Vec<Record> = (1..=25).map(|i| record(&[("id", json!(i))])).collect();
        assert!(paginate(&raw, 4, 10).is_empty());
        assert!(paginate(&raw, 1000, 10).is_empty());
        assert!(paginate(&[], 1, 10).is_empty());
    }

    #[test]
    fn page_zero_is_clamped_to_the_first_page() {
        let raw: Vec<Record> = (1..=5).map(|i| record(&[("id", json!(i))])).collect();
        assert_eq!(paginate(&raw, 0, 2), paginate(&raw, 1, 2));
    }
}
