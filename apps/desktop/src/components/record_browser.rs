//! Generic record browser — the reusable table over any record set, wiring
//! the core engine to search, date-range refinement, sortable headers,
//! selection checkboxes, and pagination.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::NaiveDate;
use dioxus::prelude::*;
use lendscope_api::ApiError;
use lendscope_core::engine::TableEngine;
use lendscope_core::record::{display_value, Record};
use lendscope_core::table::{Column, DateRange, SortDirection, TableKeys};
use tracing::warn;

use super::filter_bar::FilterBar;
use super::pagination::Pagination;
use crate::app::Route;

/// Boxed future produced by a refinement fetcher.
pub type RefineFuture = Pin<Box<dyn Future<Output = Result<Vec<Record>, ApiError>>>>;

/// Injected remote refinement fetch: resolves a complete `[from, to]` date
/// range to replacement rows, or fails leaving the table untouched.
#[derive(Clone)]
pub struct RefineFn(Arc<dyn Fn(NaiveDate, NaiveDate) -> RefineFuture>);

impl RefineFn {
    pub fn new(fetch: impl Fn(NaiveDate, NaiveDate) -> RefineFuture + 'static) -> Self {
        Self(Arc::new(fetch))
    }

    fn call(&self, from: NaiveDate, to: NaiveDate) -> RefineFuture {
        (self.0)(from, to)
    }
}

impl PartialEq for RefineFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Trailing per-row action column: a link whose target is derived from the
/// record (e.g. "View Offers" for a loan lead).
#[derive(Clone, PartialEq)]
pub struct RowAction {
    pub label: &'static str,
    pub target: fn(&Record) -> Route,
}

#[component]
pub fn RecordBrowser(
    records: ReadOnlySignal<Vec<Record>>,
    columns: Vec<Column>,
    refine: Option<RefineFn>,
    row_action: Option<RowAction>,
    create_path: Option<Route>,
) -> Element {
    let mut engine = use_signal(|| TableEngine::new(TableKeys::default()));

    // Adopt the caller's rows whenever the input set changes.
    use_effect(move || {
        let rows = records();
        engine.write().set_records(rows);
    });

    let view = engine.read().view();
    let selected_count = view.selected.len();

    let on_range = move |range: DateRange| {
        let completed = engine.write().set_date_range(range);
        let Some((from, to)) = completed else {
            return;
        };
        let Some(fetch) = refine.clone() else {
            return;
        };
        // Tag the dispatch; a response that loses the race is discarded by
        // the engine, so the newest range always wins.
        let ticket = engine.write().begin_refine();
        spawn(async move {
            match fetch.call(from, to).await {
                Ok(rows) => {
                    engine.write().commit_refine(ticket, rows);
                }
                Err(err) => {
                    warn!("date-range refinement failed, keeping last-good rows: {err}");
                }
            }
        });
    };

    rsx! {
        div {
            class: "panel",

            div {
                class: "panel-toolbar",
                if let Some(target) = create_path {
                    Link { class: "btn btn-primary", to: target, "+ Create" }
                }
                FilterBar {
                    on_search: move |text: String| engine.write().set_search(text),
                    on_range,
                }
            }

            table {
                class: "datatable",
                thead {
                    tr {
                        th { class: "col-select" }
                        for column in columns.iter() {
                            {header_cell(engine, &view.sort.key, view.sort.direction, column)}
                        }
                        if row_action.is_some() {
                            th { "Actions" }
                        }
                    }
                }
                tbody {
                    for record in view.visible_records.iter() {
                        {body_row(engine, &columns, row_action.as_ref(), record)}
                    }
                    if view.visible_records.is_empty() {
                        tr {
                            td {
                                class: "datatable-empty",
                                colspan: (columns.len() + 2).to_string(),
                                "No matching records"
                            }
                        }
                    }
                }
            }

            Pagination {
                page: view.page,
                page_size: view.page_size,
                page_sizes: view.page_sizes.clone(),
                total: view.total_filtered,
                shown: view.visible_records.len(),
                on_page: move |page| engine.write().set_page(page),
                on_page_size: move |size| engine.write().set_page_size(size),
            }

            if selected_count > 0 {
                div { class: "selection-status", "{selected_count} selected" }
            }
        }
    }
}

/// One sortable (or plain) header cell.
fn header_cell(
    mut engine: Signal<TableEngine>,
    active_key: &str,
    direction: SortDirection,
    column: &Column,
) -> Element {
    let is_active = active_key == column.key;
    let arrow = match (is_active, direction) {
        (false, _) => "",
        (true, SortDirection::Ascending) => " \u{25B4}",
        (true, SortDirection::Descending) => " \u{25BE}",
    };

    if !column.sortable {
        return rsx! {
            th { "{column.title}" }
        };
    }

    let key = column.key.clone();
    rsx! {
        th {
            class: if is_active { "sortable active" } else { "sortable" },
            onclick: move |_| engine.write().toggle_sort(&key),
            "{column.title}{arrow}"
        }
    }
}

/// One body row: selection checkbox, rendered cells, optional action link.
fn body_row(
    mut engine: Signal<TableEngine>,
    columns: &[Column],
    row_action: Option<&RowAction>,
    record: &Record,
) -> Element {
    let selected = engine.read().is_selected(record);
    let toggle_target = record.clone();

    rsx! {
        tr {
            class: if selected { "selected" } else { "" },
            td {
                class: "col-select",
                input {
                    r#type: "checkbox",
                    checked: selected,
                    onchange: move |_| engine.write().toggle_selected(&toggle_target),
                }
            }
            for column in columns.iter() {
                td {
                    {match column.render {
                        Some(render) => render(record),
                        None => display_value(record, &column.key),
                    }}
                }
            }
            if let Some(action) = row_action {
                td {
                    Link {
                        class: "btn btn-row-action",
                        to: (action.target)(record),
                        "{action.label}"
                    }
                }
            }
        }
    }
}
