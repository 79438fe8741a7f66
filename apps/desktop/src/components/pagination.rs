//! Pager controls below the table: entry counts, page navigation, and the
//! page-size selector.

use dioxus::prelude::*;

#[component]
pub fn Pagination(
    page: usize,
    page_size: usize,
    page_sizes: Vec<usize>,
    total: usize,
    shown: usize,
    on_page: EventHandler<usize>,
    on_page_size: EventHandler<usize>,
) -> Element {
    let from = if shown == 0 { 0 } else { (page - 1) * page_size + 1 };
    let to = if shown == 0 { 0 } else { from + shown - 1 };
    let page_count = if page_size == 0 { 0 } else { total.div_ceil(page_size) };
    let at_last = page >= page_count;

    rsx! {
        div {
            class: "pagination",

            span {
                class: "pagination-label",
                "Showing {from} to {to} of {total} entries"
            }

            div {
                class: "pagination-controls",
                button {
                    class: "btn",
                    disabled: page <= 1,
                    onclick: move |_| on_page.call(page.saturating_sub(1).max(1)),
                    "\u{2039} Prev"
                }
                span { class: "pagination-page", "Page {page}" }
                button {
                    class: "btn",
                    disabled: at_last,
                    onclick: move |_| on_page.call(page + 1),
                    "Next \u{203A}"
                }
            }

            if page_sizes.len() > 1 {
                select {
                    class: "pagination-size",
                    value: "{page_size}",
                    onchange: move |event| {
                        if let Ok(size) = event.value().parse::<usize>() {
                            on_page_size.call(size);
                        }
                    },
                    for size in page_sizes.iter() {
                        option { value: "{size}", "{size} / page" }
                    }
                }
            }
        }
    }
}
