//! Search and date-range controls with debounced search emission.

use chrono::NaiveDate;
use dioxus::prelude::*;
use lendscope_core::table::DateRange;

/// Free-text search over the lead identifier plus a toggleable date-range
/// picker. Search emission is debounced so the filter stage is not re-run on
/// every keystroke; date changes emit immediately.
#[component]
pub fn FilterBar(on_search: EventHandler<String>, on_range: EventHandler<DateRange>) -> Element {
    let mut draft = use_signal(String::new);
    let mut debounce_gen = use_signal(|| 0u64);
    let mut show_range = use_signal(|| false);
    let mut start = use_signal(|| None::<NaiveDate>);
    let mut end = use_signal(|| None::<NaiveDate>);

    let start_value = start().map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
    let end_value = end().map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();

    rsx! {
        div {
            class: "filter-bar",

            input {
                class: "search-input",
                r#type: "text",
                placeholder: "Search by Lead ID...",
                value: "{draft}",
                oninput: move |event| {
                    let value = event.value();
                    draft.set(value.clone());

                    // Debounce: bump the generation, emit only if no newer
                    // keystroke arrived while we slept.
                    let generation = *debounce_gen.read() + 1;
                    debounce_gen.set(generation);
                    spawn(async move {
                        tokio::time::sleep(std::time::Duration::from_millis(150)).await;
                        if *debounce_gen.read() == generation {
                            on_search.call(value);
                        }
                    });
                },
            }

            button {
                class: "btn btn-filter-toggle",
                onclick: move |_| {
                    let visible = !show_range();
                    show_range.set(visible);
                    if !visible {
                        // Hiding the picker clears the date filter.
                        start.set(None);
                        end.set(None);
                        on_range.call(DateRange::default());
                    }
                },
                "Filter \u{25BE}"
            }

            if show_range() {
                label {
                    class: "range-label",
                    "From "
                    input {
                        r#type: "date",
                        value: "{start_value}",
                        onchange: move |event| {
                            start.set(parse_input_date(&event.value()));
                            on_range.call(DateRange::new(start(), end()));
                        },
                    }
                }
                label {
                    class: "range-label",
                    "To "
                    input {
                        r#type: "date",
                        value: "{end_value}",
                        onchange: move |event| {
                            end.set(parse_input_date(&event.value()));
                            on_range.call(DateRange::new(start(), end()));
                        },
                    }
                }
            }
        }
    }
}

fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
