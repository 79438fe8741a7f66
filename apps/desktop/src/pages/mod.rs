//! Admin pages routed from the shell.

mod dashboard;
mod loans;
mod offers;

pub use dashboard::Dashboard;
pub use loans::Loans;
pub use offers::Offers;

use dioxus::prelude::*;

/// Catch-all for unknown paths.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "panel not-found",
            h2 { "404" }
            p { "No page at /{path}" }
        }
    }
}
