//! Landing page — entry points into the admin views.

use dioxus::prelude::*;

use crate::app::Route;

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        div {
            class: "panel",
            h1 { "Admin Dashboard" }
            p { class: "muted", "Loan leads and lender offers for the lending platform." }

            div {
                class: "dashboard-cards",
                Link {
                    class: "dashboard-card",
                    to: Route::Loans {},
                    h3 { "Loans" }
                    p { "Browse loan leads, filter by lead ID or date range." }
                }
            }
        }
    }
}
