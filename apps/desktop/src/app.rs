//! Root application component — route tree and admin shell layout.

use dioxus::prelude::*;

use crate::pages::{Dashboard, Loans, NotFound, Offers};

static APP_CSS: Asset = asset!("/assets/app.css");

/// Admin route tree. The lead whose offers are being viewed travels as a
/// route parameter rather than ambient shared state.
#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[layout(Shell)]
    #[route("/")]
    Dashboard {},
    #[route("/admin/loans")]
    Loans {},
    #[route("/admin/loans/:lead_id/offers")]
    Offers { lead_id: String },
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: APP_CSS }
        Router::<Route> {}
    }
}

/// Shared admin chrome: top bar with navigation, content outlet below.
#[component]
fn Shell() -> Element {
    rsx! {
        div {
            class: "app-shell",

            nav {
                class: "topbar",
                span { class: "topbar-title", "LendScope" }
                Link { class: "topbar-link", to: Route::Dashboard {}, "Dashboard" }
                Link { class: "topbar-link", to: Route::Loans {}, "Loans" }
            }

            main {
                class: "content-area",
                Outlet::<Route> {}
            }
        }
    }
}
