//! Offers page — lender offers prepared for one lead, rendered as cards.

use dioxus::prelude::*;
use lendscope_api::Client;
use lendscope_core::record::Record;

use crate::app::Route;

#[component]
pub fn Offers(lead_id: String) -> Element {
    let lead_for_fetch = lead_id.clone();
    let offers = use_resource(move || {
        let lead = lead_for_fetch.clone();
        async move { Client::from_env().offers(&lead).await }
    });

    let body = match &*offers.read_unchecked() {
        None => rsx! {
            p { class: "muted", "Loading offers..." }
        },
        Some(Err(err)) => rsx! {
            p { class: "error", "Failed to fetch offers: {err}" }
        },
        Some(Ok(offers)) if offers.is_empty() => rsx! {
            p { class: "muted", "No offers available." }
        },
        Some(Ok(offers)) => rsx! {
            div {
                class: "offers-grid",
                for offer in offers.iter() {
                    {offer_card(offer)}
                }
            }
        },
    };

    rsx! {
        ul {
            class: "breadcrumb",
            li {
                Link { to: Route::Dashboard {}, "Dashboard" }
            }
            li {
                Link { to: Route::Loans {}, "Loans" }
            }
            li { "Offers for {lead_id}" }
        }
        {body}
    }
}

fn offer_card(offer: &Record) -> Element {
    let logo = offer.text("lenderLogo");
    let link = offer.text("offerLink");
    let lender = offer.text("lenderName");

    rsx! {
        div {
            class: "offer-card",
            if !logo.is_empty() {
                img { class: "offer-logo", src: "{logo}", alt: "{lender}" }
            }
            h3 { "{lender}" }
            p { strong { "Lender ID: " } {offer.text("lenderId")} }
            p { strong { "Amount up to: " } {offer.text("offerAmountUpTo")} }
            p { strong { "Tenure: " } {offer.text("offerTenure")} }
            p { strong { "Interest rate: " } {offer.text("offerInterestRate")} }
            p { strong { "Processing fees: " } {offer.text("offerProcessingFees")} }
            p { strong { "Status: " } {offer.text("status")} }
            if !link.is_empty() {
                a { class: "btn btn-primary offer-link", href: "{link}", "View Offer" }
            }
        }
    }
}
