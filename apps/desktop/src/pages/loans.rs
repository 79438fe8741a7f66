//! Loans page — fetches loan leads, flattens the personal/business loan
//! variants into table rows, and renders the record browser with a
//! date-range refinement fetch bound to the backend.

use dioxus::prelude::*;
use lendscope_api::Client;
use lendscope_core::record::Record;
use lendscope_core::table::Column;
use serde_json::{json, Value};

use crate::app::Route;
use crate::components::{RecordBrowser, RefineFn, RowAction};

/// Business registration proof codes as reported by the backend.
const BUSINESS_REGISTRATION_TYPES: &[(u64, &str)] = &[
    (1, "GST"),
    (2, "Shop & Establishment"),
    (3, "Municipal Corporation / Mahanagar"),
    (4, "Palika Gramapanchayat"),
    (5, "Udyog Aadhar"),
    (6, "Drugs License / Food & Drugs Control"),
    (7, "Other"),
    (8, "No Business Proof"),
];

fn business_registration_label(code: u64) -> &'static str {
    BUSINESS_REGISTRATION_TYPES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or("-")
}

fn render_business_registration(record: &Record) -> String {
    record
        .field("businessRegistrationType")
        .and_then(Value::as_u64)
        .map(business_registration_label)
        .unwrap_or("-")
        .to_string()
}

/// Flatten one backend lead into table rows — one per loan variant present.
/// A lead carrying both a personal and a business loan yields two rows that
/// share the lead ID, so each row gets a synthetic unique `id` for selection
/// tracking.
fn flatten_lead(lead: &Record) -> Vec<Record> {
    let lead_id = lead.text("leadId");
    let login_count = lead
        .field("loginCountRef")
        .and_then(|v| v.get("count"))
        .cloned()
        .unwrap_or(json!(0));
    let lender_name = lead
        .field("appliedCustomersRef")
        .and_then(|v| v.get("lenderName"))
        .cloned()
        .unwrap_or(json!(""));

    let variants = [("personalLoanRef", "Personal Loan"), ("businessLoanRef", "Business Loan")];

    let mut rows = Vec::new();
    for (variant, loan_type) in variants {
        let Some(Value::Object(fields)) = lead.field(variant) else {
            continue;
        };
        let mut row = Record::from_map(fields.clone());
        row.set("id", json!(format!("{lead_id}:{variant}")));
        row.set("leadId", json!(lead_id.clone()));
        row.set("loanType", json!(loan_type));
        row.set("loginCount", login_count.clone());
        row.set("lenderName", lender_name.clone());
        for shared in ["createdAt", "updatedAt", "date"] {
            if let Some(value) = lead.field(shared) {
                row.set(shared, value.clone());
            }
        }
        rows.push(row);
    }
    rows
}

fn flatten_leads(leads: &[Record]) -> Vec<Record> {
    leads.iter().flat_map(flatten_lead).collect()
}

fn loan_columns() -> Vec<Column> {
    vec![
        Column::new("loanType", "Type of Loan"),
        Column::new("leadId", "Lead ID").sortable(),
        Column::new("firstName", "First Name"),
        Column::new("lastName", "Last Name"),
        Column::new("dob", "DOB"),
        Column::new("email", "Email"),
        Column::new("mobileNumber", "Phone"),
        Column::new("monthlyIncome", "Monthly Income").sortable(),
        Column::new("employerName", "Employer Name"),
        Column::new("businessRegistrationType", "Business Reg Type")
            .render(render_business_registration),
        Column::new("pan", "PAN"),
        Column::new("pincode", "Pincode"),
        Column::new("loginCount", "Login Count").sortable(),
        Column::new("lenderName", "Lender Name"),
        Column::new("createdAt", "Created At").sortable(),
        Column::new("updatedAt", "Updated At"),
    ]
}

#[component]
pub fn Loans() -> Element {
    let rows = use_resource(|| async move {
        let leads = Client::from_env().loan_details().await?;
        Ok::<_, lendscope_api::ApiError>(flatten_leads(&leads))
    });

    let refine = use_hook(|| {
        RefineFn::new(|from, to| {
            Box::pin(async move {
                let leads = Client::from_env().loans_between(from, to).await?;
                Ok(flatten_leads(&leads))
            })
        })
    });

    let body = match &*rows.read_unchecked() {
        None => rsx! {
            p { class: "muted", "Loading..." }
        },
        Some(Err(err)) => rsx! {
            p { class: "error", "Failed to fetch loan data: {err}" }
        },
        Some(Ok(records)) => rsx! {
            RecordBrowser {
                records: records.clone(),
                columns: loan_columns(),
                refine: refine.clone(),
                row_action: RowAction {
                    label: "View Offers",
                    target: |record| Route::Offers { lead_id: record.text("leadId") },
                },
            }
        },
    };

    rsx! {
        ul {
            class: "breadcrumb",
            li {
                Link { to: Route::Dashboard {}, "Dashboard" }
            }
            li { "Loans" }
        }
        {body}
    }
}
