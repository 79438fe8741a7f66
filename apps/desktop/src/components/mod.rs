//! Reusable UI components for the admin console.

mod filter_bar;
mod pagination;
mod record_browser;

pub use record_browser::{RecordBrowser, RefineFn, RowAction};
