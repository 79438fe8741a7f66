//! Core library for LendScope: the record model and the tabular data engine
//! shared by the admin console — local filtering, client-side sorting,
//! pagination, selection tracking, and remote-refinement coordination.

pub mod engine;
pub mod record;
pub mod table;
