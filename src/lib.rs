//! Tally
//!
//! Tally is a purchase ledger and period-scoped spend analytics engine written in Rust.

pub mod context;
pub mod purchases;
