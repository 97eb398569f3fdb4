//! Terminal command implementations

pub mod account;
pub mod dashboard;
pub mod entry;
pub mod export;
pub mod ledger;
pub mod setup;
pub mod ui;
