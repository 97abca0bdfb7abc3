// Rollcall - core/mod.rs
//
// Core business logic: record model, date queries, hour pairing, reports,
// and export. Operates on already-loaded records; only export touches the
// filesystem, through paths and writers handed to it by the app layer.

pub mod export;
pub mod hours;
pub mod model;
pub mod query;
pub mod report;
