// Rollcall - app/mod.rs
//
// Application layer: the log file, report entry points, maintenance, and
// face image preparation.
// Dependencies: core, platform, util.

pub mod images;
pub mod maintenance;
pub mod reporter;
pub mod store;
