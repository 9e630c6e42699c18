//! Infrastructure layer - External service implementations

pub mod graph;
pub mod logging;
pub mod services;
pub mod spreadsheet;
