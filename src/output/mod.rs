//! Output module
//! Console and JSON presentation, charts, CSV and PDF exports

pub mod chart;
pub mod export;
pub mod formatter;
pub mod report;
