//! Approval finder library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{ApprovalFinderError, Result};
pub use config::Config;
pub use processing::extractor::{extract_names, extract_names_from_pages, extract_names_from_text};
pub use processing::matcher::{match_roster, MatchRecord};
pub use processing::normalizer::normalize;
