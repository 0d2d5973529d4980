//! Processing module
//! Name normalization, extraction, roster matching and run aggregation

pub mod checker;
pub mod document;
pub mod extractor;
pub mod matcher;
pub mod normalizer;
pub mod progress;
pub mod roster;
