//! File exports of portfolio results.

pub mod export;
