//! Biodiversity-driven carbon exposure and operational-gain calculator.

#[cfg(feature = "api")]
pub mod api;
pub mod audit;
pub mod config;
pub mod engine;
pub mod io;
pub mod portfolio;
pub mod report;
