//! Interactive dashboard over the Ames housing dataset.
//!
//! Control values flow one way per interaction:
//! ```text
//!  controls ──► FilterState ──► resolve() ──► ViewResult { ChartSpec, summary } ──► egui
//! ```
//! The dataset is loaded and cleaned once ([`data::loader::load_file`]) and
//! then shared read-only.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod resolve;
pub mod state;
pub mod ui;
