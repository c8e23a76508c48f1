//! heartstat-analysis: statistical report for the UCI Heart Disease dataset.
//!
//! The crate loads the dataset (UCI repository API or a local CSV), profiles
//! every column, computes a Pearson correlation matrix and Shapiro-Wilk
//! normality tests, and renders a ten-section plain-text report.
//!
//! Statistics are free functions over a small columnar [`dataset::Dataset`];
//! [`pipeline::generate_report`] wires the whole run together.
pub mod config;
pub mod correlation;
pub mod dataset;
pub mod error;
pub mod io;
pub mod math;
pub mod normality;
pub mod pipeline;
pub mod profiling;
pub mod report;
pub mod stats;
