//! debtscope - code health reports from line metrics and detector output
//!
//! The engine is split into small stages:
//! - [`collector`] walks a project and counts lines per file
//! - [`input`] loads the issues document produced by external detectors
//! - [`report::build_report`] aggregates both, rates the project, derives
//!   recommendations and chart datasets into a [`report::ReportModel`]
//! - [`reporters`] render the model as text, HTML or JSON
//! - [`artifact`] writes the rendered report and opens a viewer

pub mod aggregate;
pub mod artifact;
pub mod charts;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod rating;
pub mod recommend;
pub mod report;
pub mod reporters;

pub use error::{ArtifactError, ReportError};
pub use report::{build_report, IssueInput, ReportModel, ReportOptions};
