//! Output reporters for debtscope reports
//!
//! Supports multiple output formats:
//! - `text` - Plain text summary, every security issue listed
//! - `html` - Self-contained HTML document with charts
//! - `json` - Machine-readable JSON of the full report model

mod html;
mod json;
mod text;

pub use json::render_compact as json_compact;
pub use text::render_lines as text_lines;

use crate::report::ReportModel;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, html, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a report in the named format
pub fn report(model: &ReportModel, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(model, fmt)
}

/// Render a report using an OutputFormat enum
pub fn report_with_format(model: &ReportModel, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(model),
        OutputFormat::Html => html::render(model),
        OutputFormat::Json => json::render(model),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Html => "html",
        OutputFormat::Json => "json",
    }
}
