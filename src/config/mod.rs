//! Configuration module for debtscope
//!
//! This module handles project-level configuration (`debtscope.toml`):
//! - Extra directories to skip while scanning
//! - Report defaults the CLI flags can override

mod project_config;

pub use project_config::{
    load_project_config, ProjectConfig, ReportConfig, ScanConfig, CONFIG_FILE_NAME,
    EXAMPLE_CONFIG,
};
