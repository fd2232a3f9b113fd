//! Core data models for debtscope
//!
//! These models are shared by the collector, the aggregation engine and the
//! reporters. Everything here is plain data: collectors create it, the engine
//! reads it, nothing mutates it after construction.

use crate::error::{ReportError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Severity levels for issues
///
/// Serialized lowercase. Deserialization goes through [`FromStr`], so it
/// accepts any case and surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for Severity {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(ReportError::InvalidSeverity(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Which issue mapping an issue came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Smell,
    Security,
    Performance,
    Style,
}

impl IssueCategory {
    /// All categories in report order
    pub const ALL: [IssueCategory; 4] = [
        IssueCategory::Smell,
        IssueCategory::Security,
        IssueCategory::Performance,
        IssueCategory::Style,
    ];

    /// Short chart label
    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::Smell => "smells",
            IssueCategory::Security => "security",
            IssueCategory::Performance => "performance",
            IssueCategory::Style => "style",
        }
    }

    /// Heading used by the renderers
    pub fn title(&self) -> &'static str {
        match self {
            IssueCategory::Smell => "Code Smells",
            IssueCategory::Security => "Security Issues",
            IssueCategory::Performance => "Performance Issues",
            IssueCategory::Style => "Style Issues",
        }
    }
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single externally detected issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub file_path: String,
    pub line_number: Option<u32>,
    pub category: IssueCategory,
    /// Open tag set by the detector, e.g. `long_function`
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// File path -> issues for that file, in the order the source produced them
pub type IssueMap = IndexMap<String, Vec<Issue>>;

/// Language -> best-practice tips, in source order
pub type BestPractices = IndexMap<String, Vec<String>>;

/// The four category-keyed issue mappings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedIssues {
    #[serde(default)]
    pub code_smells: IssueMap,
    #[serde(default)]
    pub security_issues: IssueMap,
    #[serde(default)]
    pub performance_issues: IssueMap,
    #[serde(default)]
    pub style_issues: IssueMap,
}

impl CategorizedIssues {
    pub fn map(&self, category: IssueCategory) -> &IssueMap {
        match category {
            IssueCategory::Smell => &self.code_smells,
            IssueCategory::Security => &self.security_issues,
            IssueCategory::Performance => &self.performance_issues,
            IssueCategory::Style => &self.style_issues,
        }
    }

    fn map_mut(&mut self, category: IssueCategory) -> &mut IssueMap {
        match category {
            IssueCategory::Smell => &mut self.code_smells,
            IssueCategory::Security => &mut self.security_issues,
            IssueCategory::Performance => &mut self.performance_issues,
            IssueCategory::Style => &mut self.style_issues,
        }
    }

    /// Add an issue under its own category and file
    pub fn push(&mut self, issue: Issue) {
        self.map_mut(issue.category)
            .entry(issue.file_path.clone())
            .or_default()
            .push(issue);
    }

    /// Number of issues in a category, across all files
    pub fn count(&self, category: IssueCategory) -> usize {
        self.map(category).values().map(Vec::len).sum()
    }

    /// Number of issues in a category for one file
    pub fn count_for_file(&self, category: IssueCategory, path: &str) -> usize {
        self.map(category).get(path).map_or(0, Vec::len)
    }

    /// Every issue of a category in map order
    pub fn iter_category(&self, category: IssueCategory) -> impl Iterator<Item = &Issue> {
        self.map(category).values().flatten()
    }

    pub fn is_empty(&self) -> bool {
        IssueCategory::ALL.iter().all(|c| self.map(*c).is_empty())
    }

    /// Reject issues whose tag disagrees with the mapping they sit in
    pub fn validate(&self) -> Result<()> {
        for category in IssueCategory::ALL {
            if let Some(issue) = self.iter_category(category).find(|i| i.category != category) {
                return Err(ReportError::CategoryMismatch {
                    file_path: issue.file_path.clone(),
                    expected: category.to_string(),
                    found: issue.category.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Closed language vocabulary understood by the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    Java,
    #[serde(rename = "C/C++")]
    CCpp,
    #[serde(rename = "C#")]
    CSharp,
    Ruby,
    #[serde(rename = "PHP")]
    Php,
    Swift,
    Go,
    Rust,
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "CSS")]
    Css,
    #[serde(rename = "SQL")]
    Sql,
}

impl Language {
    /// Map a file extension (without the dot, any case) to a language
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "py" | "pyw" => Some(Language::Python),
            "js" | "jsx" | "ts" | "tsx" => Some(Language::JavaScript),
            "java" => Some(Language::Java),
            "c" | "cpp" | "h" | "hpp" => Some(Language::CCpp),
            "cs" => Some(Language::CSharp),
            "rb" => Some(Language::Ruby),
            "php" => Some(Language::Php),
            "swift" => Some(Language::Swift),
            "go" => Some(Language::Go),
            "rs" => Some(Language::Rust),
            "html" | "htm" => Some(Language::Html),
            "css" | "scss" | "sass" | "less" => Some(Language::Css),
            "sql" => Some(Language::Sql),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Java => "Java",
            Language::CCpp => "C/C++",
            Language::CSharp => "C#",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
            Language::Swift => "Swift",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Sql => "SQL",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Size metrics for one scanned file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetric {
    pub path: String,
    pub name: String,
    pub lines: usize,
    pub code: usize,
    pub comments: usize,
    pub blank: usize,
    pub language: Language,
    /// Filled in by the aggregator, zero as collected
    #[serde(default)]
    pub issue_count: usize,
}

/// Codebase-wide complexity snapshot supplied with the issues
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityMetrics {
    pub maintainability_index: f64,
    pub technical_debt_days: f64,
    pub comment_density: f64,
    pub avg_function_complexity: f64,
    pub avg_function_size: f64,
    pub avg_function_params: f64,
    pub duplicated_code_blocks: u32,
    pub function_count: u32,
}

impl ComplexityMetrics {
    /// Check ranges; NaN or out-of-range values are input errors
    pub fn validate(&self) -> Result<()> {
        check_range("maintainability_index", self.maintainability_index, 0.0, 100.0)?;
        check_range("comment_density", self.comment_density, 0.0, 1.0)?;
        check_range("technical_debt_days", self.technical_debt_days, 0.0, f64::MAX)?;
        check_range("avg_function_complexity", self.avg_function_complexity, 0.0, f64::MAX)?;
        check_range("avg_function_size", self.avg_function_size, 0.0, f64::MAX)?;
        check_range("avg_function_params", self.avg_function_params, 0.0, f64::MAX)?;
        Ok(())
    }

    /// Maintainability index rounded to a whole score
    pub fn maintainability_score(&self) -> u32 {
        self.maintainability_index.round() as u32
    }
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ReportError::InvalidMetric { name, value })
    }
}

/// One occurrence of a duplicated block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateInstance {
    pub file: String,
    pub start_line: u32,
    pub end_line: u32,
}

/// A block of code found in more than one place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicatedBlock {
    pub size_lines: u32,
    #[serde(default)]
    pub sample: String,
    #[serde(default)]
    pub instances: Vec<DuplicateInstance>,
}
