//! Prioritized recommendations
//!
//! Rules run in a fixed order and each one appends zero or more lines:
//!
//! 1. maintainability score below [`MAINTAINABILITY_THRESHOLD`]
//! 2. comment density below [`COMMENT_DENSITY_THRESHOLD`]
//! 3. the first best-practice tip of every language that has one
//! 4. remediation for the three most frequent known smell types
//! 5. security issues present (always last)
//!
//! The output order is part of the report contract.

use crate::aggregate::{smell_histogram, SMELL_HISTOGRAM};
use crate::models::{BestPractices, IssueMap};

pub const MAINTAINABILITY_THRESHOLD: u32 = 60;
pub const COMMENT_DENSITY_THRESHOLD: f64 = 0.10;

const MAINTAINABILITY_DEBT: &str =
    "Improve overall code maintainability by addressing technical debt";
const DOCUMENTATION: &str = "Increase code documentation - current comment density is too low";
const SECURITY: &str = "Address critical security vulnerabilities as a top priority";

/// Smell types with a canned remediation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmellKind {
    LongFunction,
    DeepNesting,
    DuplicateCode,
}

impl SmellKind {
    /// Known tag, or `None` for anything else
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "long_function" => Some(SmellKind::LongFunction),
            "deep_nesting" => Some(SmellKind::DeepNesting),
            "duplicate_code" => Some(SmellKind::DuplicateCode),
            _ => None,
        }
    }

    pub fn remediation(&self, count: usize) -> String {
        match self {
            SmellKind::LongFunction => format!(
                "Refactor {count} long functions by breaking them into smaller, more focused methods"
            ),
            SmellKind::DeepNesting => format!(
                "Fix {count} instances of deep nesting by extracting methods or using early returns"
            ),
            SmellKind::DuplicateCode => {
                format!("Eliminate {count} duplicated code blocks by creating reusable functions")
            }
        }
    }
}

/// Everything the rules look at
#[derive(Debug, Clone, Copy)]
pub struct RecommendationInput<'a> {
    pub maintainability_score: u32,
    pub comment_density: f64,
    pub best_practices: &'a BestPractices,
    pub code_smells: &'a IssueMap,
    pub security_issue_count: usize,
}

/// Derives the ordered recommendation list
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn recommend(&self, input: &RecommendationInput<'_>) -> Vec<String> {
        let mut out = Vec::new();

        if input.maintainability_score < MAINTAINABILITY_THRESHOLD {
            out.push(MAINTAINABILITY_DEBT.to_string());
        }

        if input.comment_density < COMMENT_DENSITY_THRESHOLD {
            out.push(DOCUMENTATION.to_string());
        }

        for (language, tips) in input.best_practices {
            if let Some(tip) = tips.first() {
                out.push(format!("For {}: {}", capitalize(language), tip));
            }
        }

        for (tag, count) in smell_histogram(input.code_smells, SMELL_HISTOGRAM) {
            if let Some(kind) = SmellKind::from_tag(&tag) {
                out.push(kind.remediation(count));
            }
        }

        if input.security_issue_count > 0 {
            out.push(SECURITY.to_string());
        }

        out
    }
}

/// Uppercase the first character and lowercase the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
