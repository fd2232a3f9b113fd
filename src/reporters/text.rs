//! Plain text reporter
//!
//! The layout is fixed and never paginated: however many security issues
//! there are, each one gets its own line.

use crate::models::IssueCategory;
use crate::recommend::capitalize;
use crate::report::ReportModel;
use anyhow::Result;
use std::path::Path;

const RULE: &str = "==================================================";

/// Tips shown per language in the best-practices block
const TIPS_PER_LANGUAGE: usize = 3;

/// Render report as text
pub fn render(model: &ReportModel) -> Result<String> {
    Ok(render_lines(model).join("\n"))
}

/// The report as an ordered list of lines
pub fn render_lines(model: &ReportModel) -> Vec<String> {
    let metrics = &model.complexity;
    let totals = &model.totals;

    let mut out = vec![
        RULE.to_string(),
        "            DEBTSCOPE CODE HEALTH REPORT".to_string(),
        RULE.to_string(),
        String::new(),
        format!(
            "Project Quality: {} ({}/100)",
            model.rating.tier, model.maintainability_score
        ),
        format!("Technical Debt: {} days to fix", metrics.technical_debt_days),
        String::new(),
        format!("Verdict: \"{}\"", model.rating.flavor_text),
        String::new(),
        "Issues Found:".to_string(),
    ];

    for category in IssueCategory::ALL {
        out.push(format!("- {}: {}", category.title(), totals.get(category)));
    }
    out.push(String::new());

    out.extend([
        "Project Metrics:".to_string(),
        format!("- Total Files: {}", model.total_files),
        format!("- Total Lines: {}", model.lines.total),
        format!("- Code Lines: {}", model.lines.code),
        format!("- Comment Lines: {}", model.lines.comments),
        format!("- Comment Density: {:.1}%", model.comment_density_pct),
        format!("- Duplicated Code Blocks: {}", metrics.duplicated_code_blocks),
        format!("- Avg Function Complexity: {:.1}", metrics.avg_function_complexity),
        format!("- Avg Function Size: {:.1} lines", metrics.avg_function_size),
        String::new(),
    ]);

    if totals.code_smells > 0 {
        out.push("Top Code Smells:".to_string());
        for (kind, count) in &model.smell_histogram {
            out.push(format!("- {kind}: {count} occurrences"));
        }
        out.push(String::new());
    }

    if totals.security > 0 {
        out.push("SECURITY VULNERABILITIES:".to_string());
        for issue in model.issues.iter_category(IssueCategory::Security) {
            let line = issue
                .line_number
                .map_or_else(|| "?".to_string(), |l| l.to_string());
            out.push(format!(
                "- {} (line {}): {}",
                file_name(&issue.file_path),
                line,
                issue.description
            ));
        }
        out.push(String::new());
    }

    out.push("Recommendations:".to_string());
    for rec in &model.recommendations {
        out.push(format!("- {rec}"));
    }

    for (language, tips) in &model.best_practices {
        if tips.is_empty() {
            continue;
        }
        out.push(String::new());
        out.push(format!("Best Practices for {}:", capitalize(language)));
        for tip in tips.iter().take(TIPS_PER_LANGUAGE) {
            out.push(format!("- {tip}"));
        }
    }

    out.push(String::new());
    out.push("Generated by debtscope".to_string());
    out.push("Scores are estimates. Read the findings before you refactor.".to_string());
    out
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::issue;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_text_section_order() {
        let lines = render_lines(&test_report());
        let pos = |needle: &str| {
            lines
                .iter()
                .position(|l| l.starts_with(needle))
                .unwrap_or_else(|| panic!("missing line {needle}"))
        };

        let order = [
            pos("Project Quality: Fair (55/100)"),
            pos("Technical Debt: 3 days to fix"),
            pos("Verdict: \""),
            pos("Issues Found:"),
            pos("Project Metrics:"),
            pos("Top Code Smells:"),
            pos("SECURITY VULNERABILITIES:"),
            pos("Recommendations:"),
            pos("Best Practices for Python:"),
            pos("Generated by debtscope"),
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{order:?}");
    }

    #[test]
    fn test_text_counts_and_metrics() {
        let text = render(&test_report()).unwrap();
        assert!(text.contains("- Code Smells: 3"));
        assert!(text.contains("- Security Issues: 1"));
        assert!(text.contains("- Performance Issues: 1"));
        assert!(text.contains("- Style Issues: 0"));
        assert!(text.contains("- Total Files: 3"));
        assert!(text.contains("- Comment Density: 8.0%"));
        assert!(text.contains("- Avg Function Complexity: 4.2"));
        assert!(text.contains("- long_function: 2 occurrences"));
        assert!(text.contains("- app.py (line 1): sql_injection in /repo/app.py"));
    }

    #[test]
    fn test_text_lists_every_security_issue() {
        let mut model = test_report();
        model.issues.security_issues.clear();
        for i in 0..500 {
            let mut sec = issue(&format!("/repo/f{}.py", i % 7), IssueCategory::Security, "xss");
            sec.line_number = Some(i);
            sec.description = format!("unescaped output #{i}");
            model.issues.push(sec);
        }
        model.totals.security = 500;

        let lines = render_lines(&model);
        let listed: Vec<&String> = lines
            .iter()
            .filter(|l| l.contains("unescaped output #"))
            .collect();
        assert_eq!(listed.len(), 500);
        assert!(lines.contains(&"- f0.py (line 0): unescaped output #0".to_string()));
        assert!(lines.contains(&"- f2.py (line 499): unescaped output #499".to_string()));
    }

    #[test]
    fn test_text_missing_line_number() {
        let mut model = test_report();
        model.issues.security_issues.clear();
        let mut sec = issue("/repo/x.py", IssueCategory::Security, "eval");
        sec.line_number = None;
        model.issues.push(sec);
        let text = render(&model).unwrap();
        assert!(text.contains("- x.py (line ?): eval in /repo/x.py"));
    }

    #[test]
    fn test_text_best_practices_top_three() {
        let mut model = test_report();
        model.best_practices.insert(
            "rust".into(),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
        );
        let lines = render_lines(&model);
        let start = lines
            .iter()
            .position(|l| l == "Best Practices for Rust:")
            .unwrap();
        assert_eq!(lines[start + 1..start + 4], ["- a", "- b", "- c"]);
        assert_eq!(lines[start + 4], "");
    }

    #[test]
    fn test_text_without_smells_or_security() {
        let mut model = test_report();
        model.totals.code_smells = 0;
        model.totals.security = 0;
        let text = render(&model).unwrap();
        assert!(!text.contains("Top Code Smells:"));
        assert!(!text.contains("SECURITY VULNERABILITIES:"));
        assert!(text.contains("Recommendations:"));
    }
}
