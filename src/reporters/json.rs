//! JSON reporter
//!
//! Outputs the full ReportModel, chart datasets included, as JSON.

use crate::report::ReportModel;
use anyhow::Result;

/// Render report as JSON
pub fn render(model: &ReportModel) -> Result<String> {
    Ok(serde_json::to_string_pretty(model)?)
}

/// Render report as compact JSON (single line)
pub fn render_compact(model: &ReportModel) -> Result<String> {
    Ok(serde_json::to_string(model)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_json_render_valid() {
        let json_str = render(&test_report()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["rating"]["tier"], "Fair");
        assert_eq!(parsed["maintainability_score"], 55);
        assert_eq!(parsed["totals"]["total"], 5);
        assert_eq!(
            parsed["charts"]["issue_categories"]["points"][0]["label"],
            "smells"
        );
    }

    #[test]
    fn test_json_compact_parses_back() {
        let model = test_report();
        let json_str = render_compact(&model).expect("render compact JSON");
        assert!(!json_str.contains('\n'));
        let back: ReportModel = serde_json::from_str(&json_str).expect("parse model");
        assert_eq!(back.recommendations, model.recommendations);
        assert_eq!(back.file_tree, model.file_tree);
        assert_eq!(back.rating, model.rating);
    }
}
