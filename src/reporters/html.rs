//! HTML reporter with embedded styles, data and charts
//!
//! Generates one standalone document with no network references:
//! - Quality rating badge, score, debt and verdict
//! - Overview stats and per-language table
//! - Issue listings per category with severity badges and context
//! - File browser whose details panel is filled from the embedded data
//! - Recommendations, plus best practices and duplications when present
//!
//! Everything readable is rendered server-side. The chart datasets and the
//! per-file details travel in a `<script type="application/json">` block that
//! the static script below reads.

use crate::aggregate::relative_path;
use crate::models::{DuplicatedBlock, Issue, IssueCategory, Severity};
use crate::rating::QualityRating;
use crate::recommend::capitalize;
use crate::report::ReportModel;
use anyhow::Result;

/// Render report as standalone HTML
pub fn render(model: &ReportModel) -> Result<String> {
    let mut html = String::new();

    html.push_str(&render_head(model));
    html.push_str("<body>\n<div class=\"container\">\n");
    html.push_str(&render_header(model));
    html.push_str("<div class=\"content\">\n");

    html.push_str(&render_rating(model));
    html.push_str(&render_overview(model));
    html.push_str(&render_languages(model));
    html.push_str(&render_complexity(model));
    html.push_str(&render_largest_files(model));

    for category in IssueCategory::ALL {
        html.push_str(&render_category(model, category));
    }
    if !model.duplicated_code.is_empty() {
        html.push_str(&render_duplications(model));
    }

    html.push_str(&render_file_browser(model));
    html.push_str(&render_recommendations(model));
    if model.best_practices.values().any(|tips| !tips.is_empty()) {
        html.push_str(&render_best_practices(model));
    }

    html.push_str("</div>\n"); // content
    html.push_str(&render_footer());
    html.push_str("</div>\n");
    html.push_str(&render_data(model)?);
    html.push_str("<script>\n");
    html.push_str(SCRIPT);
    html.push_str("</script>\n</body>\n</html>");

    Ok(html)
}

fn render_head(model: &ReportModel) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>debtscope - {}</title>
    <style>
{CSS}
    </style>
</head>
"#,
        html_escape(&model.project_name())
    )
}

fn render_header(model: &ReportModel) -> String {
    format!(
        r#"<div class="header">
    <h1>{} code health</h1>
    <p class="path">{}</p>
    <p class="timestamp">Analyzed {}</p>
</div>
"#,
        html_escape(&model.project_name()),
        html_escape(&model.project_root.display().to_string()),
        html_escape(&model.analysis_date)
    )
}

fn render_rating(model: &ReportModel) -> String {
    format!(
        r#"<div class="rating-section">
    <div class="rating-badge {}">{}</div>
    <div class="score">Maintainability: {}/100</div>
    <div class="debt">Technical debt: {} days to fix</div>
    <blockquote class="verdict">{}</blockquote>
</div>
"#,
        rating_class(model.rating.tier),
        model.rating.tier,
        model.maintainability_score,
        model.complexity.technical_debt_days,
        html_escape(&model.rating.flavor_text)
    )
}

fn render_overview(model: &ReportModel) -> String {
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Overview</h2>\n    <div class=\"stats-grid\">\n",
    );
    let stats = [
        ("Files", model.total_files.to_string()),
        ("Lines", model.lines.total.to_string()),
        ("Code lines", model.lines.code.to_string()),
        ("Comment lines", model.lines.comments.to_string()),
        ("Comment density", format!("{:.1}%", model.comment_density_pct)),
        ("Functions", model.complexity.function_count.to_string()),
    ];
    for (label, value) in stats {
        html.push_str(&stat_item(label, &value));
    }
    html.push_str("    </div>\n");

    html.push_str("    <div class=\"severity-summary\">\n");
    for category in IssueCategory::ALL {
        html.push_str(&format!(
            "        <a class=\"severity-item\" href=\"#{}\"><span class=\"severity-label\">{}</span><span class=\"severity-count\">{}</span></a>\n",
            category.label(),
            category.title(),
            model.totals.get(category)
        ));
    }
    html.push_str("    </div>\n");
    html.push_str("    <canvas id=\"chart-issue-categories\" class=\"chart\" width=\"560\" height=\"220\"></canvas>\n");
    html.push_str("</div>\n");
    html
}

fn render_languages(model: &ReportModel) -> String {
    if model.language_stats.is_empty() {
        return String::new();
    }

    let mut html = String::from(
        r#"<div class="section">
    <h2 class="section-title">Languages</h2>
    <table>
        <thead><tr><th>Language</th><th>Files</th><th>Share</th></tr></thead>
        <tbody>
"#,
    );
    for share in &model.language_stats {
        html.push_str(&format!(
            r#"        <tr><td>{}</td><td>{}</td><td><div class="metric-bar"><div class="metric-bar-fill" style="width: {}%"></div></div>{:.1}%</td></tr>
"#,
            html_escape(share.language.name()),
            share.count,
            share.percentage,
            share.percentage
        ));
    }
    html.push_str("        </tbody>\n    </table>\n");
    html.push_str("    <canvas id=\"chart-languages\" class=\"chart\" width=\"560\" height=\"220\"></canvas>\n");
    html.push_str("</div>\n");
    html
}

fn render_complexity(model: &ReportModel) -> String {
    let metrics = &model.complexity;
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Complexity</h2>\n    <div class=\"stats-grid\">\n",
    );
    let stats = [
        ("Maintainability index", format!("{:.1}", metrics.maintainability_index)),
        ("Avg function complexity", format!("{:.1}", metrics.avg_function_complexity)),
        ("Avg function size", format!("{:.1}", metrics.avg_function_size)),
        ("Avg parameters", format!("{:.1}", metrics.avg_function_params)),
        ("Duplicated blocks", metrics.duplicated_code_blocks.to_string()),
    ];
    for (label, value) in stats {
        html.push_str(&stat_item(label, &value));
    }
    html.push_str("    </div>\n");
    html.push_str("    <canvas id=\"chart-complexity\" class=\"chart\" width=\"560\" height=\"220\"></canvas>\n");
    html.push_str("</div>\n");
    html
}

fn render_largest_files(model: &ReportModel) -> String {
    if model.largest_files.is_empty() {
        return String::new();
    }

    let mut html = String::from(
        r#"<div class="section">
    <h2 class="section-title">Largest files</h2>
    <table>
        <thead><tr><th>File</th><th>Language</th><th>Lines</th><th>Issues</th></tr></thead>
        <tbody>
"#,
    );
    for file in &model.largest_files {
        html.push_str(&format!(
            "        <tr><td class=\"mono\" title=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&file.path),
            html_escape(&file.name),
            file.language,
            file.lines,
            file.issues
        ));
    }
    html.push_str("        </tbody>\n    </table>\n</div>\n");
    html
}

fn render_category(model: &ReportModel, category: IssueCategory) -> String {
    let map = model.issues.map(category);
    let mut html = format!(
        "<div class=\"section\" id=\"{}\">\n    <h2 class=\"section-title\">{} ({})</h2>\n",
        category.label(),
        category.title(),
        model.totals.get(category)
    );

    if map.values().all(|issues| issues.is_empty()) {
        html.push_str("    <p class=\"empty\">None found.</p>\n</div>\n");
        return html;
    }

    for (path, issues) in map {
        if issues.is_empty() {
            continue;
        }
        html.push_str(&format!(
            "    <h3 class=\"file-heading mono\">{}</h3>\n    <div class=\"issue-list\">\n",
            html_escape(&relative_path(path, &model.project_root))
        ));
        for issue in issues {
            html.push_str(&render_issue(issue));
        }
        html.push_str("    </div>\n");
    }
    html.push_str("</div>\n");
    html
}

fn render_issue(issue: &Issue) -> String {
    let line = issue
        .line_number
        .map(|l| format!("Line {l}: "))
        .unwrap_or_default();

    let context = issue
        .context
        .as_ref()
        .map(|ctx| format!("\n            <pre class=\"context\">{}</pre>", html_escape(ctx)))
        .unwrap_or_default();

    format!(
        r#"        <div class="issue-card">
            <div class="issue-header">
                <span class="severity-badge {}">{}</span>
                <span class="issue-kind">{}</span>
            </div>
            <div class="issue-description">{}{}</div>{}
        </div>
"#,
        severity_class(issue.severity),
        issue.severity,
        html_escape(&issue.kind),
        line,
        html_escape(&issue.description),
        context
    )
}

fn render_duplications(model: &ReportModel) -> String {
    let mut html = format!(
        "<div class=\"section\" id=\"duplications\">\n    <h2 class=\"section-title\">Duplicated code ({})</h2>\n",
        model.duplicated_code.len()
    );
    for block in &model.duplicated_code {
        html.push_str(&render_duplicate(model, block));
    }
    html.push_str("</div>\n");
    html
}

fn render_duplicate(model: &ReportModel, block: &DuplicatedBlock) -> String {
    let places: Vec<String> = block
        .instances
        .iter()
        .map(|inst| {
            format!(
                "<li class=\"mono\">{}:{}-{}</li>",
                html_escape(&relative_path(&inst.file, &model.project_root)),
                inst.start_line,
                inst.end_line
            )
        })
        .collect();

    format!(
        r#"    <div class="issue-card">
        <div class="issue-header"><span class="issue-kind">{} lines, {} copies</span></div>
        <pre class="context">{}</pre>
        <ul class="instances">{}</ul>
    </div>
"#,
        block.size_lines,
        block.instances.len(),
        html_escape(&block.sample),
        places.join("")
    )
}

fn render_file_browser(model: &ReportModel) -> String {
    let mut html = String::from(
        r#"<div class="section" id="files">
    <h2 class="section-title">Files</h2>
    <div class="browser">
        <ul class="file-list">
"#,
    );
    for entry in &model.file_tree {
        html.push_str(&format!(
            "            <li class=\"file-row\" data-path=\"{}\"><span class=\"mono\">{}</span><span class=\"lang\">{}</span><span class=\"count\">{}</span></li>\n",
            html_escape(&entry.path),
            html_escape(&entry.path),
            entry.language,
            entry.issues
        ));
    }
    html.push_str(
        r#"        </ul>
        <div class="file-details" id="file-details"><p class="empty">Select a file to see its details.</p></div>
    </div>
</div>
"#,
    );
    html
}

fn render_recommendations(model: &ReportModel) -> String {
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Recommendations</h2>\n",
    );
    if model.recommendations.is_empty() {
        html.push_str("    <p class=\"empty\">Nothing pressing.</p>\n</div>\n");
        return html;
    }
    html.push_str("    <ol class=\"recommendations\">\n");
    for rec in &model.recommendations {
        html.push_str(&format!("        <li>{}</li>\n", html_escape(rec)));
    }
    html.push_str("    </ol>\n</div>\n");
    html
}

fn render_best_practices(model: &ReportModel) -> String {
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Best practices</h2>\n",
    );
    for (language, tips) in &model.best_practices {
        if tips.is_empty() {
            continue;
        }
        html.push_str(&format!(
            "    <details open>\n        <summary>{}</summary>\n        <ul>\n",
            html_escape(&capitalize(language))
        ));
        for tip in tips {
            html.push_str(&format!("            <li>{}</li>\n", html_escape(tip)));
        }
        html.push_str("        </ul>\n    </details>\n");
    }
    html.push_str("</div>\n");
    html
}

fn render_footer() -> String {
    r#"<div class="footer">
    <p>Generated by debtscope. Scores are estimates; read the findings before you refactor.</p>
</div>
"#
    .to_string()
}

/// Chart datasets and file details for the script, safe inside `<script>`
fn render_data(model: &ReportModel) -> Result<String> {
    let json = serde_json::to_string(&model.charts)?.replace("</", "<\\/");
    Ok(format!(
        "<script type=\"application/json\" id=\"report-data\">{json}</script>\n"
    ))
}

fn stat_item(label: &str, value: &str) -> String {
    format!(
        r#"        <div class="stat-item">
            <div class="stat-value">{}</div>
            <div class="stat-label">{}</div>
        </div>
"#,
        html_escape(value),
        label
    )
}

fn rating_class(tier: QualityRating) -> &'static str {
    match tier {
        QualityRating::Excellent => "rating-excellent",
        QualityRating::Good => "rating-good",
        QualityRating::Fair => "rating-fair",
        QualityRating::Poor => "rating-poor",
        QualityRating::VeryPoor => "rating-very-poor",
    }
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "severity-critical",
        Severity::High => "severity-high",
        Severity::Medium => "severity-medium",
        Severity::Low => "severity-low",
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const SCRIPT: &str = r#"(function () {
    var node = document.getElementById('report-data');
    if (!node) { return; }
    var data = JSON.parse(node.textContent);
    var palette = ['#6366f1', '#ef4444', '#f59e0b', '#10b981', '#0ea5e9', '#a855f7'];

    function drawBars(id, dataset) {
        var canvas = document.getElementById(id);
        if (!canvas || !canvas.getContext || !dataset) { return; }
        var ctx = canvas.getContext('2d');
        var points = dataset.points || [];
        var max = 1;
        points.forEach(function (p) { if (p.value > max) { max = p.value; } });
        var left = 150, top = 10, rowHeight = Math.max(18, Math.floor((canvas.height - 20) / Math.max(points.length, 1)));
        var width = canvas.width - left - 50;
        ctx.clearRect(0, 0, canvas.width, canvas.height);
        ctx.font = '12px sans-serif';
        ctx.textBaseline = 'middle';
        points.forEach(function (p, i) {
            var y = top + i * rowHeight;
            var barWidth = Math.round(width * p.value / max);
            ctx.fillStyle = '#475569';
            ctx.textAlign = 'right';
            ctx.fillText(p.label, left - 8, y + rowHeight / 2);
            ctx.fillStyle = palette[i % palette.length];
            ctx.fillRect(left, y + 3, barWidth, rowHeight - 6);
            ctx.fillStyle = '#1e293b';
            ctx.textAlign = 'left';
            ctx.fillText(String(p.value), left + barWidth + 6, y + rowHeight / 2);
        });
    }

    drawBars('chart-issue-categories', data.issue_categories);
    drawBars('chart-languages', data.languages);
    drawBars('chart-complexity', data.complexity);

    var panel = document.getElementById('file-details');
    function row(label, value) {
        var tr = document.createElement('tr');
        var th = document.createElement('th');
        var td = document.createElement('td');
        th.textContent = label;
        td.textContent = String(value);
        tr.appendChild(th);
        tr.appendChild(td);
        return tr;
    }
    function showFile(path) {
        var detail = (data.file_details || {})[path];
        if (!panel || !detail) { return; }
        panel.innerHTML = '';
        var title = document.createElement('h3');
        title.className = 'mono';
        title.textContent = path;
        panel.appendChild(title);
        var table = document.createElement('table');
        table.appendChild(row('Language', detail.language));
        table.appendChild(row('Lines', detail.lines));
        table.appendChild(row('Code', detail.code));
        table.appendChild(row('Comments', detail.comments));
        table.appendChild(row('Blank', detail.blank));
        table.appendChild(row('Code smells', detail.issues.code_smells));
        table.appendChild(row('Security', detail.issues.security));
        table.appendChild(row('Performance', detail.issues.performance));
        table.appendChild(row('Style', detail.issues.style));
        panel.appendChild(table);
    }

    var rows = document.querySelectorAll('.file-row');
    Array.prototype.forEach.call(rows, function (el) {
        el.addEventListener('click', function () {
            Array.prototype.forEach.call(rows, function (r) { r.classList.remove('selected'); });
            el.classList.add('selected');
            showFile(el.getAttribute('data-path'));
        });
    });
})();
"#;

const CSS: &str = r#"
:root {
    --primary-color: #4f46e5;
    --background-color: #f1f5f9;
    --text-color: #0f172a;
    --muted-color: #64748b;
    --card-background: #ffffff;
    --border-color: #e2e8f0;
}

* { margin: 0; padding: 0; box-sizing: border-box; }

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: var(--text-color);
    background: var(--background-color);
    padding: 2rem;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    background: var(--card-background);
    border-radius: 12px;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
    overflow: hidden;
}

.header { background: #1e293b; color: white; padding: 2.5rem 2rem; }
.header h1 { font-size: 2rem; }
.header .path { font-family: monospace; opacity: 0.8; }
.header .timestamp { opacity: 0.8; font-size: 0.9rem; }

.content { padding: 2rem; }

.rating-section {
    text-align: center;
    padding: 2rem;
    background: #f8fafc;
    border-radius: 8px;
    margin-bottom: 2rem;
}

.rating-badge {
    display: inline-block;
    font-size: 1.75rem;
    font-weight: bold;
    padding: 0.75rem 2rem;
    border-radius: 999px;
    margin-bottom: 1rem;
    color: white;
}

.rating-excellent { background: #10b981; }
.rating-good { background: #22c55e; }
.rating-fair { background: #eab308; }
.rating-poor { background: #f97316; }
.rating-very-poor { background: #ef4444; }

.score { font-size: 1.4rem; }
.debt { color: var(--muted-color); }
.verdict { margin-top: 1rem; font-style: italic; color: var(--muted-color); }

.section { margin-bottom: 2.5rem; }
.section-title {
    font-size: 1.4rem;
    margin-bottom: 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 2px solid var(--border-color);
}

.stats-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
    gap: 1rem;
    margin-bottom: 1rem;
}

.stat-item {
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1rem;
    text-align: center;
}
.stat-value { font-size: 1.6rem; font-weight: bold; }
.stat-label { font-size: 0.85rem; color: var(--muted-color); }

.severity-summary { display: flex; flex-wrap: wrap; gap: 1rem; margin-bottom: 1rem; }
.severity-item {
    display: flex;
    gap: 0.75rem;
    padding: 0.5rem 1.25rem;
    border-radius: 8px;
    border: 1px solid var(--border-color);
    color: inherit;
    text-decoration: none;
}
.severity-count { font-weight: bold; }

.chart { max-width: 100%; display: block; }

table { width: 100%; border-collapse: collapse; margin-bottom: 1rem; }
th, td { text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid var(--border-color); }
th { color: var(--muted-color); font-weight: 600; font-size: 0.85rem; }

.metric-bar { display: inline-block; width: 120px; height: 8px; background: #e2e8f0; border-radius: 4px; margin-right: 0.5rem; overflow: hidden; }
.metric-bar-fill { height: 100%; background: var(--primary-color); }

.mono { font-family: monospace; }
.empty { color: var(--muted-color); font-style: italic; }

.file-heading { font-size: 1rem; margin: 1rem 0 0.5rem; }
.issue-list { display: flex; flex-direction: column; gap: 0.5rem; }
.issue-card { border: 1px solid var(--border-color); border-radius: 8px; padding: 0.75rem 1rem; }
.issue-header { display: flex; align-items: center; gap: 0.75rem; margin-bottom: 0.25rem; }
.issue-kind { font-weight: 600; }
.issue-description { color: var(--muted-color); }
.context { background: #0f172a; color: #e2e8f0; padding: 0.75rem; border-radius: 6px; margin-top: 0.5rem; overflow-x: auto; }
.instances { margin: 0.5rem 0 0 1.25rem; }

.severity-badge {
    padding: 0.1rem 0.6rem;
    border-radius: 6px;
    font-size: 0.8rem;
    font-weight: 600;
    color: white;
    text-transform: uppercase;
}
.severity-critical { background: #dc2626; }
.severity-high { background: #ea580c; }
.severity-medium { background: #ca8a04; }
.severity-low { background: #2563eb; }

.browser { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.file-list { list-style: none; max-height: 420px; overflow-y: auto; border: 1px solid var(--border-color); border-radius: 8px; }
.file-row { display: flex; gap: 0.75rem; padding: 0.35rem 0.75rem; cursor: pointer; border-bottom: 1px solid var(--border-color); }
.file-row:hover, .file-row.selected { background: #eef2ff; }
.file-row .mono { flex: 1; overflow: hidden; text-overflow: ellipsis; }
.file-row .lang { color: var(--muted-color); }
.file-row .count { font-weight: 600; }
.file-details { border: 1px solid var(--border-color); border-radius: 8px; padding: 1rem; }

.recommendations { margin-left: 1.5rem; }
.recommendations li { margin-bottom: 0.4rem; }
details { margin-bottom: 0.75rem; }
summary { font-weight: 600; cursor: pointer; }
details ul { margin: 0.5rem 0 0 1.5rem; }

.footer { text-align: center; padding: 2rem; color: var(--muted-color); border-top: 1px solid var(--border-color); }

@media (max-width: 768px) {
    body { padding: 1rem; }
    .browser { grid-template-columns: 1fr; }
}

@media print {
    body { padding: 0; background: white; }
    .container { box-shadow: none; }
    .issue-card { page-break-inside: avoid; }
}
"#;
