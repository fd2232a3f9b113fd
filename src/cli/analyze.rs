//! Analyze command - scan, build the report model, render, deliver

use crate::artifact;
use crate::collector::{collect_metrics, ScanResult};
use crate::config::{load_project_config, ProjectConfig};
use crate::input::{load_analysis, AnalysisInput};
use crate::models::FileMetric;
use crate::rating::{FlavorSource, RatingClassifier, SeededSource, ThreadSource};
use crate::report::{build_report, IssueInput, ReportModel, ReportOptions};
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use chrono::Local;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Flags for one `analyze` run; `None` falls back to debtscope.toml
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub issues: Option<PathBuf>,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub open: bool,
    pub seed: Option<u64>,
    pub largest: Option<usize>,
}

/// Settings after merging flags over the project config
#[derive(Debug, Clone)]
struct Effective {
    format: OutputFormat,
    largest_files: usize,
    top_languages: usize,
    seed: Option<u64>,
    open: bool,
    output_dir: PathBuf,
}

impl Effective {
    fn resolve(opts: &AnalyzeOptions, config: &ProjectConfig, root: &Path) -> Result<Self> {
        let defaults = ReportOptions::new(root, "");
        let format = opts
            .format
            .as_deref()
            .or(config.report.format.as_deref())
            .unwrap_or("text");
        Ok(Self {
            format: OutputFormat::from_str(format)?,
            largest_files: opts
                .largest
                .or(config.report.largest_files)
                .unwrap_or(defaults.largest_files),
            top_languages: config.report.top_languages.unwrap_or(defaults.top_languages),
            seed: opts.seed.or(config.report.seed),
            open: opts.open || config.report.open.unwrap_or(false),
            output_dir: config.output_dir(root),
        })
    }
}

/// Run the analyze command
pub fn run(path: &Path, opts: AnalyzeOptions) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let config = load_project_config(&root);
    let settings = Effective::resolve(&opts, &config, &root)?;

    let scan = scan_project(&root, &config.scan.exclude);

    let analysis = match &opts.issues {
        Some(issues_path) => load_analysis(issues_path, &root)
            .with_context(|| format!("Failed to load issues from {}", issues_path.display()))?,
        None => AnalysisInput::default(),
    };
    let analysis_date = analysis
        .timestamp
        .clone()
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d %H:%M:%S").to_string());

    let mut report_options = ReportOptions::new(&root, analysis_date);
    report_options.largest_files = settings.largest_files;
    report_options.top_languages = settings.top_languages;

    let model = match settings.seed {
        Some(seed) => build(
            &scan.files,
            analysis.issues,
            &mut RatingClassifier::with_source(SeededSource::new(seed)),
            &report_options,
        )?,
        None => build(
            &scan.files,
            analysis.issues,
            &mut RatingClassifier::with_source(ThreadSource),
            &report_options,
        )?,
    };
    info!(
        "Rated {} as {} ({}/100)",
        model.project_name(),
        model.rating.tier,
        model.maintainability_score
    );

    let rendered = reporters::report_with_format(&model, settings.format)?;
    let written = deliver(&model, &rendered, &settings, opts.output.as_deref());

    if settings.open {
        match &written {
            Some(path) => {
                if let Err(e) = artifact::open_in_viewer(path) {
                    warn!("{}", e);
                    eprintln!(
                        "{} Could not open the report ({}). Open it manually: {}",
                        style("!").yellow(),
                        e,
                        style(path.display()).cyan()
                    );
                }
            }
            None => warn!("--open ignored: the report was not written to a file"),
        }
    }

    Ok(())
}

fn build<S: FlavorSource>(
    files: &[FileMetric],
    issues: IssueInput,
    classifier: &mut RatingClassifier<S>,
    options: &ReportOptions,
) -> Result<ReportModel> {
    build_report(files, issues, classifier, options).context("Failed to build report")
}

fn scan_project(root: &Path, exclude: &[String]) -> ScanResult {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message("Scanning source files...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let scan = collect_metrics(root, exclude);

    spinner.finish_with_message(format!(
        "{}Measured {} files{}",
        style("✓ ").green(),
        style(scan.files.len()).cyan(),
        if scan.skipped.is_empty() {
            String::new()
        } else {
            format!(" ({} unreadable, skipped)", style(scan.skipped.len()).yellow())
        }
    ));
    scan
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Put the rendered report where it belongs; returns the file if one was written
///
/// Write failures are warnings: the report is printed to stdout instead.
fn deliver(
    model: &ReportModel,
    rendered: &str,
    settings: &Effective,
    output: Option<&Path>,
) -> Option<PathBuf> {
    let result = match (output, settings.format) {
        (Some(path), _) => artifact::write_to(path, rendered).map(|_| path.to_path_buf()),
        (None, OutputFormat::Html) => artifact::write_artifact(
            &settings.output_dir,
            &model.project_name(),
            reporters::file_extension(settings.format),
            rendered,
        ),
        (None, _) => {
            println!("{}", rendered);
            return None;
        }
    };

    match result {
        Ok(path) => {
            eprintln!(
                "\n{}Report written to: {}",
                style("✓ ").green(),
                style(path.display()).cyan()
            );
            Some(path)
        }
        Err(e) => {
            warn!("{}", e);
            eprintln!(
                "{} Could not save the report ({}). Printing it instead.",
                style("!").yellow(),
                e
            );
            println!("{}", rendered);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;

    #[test]
    fn test_flags_override_config() {
        let config = ProjectConfig {
            report: ReportConfig {
                format: Some("html".into()),
                largest_files: Some(3),
                seed: Some(1),
                open: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        let opts = AnalyzeOptions {
            format: Some("json".into()),
            largest: Some(7),
            ..Default::default()
        };
        let settings = Effective::resolve(&opts, &config, Path::new("/proj")).unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.largest_files, 7);
        assert_eq!(settings.top_languages, 5);
        assert_eq!(settings.seed, Some(1));
        assert!(settings.open);
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = Effective::resolve(
            &AnalyzeOptions::default(),
            &ProjectConfig::default(),
            Path::new("/proj"),
        )
        .unwrap();
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(settings.largest_files, 10);
        assert!(settings.seed.is_none());
        assert!(!settings.open);
        assert_eq!(settings.output_dir, std::env::temp_dir());
    }

    #[test]
    fn test_bad_config_format_is_an_error() {
        let config = ProjectConfig {
            report: ReportConfig {
                format: Some("pdf".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(Effective::resolve(&AnalyzeOptions::default(), &config, Path::new("/p")).is_err());
    }

    #[test]
    fn test_run_writes_html_into_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("main.py"), "# entry\nprint('hi')\n").unwrap();
        std::fs::write(
            root.join("debtscope.toml"),
            "[report]\nformat = \"html\"\nseed = 3\noutput_dir = \"out\"\n",
        )
        .unwrap();

        run(root, AnalyzeOptions::default()).unwrap();

        let written: Vec<_> = std::fs::read_dir(root.join("out"))
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(written.len(), 1);
        let html = std::fs::read_to_string(&written[0]).unwrap();
        assert!(html.contains("main.py"));
    }
}
