//! CLI command definitions and handlers

mod analyze;
mod init;

pub use analyze::AnalyzeOptions;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// debtscope - code health reports from line metrics and detector output
#[derive(Parser, Debug)]
#[command(name = "debtscope")]
#[command(
    version,
    about = "Turn line metrics and detector findings into a code health report",
    long_about = "debtscope scans a project for source files, counts code, comment and blank \
lines, merges in the issues found by external detectors (a JSON document passed with \
--issues), and renders a quality rating, recommendations and charts as text, HTML or JSON.\n\n\
Run without a subcommand to analyze the current directory:\n  \
debtscope .",
    after_help = "\
Examples:
  debtscope .                                      Text report for the current directory
  debtscope analyze . --issues analysis.json       Include detector findings
  debtscope analyze . --format html --open         Write an HTML report and open it
  debtscope analyze . --format json -o report.json JSON for scripting
  debtscope analyze . --seed 7                     Reproducible verdict line
  debtscope init                                   Write an example debtscope.toml"
)]
pub struct Cli {
    /// Path to the project (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a debtscope.toml with example settings
    Init,

    /// Scan the project and render a report
    #[command(after_help = "\
Examples:
  debtscope analyze .                                   Text report on stdout
  debtscope analyze . --issues analysis.json            Merge detector findings
  debtscope analyze . --format html                     Auto-named HTML file in the temp dir
  debtscope analyze . --format text -o report.txt       Write the text report to a file
  debtscope analyze . --largest 20                      Longer largest-files table")]
    Analyze {
        /// Detector findings (JSON analysis document)
        #[arg(long, short = 'i')]
        issues: Option<PathBuf>,

        /// Output format: text, html, json (default from debtscope.toml, else text)
        #[arg(long, short = 'f', value_parser = ["text", "html", "json"])]
        format: Option<String>,

        /// Output file path (default: stdout, or auto-named for html)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Open the written report in the default viewer
        #[arg(long)]
        open: bool,

        /// Seed for the verdict line (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Rows in the largest-files table
        #[arg(long)]
        largest: Option<usize>,
    },
}

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init) => init::run(&cli.path),

        Some(Commands::Analyze {
            issues,
            format,
            output,
            open,
            seed,
            largest,
        }) => analyze::run(
            &cli.path,
            AnalyzeOptions {
                issues,
                format,
                output,
                open,
                seed,
                largest,
            },
        ),

        None => {
            check_unknown_subcommand(&cli.path)?;
            analyze::run(&cli.path, AnalyzeOptions::default())
        }
    }
}

/// Catch `debtscope anlyze` being read as a project path
fn check_unknown_subcommand(path: &std::path::Path) -> Result<()> {
    let path_str = path.to_string_lossy();
    let looks_like_command = !path.exists()
        && !path_str.contains('/')
        && !path_str.contains('\\')
        && !path_str.starts_with('.');
    if looks_like_command {
        anyhow::bail!(
            "Unknown command '{}'. Run 'debtscope --help' for available commands.\n\nDid you mean one of: analyze, init?",
            path_str
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_flags() {
        let cli = Cli::parse_from([
            "debtscope", "analyze", "proj", "--issues", "a.json", "--format", "html", "--seed",
            "9", "--open",
        ]);
        assert_eq!(cli.path, PathBuf::from("proj"));
        match cli.command {
            Some(Commands::Analyze {
                issues,
                format,
                seed,
                open,
                output,
                largest,
            }) => {
                assert_eq!(issues, Some(PathBuf::from("a.json")));
                assert_eq!(format.as_deref(), Some("html"));
                assert_eq!(seed, Some(9));
                assert!(open);
                assert!(output.is_none());
                assert!(largest.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["debtscope", "analyze", "--format", "sarif"]).is_err());
    }

    #[test]
    fn test_unknown_subcommand_detection() {
        assert!(check_unknown_subcommand(std::path::Path::new("anlyze")).is_err());
        assert!(check_unknown_subcommand(std::path::Path::new(".")).is_ok());
        assert!(check_unknown_subcommand(std::path::Path::new("./missing")).is_ok());
    }
}
