//! File discovery and line metrics
//!
//! Walks a project with the `ignore` walker (hidden files and `.gitignore`d
//! paths are skipped), keeps files whose extension maps to a [`Language`], and
//! counts total/code/comment/blank lines with a prefix heuristic.

use crate::models::{FileMetric, Language};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory names never descended into
pub const IGNORE_DIRS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
    "env",
    ".env",
    "build",
    "dist",
    ".idea",
    ".vscode",
];

const COMMENT_PREFIXES: &[&str] = &["#", "//", "/*", "*"];

/// A file that matched the language table but could not be read
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of one scan, in walk order
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub files: Vec<FileMetric>,
    pub skipped: Vec<SkippedFile>,
}

/// Line counts for one file's contents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub lines: usize,
    pub code: usize,
    pub comments: usize,
    pub blank: usize,
}

/// Count lines the way the report expects
///
/// Every `\n`-separated segment is a line, so a trailing newline yields a
/// final blank line and empty content yields one blank line.
pub fn count_lines(content: &str) -> LineCounts {
    let mut counts = LineCounts::default();
    for line in content.split('\n') {
        counts.lines += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            counts.blank += 1;
        } else if COMMENT_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
            counts.comments += 1;
        }
    }
    counts.code = counts.lines - counts.blank - counts.comments;
    counts
}

/// Language of `path` if it is a file type we report on
pub fn language_of(path: &Path) -> Option<Language> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
}

/// List candidate source files under `root`, sorted by path
pub fn discover_files(root: &Path, exclude: &[String]) -> Vec<PathBuf> {
    let excluded: Vec<String> = IGNORE_DIRS
        .iter()
        .map(|s| s.to_string())
        .chain(exclude.iter().cloned())
        .collect();

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(is_dir && excluded.iter().any(|d| entry.file_name() == d.as_str()))
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_some_and(|t| t.is_file()) && language_of(path).is_some() {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => warn!("Skipping unreadable entry: {}", e),
        }
    }
    files
}

/// Read one file and build its metric
pub fn measure_file(path: &Path) -> std::io::Result<Option<FileMetric>> {
    let Some(language) = language_of(path) else {
        return Ok(None);
    };
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    let counts = count_lines(&content);
    Ok(Some(FileMetric {
        path: path.to_string_lossy().to_string(),
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        lines: counts.lines,
        code: counts.code,
        comments: counts.comments,
        blank: counts.blank,
        language,
        issue_count: 0,
    }))
}

/// Scan `root` and measure every source file in parallel
pub fn collect_metrics(root: &Path, exclude: &[String]) -> ScanResult {
    let paths = discover_files(root, exclude);
    debug!("Discovered {} source files under {}", paths.len(), root.display());

    let measured: Vec<(PathBuf, std::io::Result<Option<FileMetric>>)> = paths
        .into_par_iter()
        .map(|path| {
            let result = measure_file(&path);
            (path, result)
        })
        .collect();

    let mut scan = ScanResult::default();
    for (path, result) in measured {
        match result {
            Ok(Some(metric)) => scan.files.push(metric),
            Ok(None) => {}
            Err(e) => {
                warn!("Error reading {}: {}", path.display(), e);
                scan.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }
    scan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_count_lines_heuristic() {
        let content = "# header\nimport os\n\n// note\n/* block\n * more\n*/\nx = 1";
        let counts = count_lines(content);
        assert_eq!(counts.lines, 8);
        assert_eq!(counts.blank, 1);
        assert_eq!(counts.comments, 5);
        assert_eq!(counts.code, 2);
    }

    #[test]
    fn test_count_lines_trailing_newline() {
        let counts = count_lines("fn main() {}\n");
        assert_eq!(counts.lines, 2);
        assert_eq!(counts.blank, 1);
        assert_eq!(counts.code, 1);
    }

    #[test]
    fn test_count_lines_empty() {
        let counts = count_lines("");
        assert_eq!(counts, LineCounts { lines: 1, code: 0, comments: 0, blank: 1 });
    }

    #[test]
    fn test_collect_skips_ignored_and_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("vendor")).unwrap();
        fs::write(root.join("src/app.py"), "print('hi')\n").unwrap();
        fs::write(root.join("src/lib.rs"), "// lib\nfn f() {}").unwrap();
        fs::write(root.join("README.md"), "# readme").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "x").unwrap();
        fs::write(root.join("vendor/dep.go"), "package dep").unwrap();
        fs::write(root.join(".hidden.py"), "x = 1").unwrap();

        let scan = collect_metrics(root, &["vendor".to_string()]);
        let names: Vec<&str> = scan.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["app.py", "lib.rs"]);
        assert!(scan.skipped.is_empty());

        let lib = &scan.files[1];
        assert_eq!(lib.language, Language::Rust);
        assert_eq!(lib.lines, 2);
        assert_eq!(lib.comments, 1);
        assert_eq!(lib.issue_count, 0);
    }

    #[test]
    fn test_measure_ignores_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();
        assert!(measure_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_measure_missing_file_errors() {
        assert!(measure_file(Path::new("/no/such/file.py")).is_err());
    }

    #[test]
    fn test_lossy_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.py");
        fs::write(&path, [0x66, 0x6f, 0xff, 0x0a, 0x23, 0x20, 0x63]).unwrap();
        let metric = measure_file(&path).unwrap().unwrap();
        assert_eq!(metric.lines, 2);
        assert_eq!(metric.comments, 1);
    }
}
