//! Writing rendered reports to disk and opening them in a viewer
//!
//! Both steps are best effort: a failure here never touches the model that
//! was already built, and the caller decides how loudly to complain.

use crate::error::ArtifactError;
use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

pub type Result<T> = std::result::Result<T, ArtifactError>;

/// `debtscope_report_<project>_<YYYYmmdd_HHMMSS>.<ext>`
pub fn artifact_file_name<Tz: TimeZone>(project: &str, ext: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let project: String = project
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let project = if project.is_empty() { "project".to_string() } else { project };
    format!(
        "debtscope_report_{}_{}.{}",
        project,
        at.format("%Y%m%d_%H%M%S"),
        ext
    )
}

/// Write `contents` into `dir` under a timestamped name
pub fn write_artifact(dir: &Path, project: &str, ext: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(artifact_file_name(project, ext, &Local::now()));
    write_to(&path, contents)?;
    Ok(path)
}

/// Write `contents` to an explicit path, creating parent directories
pub fn write_to(path: &Path, contents: &str) -> Result<()> {
    let wrap = |source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    std::fs::write(path, contents).map_err(wrap)?;
    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Platform command that opens a file with its default application
pub fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Open `path` in the platform viewer and wait for the launcher to return
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let mut cmd = viewer_command(path);
    let program = cmd.get_program().to_string_lossy().to_string();
    info!("Opening {} with {}", path.display(), program);

    let status = cmd.status().map_err(|source| ArtifactError::Launch {
        program: program.clone(),
        source,
    })?;
    if !status.success() {
        return Err(ArtifactError::ViewerExit {
            program,
            status: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}
