//! Output handling for reports.

use crate::error::SwcDiffError;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// The file path, if writing to a file
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdout => None,
            Self::File(path) => Some(path),
        }
    }

    /// Check if output is to a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Determine if color should be used based on flags, environment and target.
///
/// Files never get ANSI escapes.
#[must_use]
pub fn should_use_color(no_color_flag: bool, target: &OutputTarget) -> bool {
    !no_color_flag && std::env::var("NO_COLOR").is_err() && matches!(target, OutputTarget::Stdout)
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<(), SwcDiffError> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content).map_err(|e| SwcDiffError::io(path, e))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_target_from_option() {
        assert_eq!(OutputTarget::from_option(None), OutputTarget::Stdout);

        let path = PathBuf::from("/tmp/ports.csv");
        let target = OutputTarget::from_option(Some(path.clone()));
        assert_eq!(target.path(), Some(path.as_path()));
        assert!(!target.is_terminal());
    }

    #[test]
    fn test_should_use_color() {
        assert!(!should_use_color(true, &OutputTarget::Stdout));
        assert!(!should_use_color(
            false,
            &OutputTarget::File(PathBuf::from("out.txt"))
        ));

        let expected = std::env::var("NO_COLOR").is_err();
        assert_eq!(should_use_color(false, &OutputTarget::Stdout), expected);
    }

    #[test]
    fn test_write_output_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.csv");
        write_output("a,b\r\n", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\r\n");
    }

    #[test]
    fn test_write_output_missing_directory() {
        let target = OutputTarget::File(PathBuf::from("/definitely/not/here/report.csv"));
        let err = write_output("x", &target, true).unwrap_err();
        assert!(matches!(err, SwcDiffError::Io { path: Some(_), .. }));
    }
}
