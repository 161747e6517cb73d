//! Writing release notes to disk and to CI outputs

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use relnotes_core::ChangelogError;
use tracing::{debug, info};

use crate::types::ReleaseNotes;

/// Heredoc delimiter used for multiline GitHub Actions outputs
const OUTPUT_DELIMITER: &str = "RELNOTES_EOF";

/// Write the document to `dir/<notes.file>`, or to `notes.file` if it is absolute.
///
/// Returns the path that was written.
pub fn write_release_notes(notes: &ReleaseNotes, dir: &Path) -> Result<PathBuf, ChangelogError> {
    let path = dir.join(&notes.file);
    write_to(&path, notes.contents.as_bytes())?;
    info!(path = %path.display(), bytes = notes.contents.len(), "release notes written");
    Ok(path)
}

fn write_to(path: &Path, contents: &[u8]) -> Result<(), ChangelogError> {
    let wrap = |source| ChangelogError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(wrap)?;
    file.write_all(contents).map_err(wrap)?;
    file.flush().map_err(wrap)?;
    Ok(())
}

/// Append the `contents` and `file` outputs to a GitHub Actions output file
pub fn write_github_outputs(notes: &ReleaseNotes, output_file: &Path) -> Result<(), ChangelogError> {
    let wrap = |source| ChangelogError::WriteFailed {
        path: output_file.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output_file)
        .map_err(wrap)?;

    for (key, value) in notes.outputs() {
        if value.contains('\n') {
            writeln!(file, "{}<<{}", key, OUTPUT_DELIMITER).map_err(wrap)?;
            writeln!(file, "{}", value.trim_end_matches('\n')).map_err(wrap)?;
            writeln!(file, "{}", OUTPUT_DELIMITER).map_err(wrap)?;
        } else {
            writeln!(file, "{}={}", key, value).map_err(wrap)?;
        }
    }

    debug!(path = %output_file.display(), "github outputs written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassificationSummary;
    use tempfile::TempDir;

    fn notes(contents: &str) -> ReleaseNotes {
        ReleaseNotes {
            contents: contents.to_string(),
            file: PathBuf::from("changelog.md"),
            summary: ClassificationSummary::default(),
            diagnostics: vec![],
        }
    }

    #[test]
    fn test_write_release_notes() {
        let temp = TempDir::new().unwrap();
        let notes = notes("### Fixes\n\n* Fix Y (#20 by @b)\n");

        let path = write_release_notes(&notes, temp.path()).unwrap();

        assert_eq!(path, temp.path().join("changelog.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), notes.contents);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("changelog.md"), "old contents that are longer").unwrap();

        let path = write_release_notes(&notes("new"), temp.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = write_release_notes(&notes("x"), &missing).unwrap_err();
        assert!(matches!(err, ChangelogError::WriteFailed { .. }));
    }

    #[test]
    fn test_write_github_outputs() {
        let temp = TempDir::new().unwrap();
        let output_file = temp.path().join("github_output");
        std::fs::write(&output_file, "previous=1\n").unwrap();

        write_github_outputs(&notes("### Fixes\n\n* Fix Y (#20 by @b)\n"), &output_file).unwrap();

        let written = std::fs::read_to_string(&output_file).unwrap();
        assert_eq!(
            written,
            "previous=1\n\
             contents<<RELNOTES_EOF\n\
             ### Fixes\n\
             \n\
             * Fix Y (#20 by @b)\n\
             RELNOTES_EOF\n\
             file=changelog.md\n"
        );
    }

    #[test]
    fn test_write_github_outputs_single_line() {
        let temp = TempDir::new().unwrap();
        let output_file = temp.path().join("github_output");

        write_github_outputs(&notes(""), &output_file).unwrap();

        let written = std::fs::read_to_string(&output_file).unwrap();
        assert_eq!(written, "contents=\nfile=changelog.md\n");
    }
}
