/*!
 * Common test utilities for the netflix-subs test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Three compliant English cues
pub const COMPLIANT_SRT: &str = r#"1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
"#;

/// English cues with a short duration, a long line and a tight gap
pub const FAULTY_SRT: &str = r#"1
00:00:01,000 --> 00:00:01,500
Hi

2
00:00:03,000 --> 00:00:07,000
this is a very long line of forty five characters

3
00:00:07,040 --> 00:00:09,000
<i>Close behind</i>
"#;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample compliant subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, COMPLIANT_SRT)
}
