use anyhow::{Result, Context};
use std::fs;
use std::io::{IsTerminal, Read, Write};
use std::path::Path;

use crate::errors::AppError;

// @module: File and standard stream utilities

/// Path that stands for standard input or standard output
pub const STDIO_SENTINEL: &str = "-";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Path refers to a standard stream
    pub fn is_stdio<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref() == Path::new(STDIO_SENTINEL)
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    /// Read a file into a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .map_err(AppError::from)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .map_err(AppError::from)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Read a file, or standard input for `-`
    pub fn read_input<P: AsRef<Path>>(path: P) -> Result<String> {
        if !Self::is_stdio(&path) {
            return Self::read_to_string(path);
        }

        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(AppError::Usage("no input: pass a file or pipe subtitles to standard input".to_string()).into());
        }

        let mut content = String::new();
        stdin
            .lock()
            .read_to_string(&mut content)
            .map_err(AppError::from)
            .context("Failed to read standard input")?;
        Ok(content)
    }

    /// Write to a file, or standard output for `-`
    pub fn write_output<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if !Self::is_stdio(&path) {
            return Self::write_to_file(path, content);
        }

        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .context("Failed to write standard output")
    }
}
