//! URL sinks for stdout and files

use crate::output::traits::{OutputError, OutputResult, UrlSink};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use url::Url;

/// Writes URLs, one per line, to any `Write` implementation
fn write_lines<W: Write>(writer: &mut W, urls: &[Url]) -> io::Result<usize> {
    for url in urls {
        writeln!(writer, "{}", url)?;
    }
    writer.flush()?;
    Ok(urls.len())
}

/// Sink that prints URLs to standard output
#[derive(Debug, Default)]
pub struct StdoutSink;

impl UrlSink for StdoutSink {
    fn write_urls(&mut self, urls: &[Url]) -> OutputResult<usize> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        Ok(write_lines(&mut handle, urls)?)
    }

    fn destination(&self) -> String {
        "stdout".to_string()
    }
}

/// Sink that writes URLs to a file
///
/// The list is written to a temporary sibling first and renamed into place,
/// so the target is either absent or complete.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Creates a sink targeting `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> OutputResult<PathBuf> {
        let name = self
            .path
            .file_name()
            .ok_or_else(|| OutputError::Write(format!("{} is not a file path", self.path.display())))?;
        let mut staged = name.to_os_string();
        staged.push(".partial");
        Ok(self.path.with_file_name(staged))
    }
}

impl UrlSink for FileSink {
    fn write_urls(&mut self, urls: &[Url]) -> OutputResult<usize> {
        let staging = self.staging_path()?;

        let written = {
            let file = fs::File::create(&staging)?;
            let mut writer = BufWriter::new(file);
            match write_lines(&mut writer, urls) {
                Ok(n) => n,
                Err(e) => {
                    drop(writer);
                    let _ = fs::remove_file(&staging);
                    return Err(e.into());
                }
            }
        };

        fs::rename(&staging, &self.path)?;
        Ok(written)
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}
