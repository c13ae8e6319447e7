//! Command history persisted one entry per line.

use crate::error::ShellError;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bounded, chronological command history.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    path: Option<PathBuf>,
    max_entries: usize,
    entries: Vec<String>,
}

impl CommandHistory {
    /// History that is never written to disk.
    pub fn in_memory(max_entries: usize) -> Self {
        Self {
            path: None,
            max_entries: max_entries.max(1),
            entries: Vec::new(),
        }
    }

    /// Load history from `path`. A missing file is an empty history.
    pub fn load(path: impl Into<PathBuf>, max_entries: usize) -> Result<Self, ShellError> {
        let path = path.into();
        let mut history = Self {
            path: Some(path.clone()),
            max_entries: max_entries.max(1),
            entries: Vec::new(),
        };

        match fs::read_to_string(&path) {
            Ok(content) => {
                history.entries = content.lines().map(str::to_string).collect();
                history.trim();
                debug!(path = %path.display(), entries = history.entries.len(), "Loaded history");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(history)
    }

    /// Append an entry, skipping empty lines and immediate repeats.
    pub fn add(&mut self, line: &str) {
        if line.is_empty() || self.entries.last().map(String::as_str) == Some(line) {
            return;
        }
        self.entries.push(line.to_string());
        self.trim();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write all entries, creating the parent directory if needed.
    pub fn save(&self) -> Result<(), ShellError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(fs::File::create(path)?);
        for entry in &self.entries {
            writeln!(writer, "{}", entry)?;
        }
        writer.flush()?;
        debug!(path = %path.display(), entries = self.entries.len(), "Saved history");
        Ok(())
    }

    fn trim(&mut self) {
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }
}
