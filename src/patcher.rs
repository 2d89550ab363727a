//! Sequential file patcher.
//!
//! Each target is read, decoded and written back independently. A failure on
//! one path is captured as that path's result and never stops the batch.

use crate::report;
use crate::rules::{self, ReplacementRule, DEFAULT_RULES};
use crate::write::{self, Persist, WriteMode};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;
use thiserror::Error;
use tracing::debug;

/// Why a single target could not be fixed.
///
/// Messages leave the path out; status lines already name it.
#[derive(Error, Debug)]
pub enum FixError {
    #[error("read failed: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file is not valid UTF-8: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("write failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FixError {
    pub fn path(&self) -> &Path {
        match self {
            FixError::Read { path, .. }
            | FixError::Decode { path, .. }
            | FixError::Write { path, .. } => path,
        }
    }
}

/// A successfully processed target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "FileFix reports whether the file changed"]
pub struct FileFix {
    pub file: PathBuf,
    /// Occurrences replaced across all rules
    pub replacements: usize,
    pub original: String,
    pub fixed: String,
}

impl FileFix {
    pub fn is_changed(&self) -> bool {
        self.original != self.fixed
    }
}

/// Per-path outcomes of a batch, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<(PathBuf, Result<FileFix, FixError>)>,
}

impl BatchReport {
    pub fn fixed(&self) -> impl Iterator<Item = &FileFix> {
        self.results.iter().filter_map(|(_, r)| r.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &FixError> {
        self.results.iter().filter_map(|(_, r)| r.as_ref().err())
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }
}

/// Applies a rule sequence to files on disk.
///
/// `P` decides how fixed content reaches the disk; [`WriteMode`] unless
/// replaced through [`Patcher::persist_with`].
#[derive(Debug, Clone)]
pub struct Patcher<P = WriteMode> {
    rules: &'static [ReplacementRule],
    persist: P,
    dry_run: bool,
    show_diff: bool,
}

impl Default for Patcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Patcher {
    /// Patcher using [`DEFAULT_RULES`] and in-place writes.
    pub fn new() -> Self {
        Self {
            rules: &DEFAULT_RULES,
            persist: WriteMode::default(),
            dry_run: false,
            show_diff: false,
        }
    }

    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.persist = mode;
        self
    }
}

impl<P: Persist> Patcher<P> {
    pub fn rules(mut self, rules: &'static [ReplacementRule]) -> Self {
        self.rules = rules;
        self
    }

    /// Swap the write strategy, keeping every other setting.
    pub fn persist_with<Q: Persist>(self, persist: Q) -> Patcher<Q> {
        Patcher {
            rules: self.rules,
            persist,
            dry_run: self.dry_run,
            show_diff: self.show_diff,
        }
    }

    /// Decode and report without writing anything back.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Print a unified diff for every file whose content changes.
    pub fn show_diff(mut self, show_diff: bool) -> Self {
        self.show_diff = show_diff;
        self
    }

    /// Fix a single file: read, decode, write back.
    ///
    /// The write happens even when nothing was replaced, unless this is a
    /// dry run.
    pub fn patch_file(&self, path: &Path) -> Result<FileFix, FixError> {
        let bytes = write::read_bytes(path).map_err(|source| FixError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let original = String::from_utf8(bytes).map_err(|source| FixError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let decoded = rules::decode(&original, self.rules);

        if !self.dry_run {
            self.persist
                .persist(path, decoded.text.as_bytes())
                .map_err(|source| FixError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
        }

        Ok(FileFix {
            file: path.to_path_buf(),
            replacements: decoded.replacements,
            original,
            fixed: decoded.text,
        })
    }

    /// Fix every path in order, writing one status line per path and a final
    /// summary line to `out`.
    ///
    /// Per-file failures end up in the returned report. Only errors writing
    /// to `out` itself are returned as `Err`.
    pub fn patch_all<T, W>(&self, paths: &[T], out: &mut W) -> io::Result<BatchReport>
    where
        T: AsRef<Path>,
        W: Write,
    {
        let mut batch = BatchReport::default();

        for path in paths {
            let path = path.as_ref();
            let result = self.patch_file(path);

            match &result {
                Ok(fix) => {
                    debug!(
                        path = %path.display(),
                        replacements = fix.replacements,
                        dry_run = self.dry_run,
                        "fixed file"
                    );
                    report::fixed(out, path, fix, self.dry_run)?;
                    if self.show_diff && fix.is_changed() {
                        report::diff(out, path, &fix.original, &fix.fixed)?;
                    }
                }
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "failed to fix file");
                    report::failed(out, path, err)?;
                }
            }

            batch.results.push((path.to_path_buf(), result));
        }

        report::summary(out)?;
        Ok(batch)
    }
}
