//! Console rendering for batch runs.

use crate::patcher::{FileFix, FixError};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::io::{self, Write};
use std::path::Path;

pub const SUMMARY: &str = "All files fixed!";

pub fn fixed<W: Write>(out: &mut W, path: &Path, fix: &FileFix, dry_run: bool) -> io::Result<()> {
    let verb = if dry_run { "Would fix" } else { "Fixed" };
    let detail = match fix.replacements {
        0 => "no entities".to_string(),
        1 => "1 replacement".to_string(),
        n => format!("{n} replacements"),
    };
    writeln!(
        out,
        "{} {} {} {}",
        "✓".green(),
        verb,
        path.display(),
        format!("({detail})").dimmed()
    )
}

pub fn failed<W: Write>(out: &mut W, path: &Path, err: &FixError) -> io::Result<()> {
    writeln!(out, "{} Error fixing {}: {}", "✗".red(), path.display(), err)
}

/// Unified line diff between the original and fixed content.
pub fn diff<W: Write>(out: &mut W, path: &Path, original: &str, fixed: &str) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        format!("--- {} (original)", path.display()).dimmed()
    )?;
    writeln!(out, "{}", format!("+++ {} (fixed)", path.display()).dimmed())?;

    let diff = TextDiff::from_lines(original, fixed);
    for change in diff.iter_all_changes() {
        let line = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        write!(out, "{}", line)?;
        if change.missing_newline() {
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn summary<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{SUMMARY}")
}
