use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

/// How fixed content is persisted over the original file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate the existing file and write in place. Keeps the inode,
    /// ownership and permissions of the target.
    #[default]
    Truncate,
    /// Write a tempfile in the same directory, fsync, then rename over the
    /// target. Either the full write lands or nothing changes.
    Atomic,
}

/// Persists fixed content over a target path.
pub trait Persist {
    fn persist(&self, path: &Path, content: &[u8]) -> io::Result<()>;
}

impl Persist for WriteMode {
    fn persist(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        match self {
            WriteMode::Truncate => truncate_write(path, content),
            WriteMode::Atomic => atomic_write(path, content),
        }
    }
}

/// Read the whole file. The handle is closed before returning, on success
/// and on error alike.
pub(crate) fn read_bytes(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

fn truncate_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(content)?;
    file.flush()
}

/// Atomic file write: tempfile + fsync + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    // Tempfile must live on the same filesystem for the rename to be atomic
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    // Keep the target's permissions rather than the tempfile's 0600
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
