use serde::Deserialize;
use std::collections::hash_map::{Entry, HashMap};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Files fixed when no target-list file is given, in processing order.
pub const DEFAULT_FILES: [&str; 3] = [
    "frontend/src/screens/FeeManagementScreen.js",
    "backend/controllers/studentController.js",
    "backend/controllers/feeController.js",
];

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FixConfig {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub meta: Metadata,
}

impl Default for FixConfig {
    /// The built-in target list.
    fn default() -> Self {
        Self {
            files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
            meta: Metadata::default(),
        }
    }
}

impl FixConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.files.is_empty() {
            issues.push(ValidationIssue::EmptyFileList);
        }

        // `a.js`, `./a.js` and `a.js/` all name the same target
        let mut seen: HashMap<PathBuf, &str> = HashMap::new();
        for (index, file) in self.files.iter().enumerate() {
            if file.trim().is_empty() {
                issues.push(ValidationIssue::BlankEntry { index });
                continue;
            }
            match seen.entry(normalize(file)) {
                Entry::Occupied(first) => issues.push(ValidationIssue::Duplicate {
                    file: file.clone(),
                    first: first.get().to_string(),
                }),
                Entry::Vacant(slot) => {
                    slot.insert(file.as_str());
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Resolve target paths, keeping declaration order.
    ///
    /// Relative entries are joined onto `root` when one is given. Absolute
    /// entries are returned as is.
    pub fn resolve_paths(&self, root: Option<&Path>) -> Vec<PathBuf> {
        self.files
            .iter()
            .map(|file| {
                let path = Path::new(file);
                match root {
                    Some(root) if path.is_relative() => root.join(path),
                    _ => path.to_path_buf(),
                }
            })
            .collect()
    }
}

/// Lexical form used to compare entries: `.` components dropped, no
/// filesystem access.
fn normalize(file: &str) -> PathBuf {
    Path::new(file)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Resolve relative entries against the config file's directory
    #[serde(default)]
    pub config_relative: bool,
    /// Exit non-zero when any file fails
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyFileList,
    BlankEntry { index: usize },
    Duplicate { file: String, first: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyFileList => write!(f, "config lists no files"),
            ValidationIssue::BlankEntry { index } => {
                write!(f, "files[{index}] is blank")
            }
            ValidationIssue::Duplicate { file, first } if file == first => {
                write!(f, "file '{file}' is listed more than once")
            }
            ValidationIssue::Duplicate { file, first } => {
                write!(f, "file '{file}' names the same target as '{first}'")
            }
        }
    }
}
