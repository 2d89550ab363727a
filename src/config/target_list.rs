//! Where the list of files to fix comes from, and what its relative entries
//! are relative to.

use crate::config::schema::{FixConfig, ValidationError};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Builtin,
    Inline,
    File(PathBuf),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Builtin => write!(f, "<built-in>"),
            Origin::Inline => write!(f, "<inline>"),
            Origin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read target list {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed target list {origin}{}: {source}", in_section(.section))]
    Parse {
        origin: Origin,
        /// Table or top-level key the error points into (`files`, `meta`)
        section: Option<String>,
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("target list {origin} rejected{}:\n{source}", relative_to(.base))]
    Invalid {
        origin: Origin,
        base: Option<PathBuf>,
        #[source]
        source: ValidationError,
    },
}

fn in_section(section: &Option<String>) -> String {
    match section {
        Some(section) => format!(" in `{section}`"),
        None => String::new(),
    }
}

fn relative_to(base: &Option<PathBuf>) -> String {
    match base {
        Some(base) => format!(" (entries relative to {})", base.display()),
        None => String::new(),
    }
}

/// A validated list of files plus the directory its relative entries
/// resolve against.
#[derive(Debug, Clone)]
pub struct TargetList {
    config: FixConfig,
    origin: Origin,
    base: Option<PathBuf>,
}

impl TargetList {
    /// The three built-in files, relative to the working directory.
    pub fn builtin() -> Self {
        Self {
            config: FixConfig::default(),
            origin: Origin::Builtin,
            base: None,
        }
    }

    /// Parse a target list that has no file behind it. `config_relative`
    /// has no directory to point at, so entries stay relative to the working
    /// directory.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        Self::from_toml(input, Origin::Inline, |_| None)
    }

    /// Read a target list file. With `meta.config_relative`, relative
    /// entries resolve against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&input, Origin::File(path.to_path_buf()), |config| {
            if !config.meta.config_relative {
                return None;
            }
            path.parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf)
        })
    }

    fn from_toml(
        input: &str,
        origin: Origin,
        base_for: impl FnOnce(&FixConfig) -> Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let config: FixConfig =
            toml_edit::de::from_str(input).map_err(|source| ConfigError::Parse {
                origin: origin.clone(),
                section: source
                    .span()
                    .and_then(|span| section_at(input, span.start)),
                source,
            })?;

        let base = base_for(&config);
        if let Err(source) = config.validate() {
            return Err(ConfigError::Invalid {
                origin,
                base,
                source,
            });
        }

        Ok(Self {
            config,
            origin,
            base,
        })
    }

    pub fn config(&self) -> &FixConfig {
        &self.config
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn base(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    pub fn is_strict(&self) -> bool {
        self.config.meta.strict
    }

    /// Target paths in declaration order. An explicit `root` wins over the
    /// config-relative base.
    pub fn paths(&self, root: Option<&Path>) -> Vec<PathBuf> {
        self.config.resolve_paths(root.or(self.base()))
    }
}

/// Name the table, or top-level key, whose text contains `offset`.
fn section_at(input: &str, offset: usize) -> Option<String> {
    let line_end = input
        .get(offset..)?
        .find('\n')
        .map_or(input.len(), |i| offset + i);

    let mut table = None;
    let mut key = None;
    for line in input[..line_end].lines() {
        let line = line.trim_start();
        if line.starts_with('[') {
            table = Some(line.trim_matches(|c: char| c == '[' || c == ']' || c == ' ').to_string());
        } else if table.is_none() {
            if let Some((name, _)) = line.split_once('=') {
                key = Some(name.trim().to_string());
            }
        }
    }
    table.or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_list() {
        let targets = TargetList::builtin();
        assert_eq!(targets.origin(), &Origin::Builtin);
        assert_eq!(targets.base(), None);
        assert!(!targets.is_strict());
        assert_eq!(targets.paths(None).len(), 3);
    }

    #[test]
    fn test_parse_basic() {
        let targets = TargetList::parse(
            r#"
files = ["frontend/a.js", "backend/b.js"]

[meta]
name = "fee-screens"
strict = true
config_relative = true
"#,
        )
        .unwrap();

        assert_eq!(targets.config().files, vec!["frontend/a.js", "backend/b.js"]);
        assert_eq!(targets.config().meta.name, "fee-screens");
        assert!(targets.is_strict());
        // Nothing to be relative to without a file
        assert_eq!(targets.base(), None);
        assert_eq!(targets.paths(None)[0], PathBuf::from("frontend/a.js"));
    }

    #[test]
    fn test_unknown_meta_key_names_meta() {
        let err = TargetList::parse("files = [\"a.js\"]\n\n[meta]\nstrcit = true\n").unwrap_err();

        match &err {
            ConfigError::Parse { section, .. } => assert_eq!(section.as_deref(), Some("meta")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("in `meta`"));
    }

    #[test]
    fn test_bad_entry_type_names_files() {
        let err = TargetList::parse("files = [\n  \"a.js\",\n  3,\n]\n").unwrap_err();

        match &err {
            ConfigError::Parse { section, origin, .. } => {
                assert_eq!(section.as_deref(), Some("files"));
                assert_eq!(origin, &Origin::Inline);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_list_rejected() {
        let err = TargetList::parse("files = []").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { base: None, .. }));
        assert!(err.to_string().contains("lists no files"));
    }

    #[test]
    fn test_load_config_relative_base() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("targets.toml");
        fs::write(
            &config_path,
            "files = [\"a.js\"]\n\n[meta]\nconfig_relative = true\n",
        )
        .unwrap();

        let targets = TargetList::load(&config_path).unwrap();

        assert_eq!(targets.base(), Some(temp_dir.path()));
        assert_eq!(targets.paths(None), vec![temp_dir.path().join("a.js")]);
        // Explicit root still wins
        assert_eq!(
            targets.paths(Some(Path::new("elsewhere"))),
            vec![PathBuf::from("elsewhere/a.js")]
        );
    }

    #[test]
    fn test_load_rejection_reports_base() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("targets.toml");
        fs::write(
            &config_path,
            "files = [\"a.js\", \"./a.js\"]\n\n[meta]\nconfig_relative = true\n",
        )
        .unwrap();

        let err = TargetList::load(&config_path).unwrap_err();

        match &err {
            ConfigError::Invalid { origin, base, .. } => {
                assert_eq!(origin, &Origin::File(config_path.clone()));
                assert_eq!(base.as_deref(), Some(temp_dir.path()));
            }
            other => panic!("unexpected error: {other}"),
        }
        let message = err.to_string();
        assert!(message.contains(&format!(
            "(entries relative to {})",
            temp_dir.path().display()
        )));
        assert!(message.contains("names the same target as 'a.js'"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = TargetList::load(temp_dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_section_at() {
        let input = "files = [\n  \"a\",\n]\n[meta]\nname = 1\n";
        assert_eq!(section_at(input, 0).as_deref(), Some("files"));
        assert_eq!(section_at(input, 12).as_deref(), Some("files"));
        assert_eq!(section_at(input, input.len() - 2).as_deref(), Some("meta"));
    }
}
