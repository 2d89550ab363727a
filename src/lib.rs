//! Fix Entities: un-escape HTML entities left behind in source files
//!
//! Source files that passed through an HTML-escaping editor end up with
//! `&gt;`, `&lt;` and `&amp;` where code had `>`, `<` and `&`, sometimes
//! escaped twice over (`&amp;gt;`). This crate rewrites a fixed list of such
//! files in place.
//!
//! # Behavior
//!
//! - Six literal rules, double-encoded forms first (see [`DEFAULT_RULES`])
//! - Files processed one at a time, in declaration order
//! - A failure on one file is reported and the batch carries on
//! - UTF-8 in, UTF-8 out
//!
//! # Example
//!
//! ```no_run
//! use fix_entities::{Patcher, TargetList};
//!
//! let paths = TargetList::builtin().paths(None);
//! let report = Patcher::new()
//!     .patch_all(&paths, &mut std::io::stdout())
//!     .expect("stdout closed");
//!
//! for err in report.failed() {
//!     eprintln!("{} was not fixed", err.path().display());
//! }
//! ```

pub mod config;
pub mod logging;
pub mod patcher;
pub mod report;
pub mod rules;
pub mod write;

// Re-exports
pub use config::{ConfigError, FixConfig, TargetList, DEFAULT_FILES};
pub use patcher::{BatchReport, FileFix, FixError, Patcher};
pub use rules::{decode, Decoded, ReplacementRule, DEFAULT_RULES};
pub use write::{Persist, WriteMode};
