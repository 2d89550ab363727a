pub mod schema;
pub mod target_list;

pub use schema::{FixConfig, Metadata, ValidationError, ValidationIssue, DEFAULT_FILES};
pub use target_list::{ConfigError, Origin, TargetList};
