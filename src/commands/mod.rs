//! Command handlers module.
//!
//! - `import.rs`: detect, normalize, and import commands
//! - `list.rs`: paginated listing of stored documents
//! - `config.rs`: configuration display command

mod config;
mod import;
mod list;

pub use config::cmd_config;
pub use import::{cmd_detect, cmd_import, cmd_normalize};
pub use list::{ListArgs, cmd_list};
