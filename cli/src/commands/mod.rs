//! Command implementations for the userdir CLI.
//!
//! Each subcommand is implemented in its own module.

pub mod add;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;

pub use add::run_add;
pub use completions::generate_completions;
pub use delete::run_delete;
pub use edit::run_edit;
pub use list::{ListArgs, run_list};
pub use show::run_show;
