//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod filter;
pub mod load;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use filter::{execute_filter, resolve_request, validate_filter_args, FilterRequest};
pub use load::{execute_load, load_store};
pub use models::{FilterArgs, LoadArgs, SourceArgs};
pub use utils::{display_schema, display_version, list_countries, validate_export_file};
