//! CLI command handlers. Each command is in its own file for clarity.

mod check;
mod content;
mod url;

pub use check::run_check;
pub use content::{run_html, run_json, run_metadata};
pub use url::run_url;
