//! CLI domain: parse, route, help, output, and presentation only.
//! No interception logic lives here; the route table calls into the library.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_check_text, format_run_json, format_run_text, format_tree_json, format_tree_text,
    RunSummary, TargetSummary,
};
pub use route::RunContext;
