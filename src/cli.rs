//! CLI domain: parse, route, and output only.
//! The workflow itself lives in the library; this layer wires config, store and terminal.

mod output;
mod parse;
mod route;

pub use output::{exit_code, map_error};
pub use parse::Cli;
pub use route::RunContext;
