//! Configuration sources, added to the builder in precedence order.

pub mod environment;
pub mod global_file;
pub mod local_file;
