//! Library components of the `jsonmap` command-line tool.

pub mod config;
pub mod inputs;
pub mod logging;
pub mod report;
