//! View and follow coding-agent session logs as rendered markdown.

pub mod app;
pub mod config;
pub mod log;
pub mod paths;
pub mod render;
pub mod source;
