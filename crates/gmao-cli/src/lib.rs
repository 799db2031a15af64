//! CLI library components for the GMAO tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;
pub mod summary;
