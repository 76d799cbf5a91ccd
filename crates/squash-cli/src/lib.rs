//! Squash CLI library.
//!
//! This crate provides the command-line interface: flag and configuration
//! handling, input reading, and report rendering.

mod cli;
mod config;
pub mod input;
pub mod render;
pub mod report;
pub mod util;

pub use cli::Cli;
pub use config::Config;
pub use report::{OutputMode, Settings};
