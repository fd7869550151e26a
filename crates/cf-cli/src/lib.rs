//! Carbon footprint tracker CLI library.
//!
//! This crate provides the command-line interface and the HTTP API.

pub mod api;
mod cli;
pub mod commands;
mod config;
pub mod tracker;

pub use cli::{Cli, Commands};
pub use config::Config;
