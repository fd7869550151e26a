//! CLI subcommand implementations.

pub mod add;
pub mod delete;
pub mod factors;
pub mod list;
pub mod serve;
pub mod summary;
