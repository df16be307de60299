//! CLI command implementations

pub mod utils;

pub mod completions;
pub mod config;
pub mod count;
pub mod list;
pub mod new;
pub mod schema;
pub mod score;
pub mod show;
pub mod stats;
pub mod validate;
