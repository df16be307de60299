//! RTK: Resume Template Kit
//!
//! Loads, validates and queries collections of example resume templates
//! stored as a single JSON document.

pub mod cli;
pub mod core;
pub mod entities;
pub mod json;
pub mod schema;
