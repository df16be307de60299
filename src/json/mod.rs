//! JSON source handling

pub mod diagnostics;

pub use diagnostics::{locate_path, template_offsets, JsonSyntaxError};
