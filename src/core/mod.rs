//! Core module - loading, the template collection, ranking and configuration

pub mod collection;
pub mod config;
pub mod error;
pub mod loader;
pub mod ranking;

pub use collection::ResumeTemplateCollection;
pub use config::Config;
pub use error::{DuplicateTitle, DuplicateTitleError, LoadError};
pub use loader::{load, load_path, load_reader, load_samples, load_str, load_value, LoadSource};
pub use ranking::{Ranker, Ranking, Scores};
