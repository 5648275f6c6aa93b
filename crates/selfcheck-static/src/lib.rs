//! Static site builder for pages embedding self-assessments.
//!
//! Renders markdown pages, expands `assessment` shortcodes into quiz widgets,
//! and emits the widget stylesheet and fingerprinted client entry.

pub mod assets;
pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
