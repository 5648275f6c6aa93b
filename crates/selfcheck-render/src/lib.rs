//! Self-assessment widget rendering.
//!
//! Turns validated assessments into the `<web-assessment>` custom element
//! markup consumed by the client-side widget runtime, and exposes the
//! renderer to page templates as a shortcode.

pub mod markdown;
pub mod markup;
pub mod renderer;
pub mod shortcode;

pub use markdown::{Markdown, PulldownMarkdown};
pub use markup::{Attribute, Element, Node};
pub use renderer::{
    response_attributes, AssessmentRenderer, RenderError, ARIA_LABEL, SINGLETON_CLASS,
};
pub use shortcode::{register_shortcode, Slots, SHORTCODE};
