//! Self-assessment content model.
//!
//! This crate loads `*.assess.yaml` content description files, validates the
//! author-supplied question metadata, and exposes typed assessment values for
//! rendering. It also parses page frontmatter for the site builder.

pub mod assessment;
pub mod fields;
pub mod frontmatter;
pub mod lookup;
pub mod page;
pub mod source;

pub use assessment::{
    AnswerOption, Assessment, Question, QuestionBody, Response, ResponseError, ValidationError,
};
pub use fields::{Cardinality, CorrectAnswers, ResponseType, Selection};
pub use frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
pub use lookup::{
    find_content_files, ContentDir, ContentFormat, ContentLookup, LookupError, MemoryContent,
};
pub use page::{content_dir, Page};
pub use source::{AssessmentSource, ContentFile, OptionSource, QuestionSource, ResponseSource};
