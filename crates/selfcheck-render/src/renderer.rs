//! Assessment widget renderer.
//!
//! Composes header → content → question → response → option markup for a
//! validated [`Assessment`]. The produced elements are hydrated by the
//! client-side widget runtime:
//!
//! ```text
//! <web-assessment class="w-callout[ web-assessment--singleton]" aria-label="...">
//!   [set leader]
//!   <web-tabs> tab panels </web-tabs> | <div class="web-assessment__content"> questions </div>
//! </web-assessment>
//! ```

use selfcheck_content::{
    AnswerOption, Assessment, ContentDir, ContentLookup, LookupError, Page, Question, Response,
    ValidationError,
};

use crate::markdown::{Markdown, PulldownMarkdown};
use crate::markup::{Attribute, Element};

/// Accessible name of every assessment widget.
pub const ARIA_LABEL: &str = "Check your understanding";

/// Class added to the root element when there is exactly one question.
pub const SINGLETON_CLASS: &str = "web-assessment--singleton";

/// Errors that can occur when rendering an assessment.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Can't create Assessment component without the page argument.")]
    MissingPage,

    #[error("Can't create Assessment component without a target assessment. Pass the file name, without \".assess.yaml\", of the desired assessment as a string.")]
    MissingAssessmentName,

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Invalid assessment {path}: {source}")]
    Validation {
        path: String,
        source: ValidationError,
    },
}

/// Renders assessments embedded in pages.
pub struct AssessmentRenderer {
    lookup: Box<dyn ContentLookup>,
    markdown: Box<dyn Markdown>,
}

impl AssessmentRenderer {
    /// Create a renderer reading assessments through `lookup`.
    pub fn new(lookup: impl ContentLookup + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
            markdown: Box::new(PulldownMarkdown::new()),
        }
    }

    /// Create a renderer reading assessments from a content directory.
    pub fn from_content_dir(root: impl Into<std::path::PathBuf>) -> Self {
        Self::new(ContentDir::new(root))
    }

    /// Replace the markdown renderer.
    pub fn with_markdown(mut self, markdown: impl Markdown + 'static) -> Self {
        self.markdown = Box::new(markdown);
        self
    }

    /// Load and validate the assessment `name` belonging to `page`.
    pub fn load(&self, page: &Page, name: &str) -> Result<Assessment, RenderError> {
        if page.file_path_stem.is_empty() {
            return Err(RenderError::MissingPage);
        }
        if name.trim().is_empty() {
            return Err(RenderError::MissingAssessmentName);
        }

        let dir = page.content_dir();
        let source = self.lookup.load(dir, name)?;

        Assessment::try_from(source).map_err(|source| RenderError::Validation {
            path: format!("{}{}.assess.yaml", dir, name),
            source,
        })
    }

    /// Render the assessment `name` belonging to `page`.
    ///
    /// Validation completes before any markup is built, so an invalid
    /// assessment never yields partial output.
    pub fn render(&self, page: &Page, name: &str) -> Result<Element, RenderError> {
        let assessment = self.load(page, name)?;

        tracing::debug!(
            "Rendering assessment {} ({} questions) for {}",
            name,
            assessment.questions.len(),
            page.url
        );

        Ok(self.render_assessment(&assessment))
    }

    /// Render an already validated assessment.
    pub fn render_assessment(&self, assessment: &Assessment) -> Element {
        let mut class = String::from("w-callout");
        if assessment.is_singleton() {
            class.push(' ');
            class.push_str(SINGLETON_CLASS);
        }

        let mut root = Element::new("web-assessment");
        if let Some(height) = &assessment.height {
            root = root.attr("style", format!("height: {};", height));
        }

        root.attr("class", class)
            .attr("aria-label", ARIA_LABEL)
            .children(self.header(assessment))
            .child(self.content(assessment))
    }

    fn header(&self, assessment: &Assessment) -> Option<Element> {
        let leader = assessment.visible_set_leader()?;

        Some(
            Element::new("div")
                .attr("class", "w-callout__blurb web-assessment__set-leader")
                .html(self.markdown.render_inline(leader)),
        )
    }

    fn content(&self, assessment: &Assessment) -> Element {
        if assessment.is_singleton() {
            return Element::new("div")
                .attr("class", "web-assessment__content")
                .children(assessment.questions.iter().map(|q| self.question(q)));
        }

        // Every panel carries the same label.
        let label = assessment.tab_label.as_deref().unwrap_or_default();

        Element::new("web-tabs")
            .attr("class", "web-assessment__content")
            .attr("label", format!("{}s for knowledge self check", label))
            .children(assessment.questions.iter().map(|q| self.tab_panel(q, label)))
    }

    fn tab_panel(&self, question: &Question, label: &str) -> Element {
        Element::new("div")
            .attr("class", "web-tabs__panel")
            .attr("role", "tabpanel")
            .attr("data-label", label)
            .flag("hidden")
            .child(self.question(question))
    }

    fn question(&self, question: &Question) -> Element {
        let stimulus = question.stimulus.as_deref().map(|s| {
            Element::new("div")
                .attr("data-role", "stimulus")
                .html(self.markdown.render_block(s))
        });

        Element::new("web-question")
            .children(stimulus)
            .children(question.body.responses().iter().map(|r| self.response(r)))
    }

    fn response(&self, response: &Response) -> Element {
        let stem = Element::new("p").html(self.markdown.render_inline(&response.stem));

        Element::new(response.kind.tag_name())
            .attrs(response_attributes(response))
            .attr("class", "web-response")
            .child(stem)
            .children(response.options.iter().filter_map(|o| self.option_content(o)))
            .children(response.options.iter().filter_map(|o| self.rationale(o)))
    }

    fn option_content(&self, option: &AnswerOption) -> Option<Element> {
        let content = option.content.as_deref()?;

        Some(
            Element::new("span")
                .attr("data-role", "option")
                .html(self.markdown.render_inline(content)),
        )
    }

    fn rationale(&self, option: &AnswerOption) -> Option<Element> {
        let rationale = option.rationale.as_deref()?;

        Some(
            Element::new("div")
                .attr("data-role", "rationale")
                .html(self.markdown.render_block(rationale)),
        )
    }
}

/// Attributes for a response element, present only for the fields that are
/// set.
pub fn response_attributes(response: &Response) -> Vec<Attribute> {
    let mut attrs = Vec::new();

    if let Some(cardinality) = &response.cardinality {
        attrs.push(Attribute::new("cardinality", cardinality.as_str()));
    }
    if let Some(answers) = &response.correct_answers {
        attrs.push(Attribute::new("correct-answer", answers.as_str()));
    }
    if response.columns {
        attrs.push(Attribute::flag("columns"));
    }

    attrs
}
