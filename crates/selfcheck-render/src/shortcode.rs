//! `assessment(page, name)` template function.
//!
//! Pages call the shortcode from their markdown source. Rendered widgets are
//! parked in [`Slots`] and the template receives an HTML comment placeholder
//! instead, so the widget markup never passes through the markdown renderer.
//! Once the page's markdown has been converted, [`Slots::substitute`] swaps
//! the placeholders for the widgets.

use std::sync::{Arc, Mutex};

use minijinja::{Environment, Error, ErrorKind, Value};
use selfcheck_content::Page;

use crate::renderer::{AssessmentRenderer, RenderError};

/// Name of the template function.
pub const SHORTCODE: &str = "assessment";

/// Rendered widgets awaiting substitution, in call order.
#[derive(Debug, Clone, Default)]
pub struct Slots {
    rendered: Arc<Mutex<Vec<String>>>,
}

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder text for the widget at `index`.
    pub fn placeholder(index: usize) -> String {
        format!("<!--selfcheck:assessment:{}-->", index)
    }

    /// Store a rendered widget and return its index.
    fn push(&self, html: String) -> usize {
        let mut rendered = self.rendered.lock().unwrap_or_else(|e| e.into_inner());
        rendered.push(html);
        rendered.len() - 1
    }

    pub fn len(&self) -> usize {
        self.rendered.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace every placeholder in `html` with its widget.
    pub fn substitute(&self, html: &str) -> String {
        let rendered = self.rendered.lock().unwrap_or_else(|e| e.into_inner());

        rendered
            .iter()
            .enumerate()
            .fold(html.to_string(), |out, (index, widget)| {
                out.replace(&Self::placeholder(index), widget)
            })
    }
}

/// Install the `assessment` function into `env`.
///
/// Template usage: `{{ assessment(page, "self-check") }}`, where `page` is a
/// serialised [`Page`]. Render failures abort the template render.
pub fn register_shortcode(
    env: &mut Environment<'_>,
    renderer: Arc<AssessmentRenderer>,
    slots: Slots,
) {
    env.add_function(
        SHORTCODE,
        move |page: Option<Value>, name: Option<String>| -> Result<Value, Error> {
            let page = page_from_value(page.as_ref())
                .ok_or_else(|| to_template_error(RenderError::MissingPage))?;
            let name = name
                .filter(|n| !n.is_empty())
                .ok_or_else(|| to_template_error(RenderError::MissingAssessmentName))?;

            let widget = renderer.render(&page, &name).map_err(to_template_error)?;
            let index = slots.push(widget.to_html());

            Ok(Value::from_safe_string(Slots::placeholder(index)))
        },
    );
}

fn page_from_value(value: Option<&Value>) -> Option<Page> {
    let value = value.filter(|v| !v.is_undefined() && !v.is_none())?;
    let stem = value.get_attr("file_path_stem").ok()?;

    stem.as_str().filter(|s| !s.is_empty()).map(Page::new)
}

fn to_template_error(err: RenderError) -> Error {
    Error::new(ErrorKind::InvalidOperation, err.to_string())
}
