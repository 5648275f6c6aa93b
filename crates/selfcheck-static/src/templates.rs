//! Layout templates for rendered pages.

use minijinja::{context, Environment};

/// Context for rendering a page layout.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Meta description
    pub description: Option<String>,
    /// Site title
    pub site_title: String,
    /// Rendered page body, widgets included
    pub content: String,
    /// Base URL
    pub base_url: String,
    /// Stylesheet URLs
    pub styles: Vec<String>,
    /// Fingerprinted client entry file name, relative to the base URL
    pub script: Option<String>,
}

/// Layout engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create an engine with the built-in layouts.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template("base.html", BASE_TEMPLATE)
            .expect("Failed to add base template");
        env.add_template("page.html", PAGE_TEMPLATE)
            .expect("Failed to add page template");

        Self { env }
    }

    /// Render a page using the named layout.
    pub fn render_page(&self, template: &str, context: &Context) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            description => &context.description,
            site_title => &context.site_title,
            content => &context.content,
            base_url => &context.base_url,
            styles => &context.styles,
            script => &context.script,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  {% if description %}<meta name="description" content="{{ description }}">
  {% endif %}<link rel="stylesheet" href="{{ base_url|safe }}assets/selfcheck.css">
  {% for style in styles %}<link rel="stylesheet" href="{{ style|safe }}">
  {% endfor %}
</head>
<body>
  <header class="site-header">
    <a href="{{ base_url|safe }}" class="site-title">{{ site_title }}</a>
  </header>
  <main class="main">
    {% block content %}{% endblock %}
  </main>
  {% if script %}<script type="module" src="{{ base_url|safe }}{{ script|safe }}"></script>{% endif %}
</body>
</html>"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="page">
  {{ content | safe }}
</article>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context {
            title: "Closures".to_string(),
            description: None,
            site_title: "Learn Rust".to_string(),
            content: "<p>Hello world</p>".to_string(),
            base_url: "/".to_string(),
            styles: vec![],
            script: None,
        }
    }

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::new();

        let html = engine.render_page("page.html", &context()).unwrap();

        assert!(html.contains("<title>Closures - Learn Rust</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains(r#"href="/assets/selfcheck.css""#));
        assert!(!html.contains("<script"));
        assert!(!html.contains("meta name=\"description\""));
    }

    #[test]
    fn includes_client_script_and_styles() {
        let engine = TemplateEngine::new();
        let ctx = Context {
            description: Some("About closures".to_string()),
            styles: vec!["/assets/theme.css".to_string()],
            script: Some("app.1a2b3c4d.js".to_string()),
            ..context()
        };

        let html = engine.render_page("page.html", &ctx).unwrap();

        assert!(html.contains(r#"<script type="module" src="/app.1a2b3c4d.js"></script>"#));
        assert!(html.contains(r#"<link rel="stylesheet" href="/assets/theme.css">"#));
        assert!(html.contains(r#"<meta name="description" content="About closures">"#));
    }

    #[test]
    fn leaves_widget_markup_unescaped() {
        let engine = TemplateEngine::new();
        let ctx = Context {
            content: r#"<web-assessment class="w-callout"></web-assessment>"#.to_string(),
            ..context()
        };

        let html = engine.render_page("page.html", &ctx).unwrap();

        assert!(html.contains(r#"<web-assessment class="w-callout"></web-assessment>"#));
    }
}
