//! Static site builder.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use minijinja::{context, Environment};
use rayon::prelude::*;
use walkdir::WalkDir;

use selfcheck_content::{extract_frontmatter, ContentFormat, Frontmatter, Page};
use selfcheck_render::{register_shortcode, AssessmentRenderer, Markdown, PulldownMarkdown, Slots};

use crate::assets::AssetPipeline;
use crate::templates::{Context, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source directory holding pages and their assessments
    pub content_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Prebuilt client entry script to fingerprint into the output
    pub bundle_entry: Option<PathBuf>,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Paths to extra CSS stylesheets to include
    pub styles: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("dist"),
            bundle_entry: Some(PathBuf::from("src/lib/app.mjs")),
            minify: true,
            base_url: "/".to_string(),
            title: "Documentation".to_string(),
            styles: vec![],
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of assessment widgets rendered
    pub assessments: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,

    /// Fingerprinted client entry file name, if one was emitted
    pub script: Option<String>,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read content: {0}")]
    ReadError(String),

    #[error("Failed to parse page: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to render page: {path}: {message}")]
    RenderError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Page as exposed to templates
    page: Page,

    /// Parsed frontmatter
    frontmatter: Option<Frontmatter>,

    /// Markdown body without frontmatter
    body: String,

    /// Output path
    output_path: PathBuf,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    renderer: Arc<AssessmentRenderer>,
    markdown: PulldownMarkdown,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a builder that reads assessments from the content directory.
    pub fn new(config: BuildConfig) -> Self {
        let renderer = AssessmentRenderer::from_content_dir(&config.content_dir);
        Self::with_renderer(config, renderer)
    }

    /// Create a builder with a custom assessment renderer.
    pub fn with_renderer(config: BuildConfig, renderer: AssessmentRenderer) -> Self {
        Self {
            config,
            renderer: Arc::new(renderer),
            markdown: PulldownMarkdown::new(),
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    ///
    /// Any page that fails to render fails the whole build.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let script = self.emit_script()?;
        let pages = self.discover_pages()?;

        tracing::info!("Found {} pages in {}", pages.len(), self.config.content_dir.display());

        let results: Vec<Result<usize, BuildError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, script.as_deref()))
            .collect();

        let mut total_assessments = 0;
        for result in results {
            total_assessments += result?;
        }

        self.generate_assets()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len(),
            assessments: total_assessments,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
            script,
        })
    }

    /// Discover all markdown pages in the content directory.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        let root = &self.config.content_dir;

        if !root.exists() {
            return Err(BuildError::ReadError(format!(
                "Content directory not found: {}",
                root.display()
            )));
        }

        let mut pages = Vec::new();
        let mut outputs: HashMap<PathBuf, PathBuf> = HashMap::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() || ContentFormat::from_path(path).is_some() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "md" && ext != "markdown" {
                continue;
            }

            let source = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

            let (frontmatter, body) =
                extract_frontmatter(&source).map_err(|e| BuildError::ParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;

            let mut page = Page::from_source(root, path);
            if let Some(slug) = frontmatter.as_ref().and_then(|f| f.slug.as_deref()) {
                page.url = format!("/{}/", slug.trim_matches('/'));
            }

            let output_path = self.output_path(&page);

            if let Some(previous) = outputs.insert(output_path.clone(), path.to_path_buf()) {
                return Err(BuildError::ParseError {
                    path: path.display().to_string(),
                    message: format!(
                        "{} is also written by {}",
                        output_path.display(),
                        previous.display()
                    ),
                });
            }

            pages.push(PageInfo {
                page,
                body: body.to_string(),
                frontmatter,
                output_path,
            });
        }

        pages.sort_by(|a, b| {
            let order = |p: &PageInfo| p.frontmatter.as_ref().and_then(|f| f.order).unwrap_or(999);
            order(a)
                .cmp(&order(b))
                .then_with(|| a.page.file_path_stem.cmp(&b.page.file_path_stem))
        });

        Ok(pages)
    }

    /// Output file for a page: `<output>/<url>/index.html`.
    fn output_path(&self, page: &Page) -> PathBuf {
        let url = page.url.trim_matches('/');

        if url.is_empty() {
            self.config.output_dir.join("index.html")
        } else {
            self.config.output_dir.join(url).join("index.html")
        }
    }

    /// Build a single page, returning the number of assessments it embeds.
    fn build_page(&self, info: &PageInfo, script: Option<&str>) -> Result<usize, BuildError> {
        let source_path = info.page.input_path.display().to_string();

        // Fresh environment per page so placeholder slots are never shared.
        let slots = Slots::new();
        let mut env = Environment::new();
        register_shortcode(&mut env, Arc::clone(&self.renderer), slots.clone());

        let expanded = env
            .render_str(
                &info.body,
                context! {
                    page => &info.page,
                    site_title => &self.config.title,
                    base_url => &self.config.base_url,
                },
            )
            .map_err(|e| BuildError::RenderError {
                path: source_path.clone(),
                message: e.to_string(),
            })?;

        let content = slots.substitute(&self.markdown.render_block(&expanded));

        let context = Context {
            title: info
                .frontmatter
                .as_ref()
                .map(|f| f.title.clone())
                .unwrap_or_else(|| "Untitled".to_string()),
            description: info.frontmatter.as_ref().and_then(|f| f.description.clone()),
            site_title: self.config.title.clone(),
            content,
            base_url: self.config.base_url.clone(),
            styles: self
                .config
                .styles
                .iter()
                .map(|s| {
                    let filename = Path::new(s)
                        .file_name()
                        .and_then(|f| f.to_str())
                        .unwrap_or("style.css");
                    format!("{}assets/{}", self.config.base_url, filename)
                })
                .collect(),
            script: script.map(str::to_string),
        };

        let html = self
            .templates
            .render_page("page.html", &context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        if let Some(parent) = info.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&info.output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!(
            "Built {} ({} assessments) -> {}",
            source_path,
            slots.len(),
            info.output_path.display()
        );

        Ok(slots.len())
    }

    /// Fingerprint the client entry into the output directory.
    fn emit_script(&self) -> Result<Option<String>, BuildError> {
        let Some(entry) = &self.config.bundle_entry else {
            return Ok(None);
        };

        if !entry.exists() {
            tracing::warn!("Client entry not found: {}", entry.display());
            return Ok(None);
        }

        let name = AssetPipeline::emit_entry(entry, &self.config.output_dir)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", entry.display(), e)))?;

        tracing::info!("Emitted {} from {}", name, entry.display());
        Ok(Some(name))
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };
        fs::write(assets_dir.join("selfcheck.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if source_path.exists() {
                let filename = source_path
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or("style.css");
                let content = fs::read_to_string(&source_path).map_err(|e| {
                    BuildError::ReadError(format!("Failed to read stylesheet: {}", e))
                })?;
                fs::write(assets_dir.join(filename), content)
                    .map_err(|e| BuildError::WriteError(e.to_string()))?;
                tracing::info!("Copied stylesheet from {}", style_path);
            } else {
                tracing::warn!("Stylesheet not found: {}", style_path);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const QUIZ: &str = r#"assessment:
  setLeader: Test your knowledge
  tabLabel: question
  questions:
    - type: multiple-choice
      correctAnswers: "0"
      stem: "What does `move` do?"
      options:
        - content: Takes ownership
          rationale: Right.
        - content: Copies the closure
    - type: think-and-check
      stem: Why might that matter?
      options: []
"#;

    fn site(pages: &[(&str, &str)], files: &[(&str, &str)]) -> (tempfile::TempDir, BuildConfig) {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");

        for (path, text) in pages.iter().chain(files) {
            let full = content.join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, text).unwrap();
        }

        let config = BuildConfig {
            content_dir: content,
            output_dir: temp.path().join("dist"),
            bundle_entry: None,
            ..Default::default()
        };

        (temp, config)
    }

    #[tokio::test]
    async fn builds_simple_site() {
        let (_temp, config) = site(&[("index.md", "---\ntitle: Home\n---\n# Welcome\n")], &[]);
        let out = config.output_dir.clone();

        let result = StaticBuilder::new(config).build().await.unwrap();

        assert_eq!(result.pages, 1);
        assert_eq!(result.assessments, 0);
        assert!(out.join("index.html").exists());
        assert!(out.join("assets/selfcheck.css").exists());

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("<title>Home - Documentation</title>"));
    }

    #[tokio::test]
    async fn expands_assessment_shortcode() {
        let (_temp, config) = site(
            &[(
                "learn/closures/index.md",
                "---\ntitle: Closures\n---\n# Closures\n\n{{ assessment(page, \"self-check\") }}\n\nAfter.\n",
            )],
            &[("learn/closures/self-check.assess.yaml", QUIZ)],
        );
        let out = config.output_dir.clone();

        let result = StaticBuilder::new(config).build().await.unwrap();

        assert_eq!(result.assessments, 1);

        let html = fs::read_to_string(out.join("learn/closures/index.html")).unwrap();
        assert!(html.contains(r#"<web-assessment class="w-callout" aria-label="Check your understanding">"#));
        assert!(html.contains("<p>What does <code>move</code> do?</p>"));
        assert!(html.contains(r#"<web-response-mc correct-answer="0" class="web-response">"#));
        assert!(html.contains("Test your knowledge"));
        assert!(html.contains("<p>After.</p>"));
        assert!(!html.contains("selfcheck:assessment"));
    }

    #[tokio::test]
    async fn invalid_assessment_fails_build() {
        let (_temp, config) = site(
            &[("index.md", "---\ntitle: Home\n---\n{{ assessment(page, \"quiz\") }}\n")],
            &[(
                "quiz.assess.yaml",
                "assessment:\n  questions:\n    - type: multiple-choice\n      cardinality: \"+3\"\n      stem: S\n      options: []\n",
            )],
        );

        let err = StaticBuilder::new(config).build().await.unwrap_err();

        match err {
            BuildError::RenderError { path, message } => {
                assert!(path.ends_with("index.md"));
                assert!(message.contains("cardinality"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_assessment_fails_build() {
        let (_temp, config) = site(
            &[("index.md", "---\ntitle: Home\n---\n{{ assessment(page, \"absent\") }}\n")],
            &[],
        );

        let result = StaticBuilder::new(config).build().await;

        assert!(matches!(result, Err(BuildError::RenderError { .. })));
    }

    #[tokio::test]
    async fn emits_fingerprinted_client_entry() {
        let (temp, mut config) = site(&[("index.md", "---\ntitle: Home\n---\nHi\n")], &[]);
        let entry = temp.path().join("app.mjs");
        fs::write(&entry, "import './widgets.js';").unwrap();
        config.bundle_entry = Some(entry);
        let out = config.output_dir.clone();

        let result = StaticBuilder::new(config).build().await.unwrap();

        let script = result.script.unwrap();
        assert!(script.starts_with("app.") && script.ends_with(".js"));
        assert!(out.join(&script).exists());

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains(&format!(r#"src="/{}""#, script)));
    }

    #[tokio::test]
    async fn colliding_output_paths_fail_build() {
        let (_temp, config) = site(
            &[
                ("guide.md", "---\ntitle: First\n---\nFirst page\n"),
                ("guide/index.md", "---\ntitle: Second\n---\nSecond page\n"),
            ],
            &[],
        );

        let err = StaticBuilder::new(config).build().await.unwrap_err();

        match err {
            BuildError::ParseError { path, message } => {
                let sources = format!("{path} {message}");
                assert!(sources.contains("guide.md"));
                assert!(sources.contains("index.md"));
                assert!(message.contains("index.html"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn colliding_slugs_fail_build() {
        let (_temp, config) = site(
            &[
                ("a.md", "---\ntitle: A\nslug: same\n---\nA\n"),
                ("b.md", "---\ntitle: B\nslug: same\n---\nB\n"),
            ],
            &[],
        );

        let result = StaticBuilder::new(config).build().await;

        assert!(matches!(result, Err(BuildError::ParseError { .. })));
    }

    #[tokio::test]
    async fn honours_slugs_and_skips_content_files() {
        let (_temp, config) = site(
            &[
                ("guide.md", "---\ntitle: Guide\nslug: start-here\n---\nGo\n"),
                ("notes/tips.md", "---\ntitle: Tips\n---\nTip\n"),
            ],
            &[("notes/quiz.assess.yaml", QUIZ)],
        );
        let out = config.output_dir.clone();

        let result = StaticBuilder::new(config).build().await.unwrap();

        assert_eq!(result.pages, 2);
        assert!(out.join("start-here/index.html").exists());
        assert!(out.join("notes/tips/index.html").exists());
        assert!(!out.join("notes/quiz.assess/index.html").exists());
    }
}
