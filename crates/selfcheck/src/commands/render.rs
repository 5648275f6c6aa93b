//! Render a single assessment to stdout.

use std::path::Path;

use anyhow::Result;
use selfcheck_content::Page;
use selfcheck_render::AssessmentRenderer;

use crate::config::ConfigFile;

/// Run the render command.
pub fn run(config_path: &Path, page: &str, name: &str) -> Result<()> {
    let config = ConfigFile::load(config_path)?;
    let renderer = AssessmentRenderer::from_content_dir(config.content_dir());

    let page = Page::new(normalize_stem(page));
    let widget = renderer.render(&page, name)?;

    println!("{}", widget);

    Ok(())
}

/// Accept stems with or without the leading slash or a `.md` extension.
fn normalize_stem(page: &str) -> String {
    let stem = page.trim().trim_end_matches(".md");

    if stem.is_empty() || stem.starts_with('/') {
        stem.to_string()
    } else {
        format!("/{}", stem)
    }
}
