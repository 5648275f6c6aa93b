//! Pages that embed assessments.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// A content page, as seen by templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Path relative to the content root, leading `/`, no extension
    /// (`/blog/intro/index`).
    pub file_path_stem: String,

    /// Public URL of the rendered page
    pub url: String,

    /// Source file the page was read from
    pub input_path: PathBuf,
}

impl Page {
    /// Create a page from its path stem, deriving the URL.
    pub fn new(file_path_stem: impl Into<String>) -> Self {
        let file_path_stem = file_path_stem.into();
        let url = url_for_stem(&file_path_stem);

        Self {
            file_path_stem,
            url,
            input_path: PathBuf::new(),
        }
    }

    /// Create a page for a source file under `root`.
    pub fn from_source(root: &Path, path: &Path) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");

        let stem = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        Self {
            input_path: path.to_path_buf(),
            ..Self::new(format!("/{}", stem))
        }
    }

    /// Directory in which this page's assessments live.
    pub fn content_dir(&self) -> &str {
        content_dir(&self.file_path_stem)
    }
}

/// Strip a trailing `index` segment from a page path stem.
///
/// `/blog/intro/index` becomes `/blog/intro/`; `/blog/intro` is returned
/// unchanged and `/blog/reindex` keeps its name.
pub fn content_dir(file_path_stem: &str) -> &str {
    match file_path_stem.strip_suffix("index") {
        Some(dir) if dir.is_empty() || dir.ends_with('/') => dir,
        _ => file_path_stem,
    }
}

fn url_for_stem(stem: &str) -> String {
    let dir = content_dir(stem);
    let url = if dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{}/", dir)
    };

    if url.starts_with('/') {
        url
    } else {
        format!("/{}", url)
    }
}
