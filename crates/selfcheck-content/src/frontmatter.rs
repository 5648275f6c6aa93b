//! Page frontmatter.

use serde::Deserialize;

/// YAML frontmatter at the top of a markdown page.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// Page title (required)
    pub title: String,

    /// Page description for meta tags
    #[serde(default)]
    pub description: Option<String>,

    /// Sort order among sibling pages (lower = first)
    #[serde(default)]
    pub order: Option<i32>,

    /// Custom output path override
    #[serde(default)]
    pub slug: Option<String>,
}

/// Split a page into its frontmatter and markdown body.
///
/// Pages without a leading `---` fence have no frontmatter and the whole
/// source is the body.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let Some(rest) = source.trim_start().strip_prefix("---") else {
        return Ok((None, source));
    };

    let (yaml, body) = rest
        .split_once("\n---")
        .ok_or(FrontmatterError::Unclosed)?;

    let frontmatter = serde_yaml::from_str::<Frontmatter>(yaml.trim())
        .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok((Some(frontmatter), body.trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_page_frontmatter() {
        let source = "---\ntitle: Closures\ndescription: Capturing the environment\norder: 3\n---\n\n# Closures\n";

        let (fm, body) = extract_frontmatter(source).unwrap();
        let fm = fm.unwrap();

        assert_eq!(fm.title, "Closures");
        assert_eq!(fm.description.as_deref(), Some("Capturing the environment"));
        assert_eq!(fm.order, Some(3));
        assert_eq!(fm.slug, None);
        assert!(body.starts_with("# Closures"));
    }

    #[test]
    fn body_without_frontmatter_is_untouched() {
        let source = "# Plain\n\nText.";

        let (fm, body) = extract_frontmatter(source).unwrap();

        assert!(fm.is_none());
        assert_eq!(body, source);
    }

    #[test]
    fn errors_on_unclosed_block() {
        assert!(matches!(
            extract_frontmatter("---\ntitle: Test\n# Body"),
            Err(FrontmatterError::Unclosed)
        ));
    }

    #[test]
    fn errors_on_missing_title() {
        assert!(matches!(
            extract_frontmatter("---\norder: 1\n---\n"),
            Err(FrontmatterError::InvalidYaml(_))
        ));
    }
}
