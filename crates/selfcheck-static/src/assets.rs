//! Stylesheet and client entry assets.

use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Length of the content hash embedded in fingerprinted file names.
pub const HASH_LEN: usize = 8;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the site stylesheet, widget styles included.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// File name for `entry` with a content hash: `app.mjs` → `app.<hash>.js`.
    pub fn hashed_name(entry: &Path, bytes: &[u8]) -> String {
        let stem = entry
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("app");
        let digest = format!("{:x}", Sha256::digest(bytes));

        format!("{}.{}.js", stem, &digest[..HASH_LEN])
    }

    /// Copy the client entry into `output_dir` under its fingerprinted name.
    ///
    /// Returns the written file name.
    pub fn emit_entry(entry: &Path, output_dir: &Path) -> io::Result<String> {
        let bytes = fs::read(entry)?;
        let name = Self::hashed_name(entry, &bytes);

        fs::write(output_dir.join(&name), bytes)?;
        Ok(name)
    }
}

const DEFAULT_CSS: &str = r#"/* selfcheck site theme */

:root {
  --content-max-width: 760px;
  --callout-border: #dadce0;
  --callout-background: #f8f9fa;
  --accent: #1a73e8;
  --correct: #188038;
  --incorrect: #d93025;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
  line-height: 1.6;
  color: #202124;
}

.site-header {
  padding: 1rem 1.5rem;
  border-bottom: 1px solid var(--callout-border);
}

.site-title {
  font-weight: 700;
  color: inherit;
  text-decoration: none;
}

.main {
  max-width: var(--content-max-width);
  margin: 0 auto;
  padding: 2rem 1.5rem;
}

/* Assessment widget */

.w-callout {
  display: block;
  margin: 2rem 0;
  padding: 1.5rem;
  border: 1px solid var(--callout-border);
  border-radius: 8px;
  background: var(--callout-background);
}

.w-callout__blurb {
  margin-bottom: 1rem;
  font-weight: 600;
}

web-assessment {
  overflow-y: auto;
}

.web-assessment--singleton .web-assessment__content {
  margin-top: 0;
}

.web-tabs__panel[hidden] {
  display: none;
}

web-question {
  display: block;
}

[data-role="stimulus"] {
  margin-bottom: 1rem;
}

.web-response {
  display: block;
  margin-top: 1rem;
}

.web-response[columns] {
  display: grid;
  grid-template-columns: repeat(2, 1fr);
  gap: 0.5rem 1rem;
}

[data-role="option"] {
  display: block;
  padding: 0.5rem 0.75rem;
  border: 1px solid var(--callout-border);
  border-radius: 4px;
  background: #fff;
  cursor: pointer;
}

[data-role="option"]:hover {
  border-color: var(--accent);
}

[data-role="rationale"] {
  display: none;
  margin-top: 0.5rem;
  font-size: 0.9em;
}

.web-response--submitted [data-role="rationale"] {
  display: block;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn minifies_generated_css() {
        let css = AssetPipeline::generate_css();
        let minified = AssetPipeline::minify_css(&css).unwrap();

        assert!(minified.len() < css.len());
        assert!(minified.contains(".web-tabs__panel[hidden]"));
    }

    #[test]
    fn hashed_name_tracks_content() {
        let entry = Path::new("src/lib/app.mjs");

        let first = AssetPipeline::hashed_name(entry, b"console.log(1)");
        let same = AssetPipeline::hashed_name(entry, b"console.log(1)");
        let changed = AssetPipeline::hashed_name(entry, b"console.log(2)");

        assert_eq!(first, same);
        assert_ne!(first, changed);
        assert!(first.starts_with("app."));
        assert!(first.ends_with(".js"));
        assert_eq!(first.len(), "app.".len() + HASH_LEN + ".js".len());
    }

    #[test]
    fn emits_fingerprinted_entry() {
        let temp = tempdir().unwrap();
        let entry = temp.path().join("app.mjs");
        let out = temp.path().join("dist");
        fs::create_dir_all(&out).unwrap();
        fs::write(&entry, "export {}").unwrap();

        let name = AssetPipeline::emit_entry(&entry, &out).unwrap();

        assert_eq!(fs::read_to_string(out.join(&name)).unwrap(), "export {}");
    }
}
