//! Scaffold a content directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing selfcheck...");
    scaffold(Path::new("."), config_path, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'selfcheck build' to build the site.");

    Ok(())
}

fn scaffold(root: &Path, config_path: &Path, yes: bool) -> Result<()> {
    let content_dir = root.join("content");

    if content_dir.exists() && !yes {
        tracing::warn!("content/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    let files = [
        (root.join(config_path), DEFAULT_CONFIG),
        (content_dir.join("index.md"), DEFAULT_INDEX),
        (content_dir.join("learn/closures/index.md"), DEFAULT_LESSON),
        (
            content_dir.join("learn/closures/self-check.assess.yaml"),
            DEFAULT_ASSESSMENT,
        ),
        (root.join("src/lib/app.mjs"), DEFAULT_ENTRY),
    ];

    for (path, text) in files {
        if path.exists() && !yes {
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# selfcheck configuration

[site]
# Pages and their *.assess.yaml files
content = "content"

# Output directory for built site
output = "dist"

# Site title
title = "My Documentation"

# Base URL (for deployment)
base_url = "/"

[bundle]
# Prebuilt client entry that hydrates <web-assessment> widgets
entry = "src/lib/app.mjs"

[build]
# Enable CSS minification
minify = true
"#;

const DEFAULT_INDEX: &str = r#"---
title: Welcome
order: 1
---

# Welcome

Start with the [closures lesson](/learn/closures/).
"#;

const DEFAULT_LESSON: &str = r#"---
title: Closures
order: 2
---

# Closures

A closure can capture variables from the scope it is defined in.

{{ assessment(page, "self-check") }}
"#;

const DEFAULT_ASSESSMENT: &str = r#"assessment:
  setLeader: Test your knowledge
  tabLabel: question
  questions:
    - type: multiple-choice
      cardinality: "1"
      correctAnswers: "0"
      stem: What does the `move` keyword do on a closure?
      options:
        - content: Moves captured variables into the closure
          rationale: Captures take ownership instead of borrowing.
        - content: Copies the closure body
          rationale: Closure bodies are never copied by `move`.
    - stimulus: |
        ```rust
        let name = String::from("ferris");
        let greet = || println!("hi {name}");
        ```
      components:
        - type: think-and-check
          stem: How is `name` captured here?
          options:
            - rationale: By shared reference, since the closure only reads it.
"#;

const DEFAULT_ENTRY: &str = r#"// Client entry that upgrades <web-assessment> markup into interactive widgets.
// Replace with your bundled widget runtime.
export {};
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use selfcheck_content::{Assessment, ContentFormat};
    use tempfile::tempdir;

    #[test]
    fn scaffolds_project() {
        let temp = tempdir().unwrap();

        scaffold(temp.path(), Path::new("selfcheck.toml"), false).unwrap();

        assert!(temp.path().join("selfcheck.toml").exists());
        assert!(temp.path().join("content/index.md").exists());
        assert!(temp.path().join("src/lib/app.mjs").exists());
    }

    #[test]
    fn sample_assessment_is_valid() {
        let source = ContentFormat::Yaml.parse(DEFAULT_ASSESSMENT).unwrap();
        let assessment = Assessment::try_from(source).unwrap();

        assert_eq!(assessment.questions.len(), 2);
    }

    #[test]
    fn keeps_existing_content_without_yes() {
        let temp = tempdir().unwrap();
        let index = temp.path().join("content/index.md");
        fs::create_dir_all(index.parent().unwrap()).unwrap();
        fs::write(&index, "mine").unwrap();

        scaffold(temp.path(), Path::new("selfcheck.toml"), false).unwrap();

        assert_eq!(fs::read_to_string(&index).unwrap(), "mine");
        assert!(!temp.path().join("selfcheck.toml").exists());
    }
}
