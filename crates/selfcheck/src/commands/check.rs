//! Validate every assessment in the content directory.

use std::path::Path;

use anyhow::{bail, Result};
use selfcheck_content::{find_content_files, Assessment, ContentDir};

use crate::config::ConfigFile;

/// Run the check command.
pub fn run(config_path: &Path) -> Result<()> {
    let config = ConfigFile::load(config_path)?;
    let root = config.content_dir();

    if !root.exists() {
        bail!("Content directory not found: {}", root.display());
    }

    let report = check_dir(&root);

    for (path, message) in &report.failures {
        tracing::error!("{}: {}", path, message);
    }

    tracing::info!(
        "Checked {} assessments, {} invalid",
        report.checked,
        report.failures.len()
    );

    if !report.failures.is_empty() {
        bail!("{} invalid assessments", report.failures.len());
    }

    Ok(())
}

/// Outcome of checking a content directory.
#[derive(Debug, Default)]
struct Report {
    checked: usize,
    /// (path, first error) per invalid file
    failures: Vec<(String, String)>,
}

fn check_dir(root: &Path) -> Report {
    let mut report = Report::default();

    for path in find_content_files(root) {
        report.checked += 1;

        let result = ContentDir::load_file(&path)
            .map_err(|e| e.to_string())
            .and_then(|source| Assessment::try_from(source).map_err(|e| e.to_string()));

        match result {
            Ok(assessment) => tracing::debug!(
                "{}: {} questions",
                path.display(),
                assessment.questions.len()
            ),
            Err(message) => report.failures.push((path.display().to_string(), message)),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reports_each_invalid_file() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("learn")).unwrap();

        fs::write(
            root.join("learn/good.assess.yaml"),
            "assessment:\n  questions:\n    - type: think-and-check\n      stem: Why?\n      options: []\n",
        )
        .unwrap();
        fs::write(
            root.join("learn/bad.assess.yaml"),
            "assessment:\n  questions:\n    - type: multiple-choice\n      correctAnswers: \"a,b\"\n      stem: Pick\n      options: []\n",
        )
        .unwrap();
        fs::write(root.join("broken.assess.json"), "{").unwrap();

        let report = check_dir(root);

        assert_eq!(report.checked, 3);
        assert_eq!(report.failures.len(), 2);
        assert!(report
            .failures
            .iter()
            .any(|(p, m)| p.ends_with("bad.assess.yaml") && m.contains("correctAnswers")));
        assert!(report
            .failures
            .iter()
            .any(|(p, m)| p.ends_with("broken.assess.json") && m.contains("Failed to parse")));
    }
}
