//! Content lookup for assessment records.
//!
//! Pages find their assessments by directory and name. [`ContentDir`] reads
//! them from `<root><dir><name>.assess.yaml` on disk; [`MemoryContent`]
//! serves records held in memory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::source::{AssessmentSource, ContentFile};

/// Serialization format of a content description file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Yaml,
    Json,
}

impl ContentFormat {
    /// File suffixes tried in order when resolving a name.
    pub const SUFFIXES: [(&'static str, ContentFormat); 3] = [
        (".assess.yaml", ContentFormat::Yaml),
        (".assess.yml", ContentFormat::Yaml),
        (".assess.json", ContentFormat::Json),
    ];

    /// Detect the format of a content description file by its name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        Self::SUFFIXES
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix) && name.len() > suffix.len())
            .map(|(_, format)| *format)
    }

    /// Parse a content description file.
    pub fn parse(&self, text: &str) -> Result<AssessmentSource, String> {
        let file: ContentFile = match self {
            Self::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string())?,
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string())?,
        };
        Ok(file.assessment)
    }
}

/// Errors that can occur when looking up an assessment.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Assessment not found: {path}. Pass the file name, without \".assess.yaml\", of an assessment next to the page.")]
    NotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Source of assessment records.
pub trait ContentLookup: Send + Sync {
    /// Load the assessment `name` stored alongside pages in `dir`.
    ///
    /// `dir` is a page directory relative to the content root, such as
    /// `/blog/intro/`.
    fn load(&self, dir: &str, name: &str) -> Result<AssessmentSource, LookupError>;
}

/// Assessment records stored on disk beneath a content root.
#[derive(Debug, Clone)]
pub struct ContentDir {
    root: PathBuf,
}

impl ContentDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate file paths for an assessment, in lookup order.
    pub fn candidates(&self, dir: &str, name: &str) -> Vec<(PathBuf, ContentFormat)> {
        let base = self.root.join(dir.trim_start_matches('/'));

        ContentFormat::SUFFIXES
            .iter()
            .map(|(suffix, format)| (base.join(format!("{}{}", name, suffix)), *format))
            .collect()
    }

    /// Read and parse a single content description file.
    pub fn load_file(path: &Path) -> Result<AssessmentSource, LookupError> {
        let format = ContentFormat::from_path(path).ok_or_else(|| LookupError::Parse {
            path: path.display().to_string(),
            message: "not a *.assess.yaml, *.assess.yml or *.assess.json file".to_string(),
        })?;

        let text = fs::read_to_string(path).map_err(|e| LookupError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        format.parse(&text).map_err(|message| LookupError::Parse {
            path: path.display().to_string(),
            message,
        })
    }
}

impl ContentLookup for ContentDir {
    fn load(&self, dir: &str, name: &str) -> Result<AssessmentSource, LookupError> {
        let candidates = self.candidates(dir, name);

        let Some((path, _)) = candidates.iter().find(|(path, _)| path.is_file()) else {
            let path = candidates
                .first()
                .map(|(p, _)| p.display().to_string())
                .unwrap_or_default();
            return Err(LookupError::NotFound { path });
        };

        tracing::debug!("Loading assessment from {}", path.display());
        Self::load_file(path)
    }
}

/// Assessment records held in memory, keyed by directory and name.
#[derive(Debug, Clone, Default)]
pub struct MemoryContent {
    records: HashMap<(String, String), AssessmentSource>,
}

impl MemoryContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dir: impl Into<String>, name: impl Into<String>, source: AssessmentSource) {
        self.records.insert((dir.into(), name.into()), source);
    }

    /// Builder-style [`MemoryContent::insert`].
    pub fn with(mut self, dir: impl Into<String>, name: impl Into<String>, source: AssessmentSource) -> Self {
        self.insert(dir, name, source);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ContentLookup for MemoryContent {
    fn load(&self, dir: &str, name: &str) -> Result<AssessmentSource, LookupError> {
        self.records
            .get(&(dir.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                path: format!("{}{}.assess.yaml", dir, name),
            })
    }
}

/// Every content description file beneath `root`, sorted by path.
pub fn find_content_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| ContentFormat::from_path(p).is_some())
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const QUIZ: &str = r#"assessment:
  questions:
    - type: think-and-check
      stem: Why?
      options: []
"#;

    #[test]
    fn detects_content_formats() {
        assert_eq!(
            ContentFormat::from_path(Path::new("a/quiz.assess.yaml")),
            Some(ContentFormat::Yaml)
        );
        assert_eq!(
            ContentFormat::from_path(Path::new("quiz.assess.yml")),
            Some(ContentFormat::Yaml)
        );
        assert_eq!(
            ContentFormat::from_path(Path::new("quiz.assess.json")),
            Some(ContentFormat::Json)
        );
        assert_eq!(ContentFormat::from_path(Path::new("quiz.yaml")), None);
        assert_eq!(ContentFormat::from_path(Path::new(".assess.yaml")), None);
    }

    #[test]
    fn loads_from_page_directory() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("learn/closures");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("self-check.assess.yaml"), QUIZ).unwrap();

        let content = ContentDir::new(temp.path());
        let source = content.load("/learn/closures/", "self-check").unwrap();

        assert_eq!(source.questions.len(), 1);
    }

    #[test]
    fn falls_back_to_json() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("quiz.assess.json"),
            r#"{"assessment": {"questions": []}}"#,
        )
        .unwrap();

        let content = ContentDir::new(temp.path());
        let source = content.load("/", "quiz").unwrap();

        assert!(source.questions.is_empty());
    }

    #[test]
    fn reports_missing_assessment() {
        let temp = tempdir().unwrap();
        let content = ContentDir::new(temp.path());

        let err = content.load("/blog/", "missing").unwrap_err();

        match err {
            LookupError::NotFound { path } => assert!(path.ends_with("missing.assess.yaml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("bad.assess.yaml"), "assessment: [").unwrap();

        let err = ContentDir::new(temp.path()).load("/", "bad").unwrap_err();

        assert!(matches!(err, LookupError::Parse { ref path, .. } if path.ends_with("bad.assess.yaml")));
    }

    #[test]
    fn memory_content_lookup() {
        let content = MemoryContent::new().with("/blog/", "quiz", AssessmentSource::default());

        assert_eq!(content.len(), 1);
        assert!(content.load("/blog/", "quiz").is_ok());
        assert!(matches!(
            content.load("/", "quiz"),
            Err(LookupError::NotFound { .. })
        ));
    }

    #[test]
    fn finds_content_files_recursively() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("a/b")).unwrap();
        fs::write(temp.path().join("a/one.assess.yaml"), QUIZ).unwrap();
        fs::write(temp.path().join("a/b/two.assess.json"), "{}").unwrap();
        fs::write(temp.path().join("a/index.md"), "# Page").unwrap();

        let files = find_content_files(temp.path());

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a/b/two.assess.json"));
        assert!(files[1].ends_with("a/one.assess.yaml"));
    }
}
