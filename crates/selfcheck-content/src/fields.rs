//! Typed response fields parsed from their authored text.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::assessment::ResponseError;

/// Kind of answerable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    ThinkAndCheck,
    MultipleChoice,
}

impl ResponseType {
    /// Name as written in content files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThinkAndCheck => "think-and-check",
            Self::MultipleChoice => "multiple-choice",
        }
    }

    /// Suffix appended to `web-response-` to form the element tag.
    pub fn tag_suffix(&self) -> &'static str {
        match self {
            Self::ThinkAndCheck => "tac",
            Self::MultipleChoice => "mc",
        }
    }

    /// Custom element tag for this response type.
    pub fn tag_name(&self) -> String {
        format!("web-response-{}", self.tag_suffix())
    }
}

impl FromStr for ResponseType {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "think-and-check" => Ok(Self::ThinkAndCheck),
            "multiple-choice" => Ok(Self::MultipleChoice),
            "" => Err(ResponseError::MissingType),
            other => Err(ResponseError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted shape of a cardinality value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// `n`
    Exactly(u32),
    /// `n+`
    AtLeast(u32),
    /// `n-m`
    Range(u32, u32),
}

/// Expected number of correct selections, kept with its authored text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cardinality {
    selection: Selection,
    text: String,
}

impl Cardinality {
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Value as written in the content file.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for Cardinality {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(\d+)(?:(\+)|-(\d+))?$").expect("Invalid cardinality regex")
        });

        let invalid = || ResponseError::InvalidCardinality(s.to_string());
        let caps = RE.captures(s).ok_or_else(invalid)?;

        let n: u32 = caps[1].parse().map_err(|_| invalid())?;

        let selection = if caps.get(2).is_some() {
            Selection::AtLeast(n)
        } else if let Some(m) = caps.get(3) {
            Selection::Range(n, m.as_str().parse().map_err(|_| invalid())?)
        } else {
            Selection::Exactly(n)
        };

        Ok(Self {
            selection,
            text: s.to_string(),
        })
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Indices of the correct options, in authored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectAnswers {
    indices: Vec<u32>,
    text: String,
}

impl CorrectAnswers {
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn contains(&self, index: u32) -> bool {
        self.indices.contains(&index)
    }

    /// Value as written in the content file.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for CorrectAnswers {
    type Err = ResponseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\d+(?:,\d+)*$").expect("Invalid correct answers regex")
        });

        let invalid = || ResponseError::InvalidCorrectAnswers(s.to_string());

        if !RE.is_match(s) {
            return Err(invalid());
        }

        let indices = s
            .split(',')
            .map(|part| part.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            indices,
            text: s.to_string(),
        })
    }
}

impl fmt::Display for CorrectAnswers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_response_type() {
        assert_eq!(
            "think-and-check".parse::<ResponseType>().unwrap(),
            ResponseType::ThinkAndCheck
        );
        assert_eq!(
            "multiple-choice".parse::<ResponseType>().unwrap(),
            ResponseType::MultipleChoice
        );
        assert!(matches!(
            "essay".parse::<ResponseType>(),
            Err(ResponseError::UnknownType(t)) if t == "essay"
        ));
        assert!(matches!(
            "".parse::<ResponseType>(),
            Err(ResponseError::MissingType)
        ));
    }

    #[test]
    fn response_type_tags() {
        assert_eq!(ResponseType::ThinkAndCheck.tag_name(), "web-response-tac");
        assert_eq!(ResponseType::MultipleChoice.tag_name(), "web-response-mc");
    }

    #[test]
    fn accepts_cardinality_forms() {
        let selection = |s: &str| s.parse::<Cardinality>().unwrap().selection();

        assert_eq!(selection("2"), Selection::Exactly(2));
        assert_eq!(selection("3+"), Selection::AtLeast(3));
        assert_eq!(selection("1-4"), Selection::Range(1, 4));
        assert_eq!(selection("10-12"), Selection::Range(10, 12));
    }

    #[test]
    fn rejects_malformed_cardinality() {
        for bad in ["abc", "+3", "4-", "", "1-2-3", " 2", "2+1", "-1"] {
            assert!(
                matches!(
                    bad.parse::<Cardinality>(),
                    Err(ResponseError::InvalidCardinality(_))
                ),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn cardinality_displays_authored_form() {
        for text in ["2", "3+", "1-4", "01", "02-3"] {
            assert_eq!(text.parse::<Cardinality>().unwrap().to_string(), text);
        }

        let padded: Cardinality = "01".parse().unwrap();
        assert_eq!(padded.selection(), Selection::Exactly(1));
        assert_eq!(padded.as_str(), "01");
    }

    #[test]
    fn parses_correct_answers() {
        let answers: CorrectAnswers = "1,3,4".parse().unwrap();
        assert_eq!(answers.indices(), &[1, 3, 4]);
        assert!(answers.contains(3));
        assert!(!answers.contains(2));
        assert_eq!(answers.to_string(), "1,3,4");

        let single: CorrectAnswers = "0".parse().unwrap();
        assert_eq!(single.indices(), &[0]);
    }

    #[test]
    fn correct_answers_display_authored_form() {
        let padded: CorrectAnswers = "007,2".parse().unwrap();

        assert_eq!(padded.indices(), &[7, 2]);
        assert_eq!(padded.to_string(), "007,2");
        assert_eq!(padded.as_str(), "007,2");
    }

    #[test]
    fn rejects_malformed_correct_answers() {
        for bad in ["1,,2", "a,b", "", ",1", "1,", "1, 2", "-1"] {
            assert!(
                matches!(
                    bad.parse::<CorrectAnswers>(),
                    Err(ResponseError::InvalidCorrectAnswers(_))
                ),
                "expected {:?} to be rejected",
                bad
            );
        }
    }
}
