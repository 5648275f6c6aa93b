//! Validated assessment values.
//!
//! [`Assessment::try_from`] turns an [`AssessmentSource`] into typed values,
//! stopping at the first problem in document order.

use serde_json::Value;

use crate::fields::{Cardinality, CorrectAnswers, ResponseType};
use crate::source::{AssessmentSource, OptionSource, QuestionSource, ResponseSource};

/// A self-check quiz bundling one or more questions.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Banner text shown above multi-question assessments
    pub set_leader: Option<String>,

    /// Label shared by every tab panel
    pub tab_label: Option<String>,

    /// Fixed CSS height of the widget
    pub height: Option<String>,

    /// Questions in authored order (never empty)
    pub questions: Vec<Question>,
}

impl Assessment {
    /// Whether this assessment renders without tab and header chrome.
    pub fn is_singleton(&self) -> bool {
        self.questions.len() == 1
    }

    /// Banner text, only when it will actually be shown.
    pub fn visible_set_leader(&self) -> Option<&str> {
        if self.questions.len() > 1 {
            self.set_leader.as_deref()
        } else {
            None
        }
    }
}

/// A single question.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Block markdown shown before the responses
    pub stimulus: Option<String>,

    pub body: QuestionBody,
}

/// The answerable part of a question.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionBody {
    /// The question record itself was the response.
    Single(Response),
    /// The question listed its responses under `components`.
    Multi(Vec<Response>),
}

impl QuestionBody {
    pub fn responses(&self) -> &[Response] {
        match self {
            Self::Single(response) => std::slice::from_ref(response),
            Self::Multi(responses) => responses,
        }
    }
}

/// One answerable unit within a question.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub kind: ResponseType,
    pub cardinality: Option<Cardinality>,
    pub correct_answers: Option<CorrectAnswers>,
    pub columns: bool,

    /// Inline markdown prompt
    pub stem: String,

    pub options: Vec<AnswerOption>,
}

/// An answer option.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerOption {
    /// Inline markdown label
    pub content: Option<String>,

    /// Block markdown explanation
    pub rationale: Option<String>,
}

/// A malformed assessment.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Self-assessments need at least one question. Check your assessment's *.assess.yaml file for an empty questions list.")]
    NoQuestions,

    #[error("Self-assessments with {0} questions need a tabLabel. Check your assessment's *.assess.yaml file.")]
    MissingTabLabel(usize),

    #[error("Question {}: {source}", .question + 1)]
    Question {
        question: usize,
        source: ResponseError,
    },

    #[error("Question {}, component {}: {source}", .question + 1, .component + 1)]
    Component {
        question: usize,
        component: usize,
        source: ResponseError,
    },
}

/// A malformed response component.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("Can't create a self-assessment response component without a type argument. Check that all response component objects in your assessment's *.assess.yaml file include a type key.")]
    MissingType,

    #[error("Unrecognized self-assessment question response type {0:?}. Check your assessment's *.assess.yaml file for invalid type values.")]
    UnknownType(String),

    #[error("The cardinality value for self-assessment response components must be n, n+, or n-m, found {0:?}. Check your assessment's *.assess.yaml file for invalid cardinality values.")]
    InvalidCardinality(String),

    #[error("The correctAnswers value for self-assessment response components must be a comma-separated list of option indices, found {0:?}. Check your assessment's *.assess.yaml file for invalid correctAnswers values.")]
    InvalidCorrectAnswers(String),

    #[error("The columns value for self-assessment response components must be true or false, found {0}. Check your assessment's *.assess.yaml file for invalid columns values.")]
    InvalidColumns(String),

    #[error("Self-assessment response components need a stem. Check your assessment's *.assess.yaml file.")]
    MissingStem,

    #[error("Self-assessment response components need an options list. Check your assessment's *.assess.yaml file.")]
    MissingOptions,
}

impl TryFrom<AssessmentSource> for Assessment {
    type Error = ValidationError;

    fn try_from(source: AssessmentSource) -> Result<Self, Self::Error> {
        let count = source.questions.len();

        if count == 0 {
            return Err(ValidationError::NoQuestions);
        }

        let tab_label = source.tab_label.filter(|l| !l.is_empty());
        if count > 1 && tab_label.is_none() {
            return Err(ValidationError::MissingTabLabel(count));
        }

        let questions = source
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| question_from_source(index, question))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            set_leader: source.set_leader.filter(|s| !s.is_empty()),
            tab_label,
            height: source.height.filter(|h| !h.is_empty()),
            questions,
        })
    }
}

fn question_from_source(index: usize, source: QuestionSource) -> Result<Question, ValidationError> {
    let body = match source.components {
        Some(components) => components
            .into_iter()
            .enumerate()
            .map(|(component, response)| {
                Response::try_from(response).map_err(|source| ValidationError::Component {
                    question: index,
                    component,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(QuestionBody::Multi)?,
        None => Response::try_from(source.response)
            .map(QuestionBody::Single)
            .map_err(|source| ValidationError::Question {
                question: index,
                source,
            })?,
    };

    Ok(Question {
        stimulus: source.stimulus.filter(|s| !s.is_empty()),
        body,
    })
}

impl TryFrom<ResponseSource> for Response {
    type Error = ResponseError;

    fn try_from(source: ResponseSource) -> Result<Self, Self::Error> {
        let kind = match source.kind {
            None | Some(Value::Null) => return Err(ResponseError::MissingType),
            Some(Value::String(s)) if s.is_empty() => return Err(ResponseError::MissingType),
            Some(kind) => kind,
        };

        let cardinality = match scalar_text(source.cardinality) {
            Ok(Some(text)) => Some(text.parse::<Cardinality>()?),
            Ok(None) => None,
            Err(other) => return Err(ResponseError::InvalidCardinality(other)),
        };

        let correct_answers = match scalar_text(source.correct_answers) {
            Ok(Some(text)) => Some(text.parse::<CorrectAnswers>()?),
            Ok(None) => None,
            Err(other) => return Err(ResponseError::InvalidCorrectAnswers(other)),
        };

        let columns = match source.columns {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => b,
            Some(other) => return Err(ResponseError::InvalidColumns(other.to_string())),
        };

        // The type value is only checked once the other fields are known good.
        let kind = match kind {
            Value::String(s) => s.parse::<ResponseType>()?,
            other => return Err(ResponseError::UnknownType(other.to_string())),
        };

        let stem = source.stem.ok_or(ResponseError::MissingStem)?;
        let options = source
            .options
            .ok_or(ResponseError::MissingOptions)?
            .into_iter()
            .map(AnswerOption::from)
            .collect();

        Ok(Self {
            kind,
            cardinality,
            correct_answers,
            columns,
            stem,
            options,
        })
    }
}

impl From<OptionSource> for AnswerOption {
    fn from(source: OptionSource) -> Self {
        Self {
            content: source.content.filter(|c| !c.is_empty()),
            rationale: source.rationale.filter(|r| !r.is_empty()),
        }
    }
}

/// Text of a loosely typed scalar. Empty strings count as absent; numbers are
/// read as their decimal text. Anything else comes back as the error value.
fn scalar_text(value: Option<Value>) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(other.to_string()),
    }
}
