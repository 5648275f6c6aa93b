//! Raw content records as authored in `*.assess.yaml` files.
//!
//! These mirror the on-disk shape one to one. Scalars that carry syntax
//! (`type`, `cardinality`, `correctAnswers`, `columns`) are kept as loose
//! values so that a malformed entry reaches validation instead of failing
//! deserialization with a less helpful message.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

/// A content description file. The assessment lives under a single
/// top-level `assessment` key.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentFile {
    pub assessment: AssessmentSource,
}

/// An assessment record before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSource {
    /// Banner text shown above multi-question assessments
    #[serde(default, deserialize_with = "text")]
    pub set_leader: Option<String>,

    /// Label used for every tab panel
    #[serde(default, deserialize_with = "text")]
    pub tab_label: Option<String>,

    /// Fixed CSS height of the widget
    #[serde(default, deserialize_with = "text")]
    pub height: Option<String>,

    #[serde(default)]
    pub questions: Vec<QuestionSource>,
}

/// A question record before validation.
///
/// When `components` is absent the question's own fields describe its single
/// response, which is why the response fields are flattened in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionSource {
    #[serde(default, deserialize_with = "text")]
    pub stimulus: Option<String>,

    #[serde(default)]
    pub components: Option<Vec<ResponseSource>>,

    #[serde(flatten)]
    pub response: ResponseSource,
}

/// A response record before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSource {
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,

    #[serde(default)]
    pub cardinality: Option<Value>,

    #[serde(default)]
    pub correct_answers: Option<Value>,

    #[serde(default)]
    pub columns: Option<Value>,

    #[serde(default, deserialize_with = "text")]
    pub stem: Option<String>,

    #[serde(default)]
    pub options: Option<Vec<OptionSource>>,
}

/// An answer option record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionSource {
    #[serde(default, deserialize_with = "text")]
    pub content: Option<String>,

    #[serde(default, deserialize_with = "text")]
    pub rationale: Option<String>,
}

/// Accept any scalar as text. YAML authors routinely leave `content: 4`
/// unquoted.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected text, found {}",
            other
        ))),
    }
}
