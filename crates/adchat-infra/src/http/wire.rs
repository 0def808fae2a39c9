//! Wire types for the assistant REST API.
//!
//! The backend has shipped both camelCase and snake_case spellings of the
//! ask response fields. Both are accepted here and collapsed into the
//! canonical [`AskReply`] before anything else sees them.

use adchat_types::ask::AskReply;
use adchat_types::subject::SubjectId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST {ask_path}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequestBody<'a> {
    pub subject_id: &'a SubjectId,
    pub question: &'a str,
}

/// Raw ask response as sent by the backend.
///
/// Each spelling is its own field so a body carrying both still decodes;
/// camelCase wins when both are present. Every field is optional and a
/// value of the wrong type reads as absent, so one odd field never costs
/// the answer.
#[derive(Debug, Default, Deserialize)]
pub struct AskResponseBody {
    #[serde(default, deserialize_with = "lenient")]
    pub answer: Option<String>,
    #[serde(default, rename = "suggestedQuestions", deserialize_with = "lenient_strings")]
    pub suggested_questions: Option<Vec<String>>,
    #[serde(default, rename = "suggested_questions", deserialize_with = "lenient_strings")]
    pub suggested_questions_snake: Option<Vec<String>>,
    #[serde(default, rename = "askCount", deserialize_with = "lenient_count")]
    pub ask_count: Option<u32>,
    #[serde(default, rename = "ask_count", deserialize_with = "lenient_count")]
    pub ask_count_snake: Option<u32>,
    #[serde(default, rename = "askLimit", deserialize_with = "lenient_count")]
    pub ask_limit: Option<u32>,
    #[serde(default, rename = "ask_limit", deserialize_with = "lenient_count")]
    pub ask_limit_snake: Option<u32>,
    #[serde(default, rename = "limitReached", deserialize_with = "lenient")]
    pub limit_reached: Option<bool>,
    #[serde(default, rename = "limit_reached", deserialize_with = "lenient")]
    pub limit_reached_snake: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
}

/// Any value that does not decode as `T` (including `null`) is `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Non-negative integers, also when sent as numeric strings.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(count)
}

/// String arrays; non-string elements are dropped.
fn lenient_strings<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let strings = match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    };
    Ok(strings)
}

impl From<AskResponseBody> for AskReply {
    fn from(body: AskResponseBody) -> Self {
        AskReply {
            answer: body.answer,
            suggestions: body.suggested_questions.or(body.suggested_questions_snake),
            ask_count: body.ask_count.or(body.ask_count_snake),
            ask_limit: body
                .ask_limit
                .filter(|limit| *limit >= 1)
                .or(body.ask_limit_snake.filter(|limit| *limit >= 1)),
            limit_reached: body.limit_reached.or(body.limit_reached_snake),
            error: body.error.filter(|e| !e.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AskReply {
        serde_json::from_str::<AskResponseBody>(json).unwrap().into()
    }

    #[test]
    fn test_camel_case_fields() {
        let reply = parse(
            r#"{"answer":"Hi","suggestedQuestions":["a"],"askCount":1,"askLimit":10,"limitReached":false}"#,
        );
        assert_eq!(reply.answer.as_deref(), Some("Hi"));
        assert_eq!(reply.suggestions, Some(vec!["a".to_string()]));
        assert_eq!(reply.ask_count, Some(1));
        assert_eq!(reply.ask_limit, Some(10));
        assert_eq!(reply.limit_reached, Some(false));
        assert!(!reply.is_error());
    }

    #[test]
    fn test_snake_case_fields() {
        let reply = parse(
            r#"{"answer":"Hi","suggested_questions":["b"],"ask_count":3,"ask_limit":5,"limit_reached":true}"#,
        );
        assert_eq!(reply.suggestions, Some(vec!["b".to_string()]));
        assert_eq!(reply.ask_count, Some(3));
        assert_eq!(reply.ask_limit, Some(5));
        assert_eq!(reply.limit_reached, Some(true));
    }

    #[test]
    fn test_both_spellings_prefer_camel_case() {
        let reply = parse(
            r#"{"answer":"Hi","askCount":1,"ask_count":4,"askLimit":10,"ask_limit":3,"suggestedQuestions":["camel"],"suggested_questions":["snake"],"limit_reached":true}"#,
        );
        assert_eq!(reply.answer.as_deref(), Some("Hi"));
        assert_eq!(reply.ask_count, Some(1));
        assert_eq!(reply.ask_limit, Some(10));
        assert_eq!(reply.suggestions, Some(vec!["camel".to_string()]));
        assert_eq!(reply.limit_reached, Some(true));
    }

    #[test]
    fn test_mistyped_fields_do_not_lose_the_answer() {
        let reply = parse(
            r#"{"answer":"Hi","askCount":"2","askLimit":"ten","limitReached":"yes","suggestedQuestions":["a",3,null,"b"]}"#,
        );
        assert_eq!(reply.answer.as_deref(), Some("Hi"));
        assert_eq!(reply.ask_count, Some(2));
        assert_eq!(reply.ask_limit, None);
        assert_eq!(reply.limit_reached, None);
        assert_eq!(reply.suggestions, Some(vec!["a".to_string(), "b".to_string()]));

        let reply = parse(r#"{"answer":null,"askCount":-1,"suggestedQuestions":"a","error":42}"#);
        assert_eq!(reply.answer, None);
        assert_eq!(reply.ask_count, None);
        assert_eq!(reply.suggestions, None);
        assert!(!reply.is_error());
    }

    #[test]
    fn test_zero_camel_limit_falls_back_to_snake() {
        let reply = parse(r#"{"answer":"Hi","askLimit":0,"ask_limit":5}"#);
        assert_eq!(reply.ask_limit, Some(5));
    }

    #[test]
    fn test_error_only_and_zero_limit() {
        let reply = parse(r#"{"error":"limit reached","askLimit":0}"#);
        assert_eq!(reply.error.as_deref(), Some("limit reached"));
        assert_eq!(reply.ask_limit, None);
        assert_eq!(reply.answer, None);
    }

    #[test]
    fn test_blank_error_is_not_an_error() {
        let reply = parse(r#"{"answer":"ok","error":""}"#);
        assert!(!reply.is_error());
    }

    #[test]
    fn test_request_body_shape() {
        let subject = SubjectId::new("ad-3");
        let body = AskRequestBody {
            subject_id: &subject,
            question: "",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"subjectId": "ad-3", "question": ""}));
    }
}
