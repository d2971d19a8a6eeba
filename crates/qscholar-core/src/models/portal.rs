
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::test::{deserialize_opt_id, Test};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub birthdate: String,
}

/// Body of a 200 login reply; both fields must be present for success
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub tests: Option<Vec<Test>>,
    pub message: Option<String>,
}

/// A successful login: the issued token plus the tests on offer
#[derive(Debug, Clone, PartialEq)]
pub struct LoginResult {
    pub token: String,
    pub tests: Vec<Test>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitTestRequest<'a> {
    pub email: &'a str,
    pub token: &'a str,
    pub test_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitTestResponse {
    pub message: Option<String>,
    pub instructions: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub attempt_id: Option<i64>,
}

impl InitTestResponse {
    /// Instructions, falling back to the status message when absent
    pub fn instructions_text(&self) -> String {
        self.instructions
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_default()
    }
}

/// An initialised attempt, ready to show instructions for
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub test_id: i64,
    pub attempt_id: i64,
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartTestRequest<'a> {
    pub email: &'a str,
    pub token: &'a str,
    pub test_id: i64,
    pub attempt_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartTestResponse {
    pub message: Option<String>,
    #[serde(default)]
    pub question_json: Option<Value>,
}

/// A started attempt carrying the question payload
#[derive(Debug, Clone, PartialEq)]
pub struct ExamLaunch {
    pub test_id: i64,
    pub attempt_id: i64,
    pub message: Option<String>,
    pub question_json: Value,
}

impl ExamLaunch {
    /// Number of questions when the payload is a list, or wraps one
    /// under a `questions` key
    pub fn question_count(&self) -> Option<usize> {
        match &self.question_json {
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => map.get("questions").and_then(Value::as_array).map(Vec::len),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_request_wire_shape() {
        let body = serde_json::to_value(LoginRequest {
            email: "a@b.c",
            birthdate: "2004-03-07".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({"email": "a@b.c", "birthdate": "2004-03-07"}));
    }

    #[test]
    fn test_init_request_wire_shape() {
        let body = serde_json::to_value(InitTestRequest {
            email: "a@b.c",
            token: "tok",
            test_id: 12,
        })
        .unwrap();
        assert_eq!(body, json!({"email": "a@b.c", "token": "tok", "test_id": 12}));
    }

    #[test]
    fn test_instructions_fall_back_to_message() {
        let resp: InitTestResponse =
            serde_json::from_str(r#"{"message": "Read carefully", "attempt_id": "9"}"#).unwrap();
        assert_eq!(resp.instructions_text(), "Read carefully");
        assert_eq!(resp.attempt_id, Some(9));

        let resp: InitTestResponse =
            serde_json::from_str(r#"{"message": "ok", "instructions": "No phones", "attempt_id": 3}"#)
                .unwrap();
        assert_eq!(resp.instructions_text(), "No phones");

        let resp: InitTestResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.instructions_text(), "");
        assert_eq!(resp.attempt_id, None);
    }

    #[test]
    fn test_question_count() {
        let launch = |question_json| ExamLaunch {
            test_id: 1,
            attempt_id: 2,
            message: None,
            question_json,
        };
        assert_eq!(launch(json!([{"q": 1}, {"q": 2}])).question_count(), Some(2));
        assert_eq!(launch(json!({"questions": [{"q": 1}]})).question_count(), Some(1));
        assert_eq!(launch(json!({"title": "x"})).question_count(), None);
        assert_eq!(launch(json!("raw")).question_count(), None);
    }
}
