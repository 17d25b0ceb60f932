//! Request / response DTOs for the rules API.
//!
//! Responses carry an explicit `status` of `"success"` or `"error"` so the
//! UI can render the outcome without inspecting HTTP details.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ast::StoredRule;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

// ============================================================================
// Create
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRuleRequest {
    pub rule: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<StoredRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RuleResponse {
    pub fn success(rule: StoredRule) -> Self {
        Self {
            status: STATUS_SUCCESS.into(),
            rule: Some(rule),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.into(),
            rule: None,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// Evaluate
// ============================================================================

/// Wire form of the evaluate request.
///
/// The MVVM pages send typed values, but the form bridge posts every field
/// as text (`{"ruleId":"1","userData":"{\"age\":30}"}`), so both fields are
/// taken as raw JSON and interpreted by the accessors below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRuleRequest {
    #[serde(rename = "ruleId")]
    pub rule_id: Value,
    #[serde(rename = "userData")]
    pub user_data: Value,
}

impl EvaluateRuleRequest {
    pub fn new(rule_id: i64, user_data: Map<String, Value>) -> Self {
        Self {
            rule_id: Value::from(rule_id),
            user_data: Value::Object(user_data),
        }
    }

    /// The rule id, whether it arrived as a number or as form-field text.
    pub fn parsed_rule_id(&self) -> Option<i64> {
        match &self.rule_id {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The user data object, whether it arrived as an object or as a JSON
    /// string typed into a form field.
    pub fn parsed_user_data(&self) -> Option<Map<String, Value>> {
        match &self.user_data {
            Value::Object(map) => Some(map.clone()),
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEvaluationResponse {
    pub status: String,
    pub result: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RuleEvaluationResponse {
    pub fn success(result: bool) -> Self {
        Self {
            status: STATUS_SUCCESS.into(),
            result,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.into(),
            result: false,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// Combine
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineRulesRequest {
    #[serde(rename = "ruleIds")]
    pub rule_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationResponse {
    pub status: String,
    #[serde(rename = "combinedRule", skip_serializing_if = "Option::is_none")]
    pub combined_rule: Option<StoredRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CombinationResponse {
    pub fn success(rule: StoredRule) -> Self {
        Self {
            status: STATUS_SUCCESS.into(),
            combined_rule: Some(rule),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.into(),
            combined_rule: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_request_typed_fields() {
        let mut data = Map::new();
        data.insert("age".into(), Value::from(30));
        let req = EvaluateRuleRequest::new(7, data);

        assert_eq!(req.parsed_rule_id(), Some(7));
        let parsed = req.parsed_user_data().unwrap();
        assert_eq!(parsed.get("age"), Some(&Value::from(30)));
    }

    #[test]
    fn test_evaluate_request_form_bridge_fields() {
        // The bridge posts every form field as a string.
        let req: EvaluateRuleRequest = serde_json::from_str(
            r#"{"ruleId":"12","userData":"{\"age\":30,\"name\":\"alice\"}"}"#,
        )
        .unwrap();

        assert_eq!(req.parsed_rule_id(), Some(12));
        let parsed = req.parsed_user_data().unwrap();
        assert_eq!(parsed.get("name"), Some(&Value::from("alice")));
    }

    #[test]
    fn test_evaluate_request_rejects_garbage() {
        let req: EvaluateRuleRequest =
            serde_json::from_str(r#"{"ruleId":"twelve","userData":"not json"}"#).unwrap();
        assert_eq!(req.parsed_rule_id(), None);
        assert!(req.parsed_user_data().is_none());

        // A JSON array is not a user-data object either.
        let req: EvaluateRuleRequest =
            serde_json::from_str(r#"{"ruleId":1,"userData":"[1,2]"}"#).unwrap();
        assert!(req.parsed_user_data().is_none());
    }

    #[test]
    fn test_error_response_shape() {
        let resp = RuleEvaluationResponse::error("Rule not found");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "error",
                "result": false,
                "error": "Rule not found",
            })
        );
    }
}
