use contracts::rules::api::{
    CombinationResponse, CombineRulesRequest, CreateRuleRequest, RuleResponse,
};
use contracts::rules::ast::StoredRule;
use gloo_net::http::Request;

use crate::shared::api_utils::api_base;

/// Parse and store a new rule
pub async fn create_rule(rule: String) -> Result<RuleResponse, String> {
    let request = CreateRuleRequest { rule };

    let response = Request::post(&format!("{}/api/rules/create", api_base()))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Create failed: {}", response.status()));
    }

    response
        .json::<RuleResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Combine stored rules into a new one
pub async fn combine_rules(rule_ids: Vec<i64>) -> Result<CombinationResponse, String> {
    let request = CombineRulesRequest { rule_ids };

    let response = Request::post(&format!("{}/api/rules/combine", api_base()))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Combine failed: {}", response.status()));
    }

    response
        .json::<CombinationResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// List all stored rules
pub async fn list_rules() -> Result<Vec<StoredRule>, String> {
    let response = Request::get(&format!("{}/api/rules", api_base()))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("List failed: {}", response.status()));
    }

    response
        .json::<Vec<StoredRule>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
