use axum::{extract::Path, http::StatusCode, Json};
use contracts::rules::api::{
    CombinationResponse, CombineRulesRequest, CreateRuleRequest, EvaluateRuleRequest,
    RuleEvaluationResponse, RuleResponse,
};
use contracts::rules::ast::StoredRule;

use crate::domain::rules::{error::ServiceError, service};

// Rule-language failures go back as `status:"error"` bodies; only storage
// failures become HTTP 5xx.

/// POST /api/rules/create
pub async fn create(
    Json(req): Json<CreateRuleRequest>,
) -> Result<Json<RuleResponse>, StatusCode> {
    match service::create_rule(&req.rule).await {
        Ok(rule) => Ok(Json(RuleResponse::success(rule))),
        Err(ServiceError::Rule(e)) => Ok(Json(RuleResponse::error(e.to_string()))),
        Err(ServiceError::Storage(e)) => {
            tracing::error!("create_rule failed: {e:#}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/rules/evaluate
pub async fn evaluate(
    Json(req): Json<EvaluateRuleRequest>,
) -> Result<Json<RuleEvaluationResponse>, StatusCode> {
    let rule_id = match req.parsed_rule_id() {
        Some(id) if id > 0 => id,
        _ => return Ok(Json(RuleEvaluationResponse::error("Invalid rule id."))),
    };
    let user_data = match req.parsed_user_data() {
        Some(map) => map,
        None => {
            return Ok(Json(RuleEvaluationResponse::error(
                "Invalid user data format. Please provide valid JSON.",
            )))
        }
    };
    if user_data.is_empty() {
        return Ok(Json(RuleEvaluationResponse::error(
            "User data cannot be empty.",
        )));
    }

    match service::evaluate_rule(rule_id, &user_data).await {
        Ok(result) => Ok(Json(RuleEvaluationResponse::success(result))),
        Err(ServiceError::Rule(e)) => Ok(Json(RuleEvaluationResponse::error(e.to_string()))),
        Err(ServiceError::Storage(e)) => {
            tracing::error!("evaluate_rule failed: {e:#}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/rules/combine
pub async fn combine(
    Json(req): Json<CombineRulesRequest>,
) -> Result<Json<CombinationResponse>, StatusCode> {
    match service::combine_rules(&req.rule_ids).await {
        Ok(rule) => Ok(Json(CombinationResponse::success(rule))),
        Err(ServiceError::Rule(e)) => Ok(Json(CombinationResponse::error(e.to_string()))),
        Err(ServiceError::Storage(e)) => {
            tracing::error!("combine_rules failed: {e:#}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/rules
pub async fn list_all() -> Result<Json<Vec<StoredRule>>, StatusCode> {
    match service::list_rules().await {
        Ok(rules) => Ok(Json(rules)),
        Err(e) => {
            tracing::error!("list_rules failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/rules/:id
pub async fn get_by_id(Path(id): Path<i64>) -> Result<Json<StoredRule>, StatusCode> {
    match service::get_rule(id).await {
        Ok(Some(rule)) => Ok(Json(rule)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("get_rule failed: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
