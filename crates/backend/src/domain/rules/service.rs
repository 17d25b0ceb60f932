//! Orchestration of the rule engine: validation first, then persistence.

use contracts::rules::ast::StoredRule;
use serde_json::{Map, Value};

use super::{combiner, error::RuleError, error::ServiceError, evaluator, parser, repository};

/// Parse and store a new rule.
pub async fn create_rule(rule_text: &str) -> Result<StoredRule, ServiceError> {
    let ast = parser::parse(rule_text)?;
    let stored = repository::insert(rule_text.trim(), &ast).await?;
    tracing::info!("Created rule {}: {}", stored.id, stored.rule_text);
    Ok(stored)
}

/// Evaluate a stored rule against submitted user data.
pub async fn evaluate_rule(
    rule_id: i64,
    user_data: &Map<String, Value>,
) -> Result<bool, ServiceError> {
    let stored = repository::get_by_id(rule_id)
        .await?
        .ok_or(RuleError::NotFound(rule_id))?;
    let result = evaluator::evaluate(&stored.ast, user_data)?;
    tracing::info!("Evaluated rule {}: {}", rule_id, result);
    Ok(result)
}

/// Combine stored rules under their dominant operator and store the result
/// as a new rule.
pub async fn combine_rules(rule_ids: &[i64]) -> Result<StoredRule, ServiceError> {
    if rule_ids.is_empty() {
        return Err(RuleError::EmptyCombination.into());
    }

    let mut asts = Vec::with_capacity(rule_ids.len());
    let mut texts = Vec::with_capacity(rule_ids.len());
    for &id in rule_ids {
        let stored = repository::get_by_id(id)
            .await?
            .ok_or(RuleError::NotFound(id))?;
        texts.push(stored.rule_text);
        asts.push(stored.ast);
    }

    let op = combiner::dominant_operator(&asts);
    let combined = combiner::combine(asts, op)?;

    let combined_text = if texts.len() == 1 {
        texts.remove(0)
    } else {
        texts
            .iter()
            .map(|t| format!("({})", t))
            .collect::<Vec<_>>()
            .join(&format!(" {} ", op))
    };

    let stored = repository::insert(&combined_text, &combined).await?;
    tracing::info!(
        "Combined rules {:?} into {} under {}",
        rule_ids,
        stored.id,
        op
    );
    Ok(stored)
}

pub async fn get_rule(id: i64) -> Result<Option<StoredRule>, ServiceError> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_rules() -> Result<Vec<StoredRule>, ServiceError> {
    Ok(repository::list_all().await?)
}
