//! AST evaluation against a user-data object.
//!
//! Operands are interpreted lazily: a numeric literal stands for itself, a
//! `'quoted'` token is a string literal, anything else is an attribute
//! looked up in the user data. A bare operand in boolean position is a
//! presence check: it is true when it resolves at all.

use contracts::rules::ast::{BinaryOp, Node};
use serde_json::{Map, Value};

use super::error::RuleError;

/// A resolved operand value.
#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Scalar {
    fn type_name(&self) -> &'static str {
        match self {
            Scalar::Number(_) => "number",
            Scalar::Text(_) => "string",
            Scalar::Bool(_) => "boolean",
        }
    }
}

/// Evaluate a rule AST against the submitted user data.
pub fn evaluate(node: &Node, user_data: &Map<String, Value>) -> Result<bool, RuleError> {
    match node {
        Node::Operand { value } => {
            // Presence check
            resolve_operand(value, user_data)?;
            Ok(true)
        }
        Node::Operation { value, left, right } => match value {
            // Both sides are evaluated before combining, so a data error on
            // the right is reported even when the left already decides the
            // outcome.
            BinaryOp::And => {
                let l = evaluate(left, user_data)?;
                let r = evaluate(right, user_data)?;
                Ok(l && r)
            }
            BinaryOp::Or => {
                let l = evaluate(left, user_data)?;
                let r = evaluate(right, user_data)?;
                Ok(l || r)
            }
            BinaryOp::Eq => Ok(scalar_eq(
                &resolve_node(left, user_data)?,
                &resolve_node(right, user_data)?,
            )),
            BinaryOp::Ne => Ok(!scalar_eq(
                &resolve_node(left, user_data)?,
                &resolve_node(right, user_data)?,
            )),
            op => compare(
                *op,
                &resolve_node(left, user_data)?,
                &resolve_node(right, user_data)?,
            ),
        },
    }
}

fn resolve_node(node: &Node, user_data: &Map<String, Value>) -> Result<Scalar, RuleError> {
    match node {
        Node::Operand { value } => resolve_operand(value, user_data),
        Node::Operation { .. } => Err(RuleError::NonScalarOperand),
    }
}

fn resolve_operand(token: &str, user_data: &Map<String, Value>) -> Result<Scalar, RuleError> {
    if let Ok(n) = token.parse::<f64>() {
        return Ok(Scalar::Number(n));
    }
    if let Some(inner) = quoted_inner(token) {
        return Ok(Scalar::Text(inner.to_string()));
    }

    let value = user_data
        .get(token)
        .ok_or_else(|| RuleError::MissingAttribute(token.to_string()))?;
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(Scalar::Number)
            .ok_or_else(|| RuleError::InvalidAttributeType(token.to_string())),
        Value::String(s) => Ok(Scalar::Text(s.clone())),
        Value::Bool(b) => Ok(Scalar::Bool(*b)),
        _ => Err(RuleError::InvalidAttributeType(token.to_string())),
    }
}

fn quoted_inner(token: &str) -> Option<&str> {
    token
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .or_else(|| {
            token
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
        })
}

/// Equality across types is simply false, never an error.
fn scalar_eq(left: &Scalar, right: &Scalar) -> bool {
    match (left, right) {
        (Scalar::Number(l), Scalar::Number(r)) => l == r,
        (Scalar::Text(l), Scalar::Text(r)) => l == r,
        (Scalar::Bool(l), Scalar::Bool(r)) => l == r,
        _ => false,
    }
}

fn compare(op: BinaryOp, left: &Scalar, right: &Scalar) -> Result<bool, RuleError> {
    let (l, r) = match (left, right) {
        (Scalar::Number(l), Scalar::Number(r)) => (*l, *r),
        _ => {
            return Err(RuleError::IncompatibleTypes {
                left: left.type_name(),
                right: right.type_name(),
            })
        }
    };
    Ok(match op {
        BinaryOp::Gt => l > r,
        BinaryOp::Lt => l < r,
        BinaryOp::Ge => l >= r,
        BinaryOp::Le => l <= r,
        // And / Or / Eq / Ne are handled before compare() is reached
        _ => unreachable!("non-ordering operator in compare"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::parser::parse;

    fn data(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_numeric_comparison() {
        let ast = parse("age > 18").unwrap();
        assert!(evaluate(&ast, &data(&[("age", Value::from(20))])).unwrap());
        assert!(!evaluate(&ast, &data(&[("age", Value::from(18))])).unwrap());
    }

    #[test]
    fn test_string_equality() {
        let ast = parse("name = 'John'").unwrap();
        assert!(evaluate(&ast, &data(&[("name", Value::from("John"))])).unwrap());
        assert!(!evaluate(&ast, &data(&[("name", Value::from("Jane"))])).unwrap());
    }

    #[test]
    fn test_logical_and() {
        let ast = parse("age > 30 AND experience >= 5").unwrap();
        let d = data(&[("age", Value::from(35)), ("experience", Value::from(6))]);
        assert!(evaluate(&ast, &d).unwrap());

        let d = data(&[("age", Value::from(35)), ("experience", Value::from(4))]);
        assert!(!evaluate(&ast, &d).unwrap());
    }

    #[test]
    fn test_logical_or() {
        let ast = parse("age < 25 OR salary > 50000").unwrap();
        let d = data(&[("age", Value::from(30)), ("salary", Value::from(60000))]);
        assert!(evaluate(&ast, &d).unwrap());
    }

    #[test]
    fn test_mixed_numeric_and_string_branches() {
        let ast = parse("age > 30 AND department = 'Sales'").unwrap();
        let d = data(&[
            ("age", Value::from(35)),
            ("department", Value::from("Sales")),
        ]);
        assert!(evaluate(&ast, &d).unwrap());
    }

    #[test]
    fn test_missing_attribute() {
        let ast = parse("age > 30").unwrap();
        assert_eq!(
            evaluate(&ast, &Map::new()),
            Err(RuleError::MissingAttribute("age".to_string()))
        );
    }

    #[test]
    fn test_missing_attribute_on_right_side_of_and_is_reported() {
        // No short-circuit: the left side being false does not hide the
        // data error on the right.
        let ast = parse("age > 100 AND experience >= 5").unwrap();
        let d = data(&[("age", Value::from(35))]);
        assert_eq!(
            evaluate(&ast, &d),
            Err(RuleError::MissingAttribute("experience".to_string()))
        );
    }

    #[test]
    fn test_incompatible_comparison_types() {
        let ast = parse("age > 'thirty'").unwrap();
        let err = evaluate(&ast, &data(&[("age", Value::from(35))])).unwrap_err();
        assert_eq!(
            err,
            RuleError::IncompatibleTypes {
                left: "number",
                right: "string",
            }
        );
    }

    #[test]
    fn test_cross_type_equality_is_false_not_error() {
        let ast = parse("age = 'thirty'").unwrap();
        assert!(!evaluate(&ast, &data(&[("age", Value::from(35))])).unwrap());

        let ast = parse("age != 'thirty'").unwrap();
        assert!(evaluate(&ast, &data(&[("age", Value::from(35))])).unwrap());
    }

    #[test]
    fn test_numeric_equality_is_numeric() {
        // 30 typed as integer in user data still equals the literal 30
        let ast = parse("age = 30").unwrap();
        assert!(evaluate(&ast, &data(&[("age", Value::from(30))])).unwrap());
        assert!(evaluate(&ast, &data(&[("age", Value::from(30.0))])).unwrap());
    }

    #[test]
    fn test_bare_operands_are_presence_checks() {
        // "isActive AND age" is true when both attributes resolve
        let ast = Node::operation(
            BinaryOp::And,
            Node::operand("isActive"),
            Node::operand("age"),
        );
        let d = data(&[("isActive", Value::from(true)), ("age", Value::from(30))]);
        assert!(evaluate(&ast, &d).unwrap());

        assert_eq!(
            evaluate(&ast, &data(&[("age", Value::from(30))])),
            Err(RuleError::MissingAttribute("isActive".to_string()))
        );
    }

    #[test]
    fn test_null_attribute_is_invalid() {
        let ast = parse("age > 18").unwrap();
        assert_eq!(
            evaluate(&ast, &data(&[("age", Value::Null)])),
            Err(RuleError::InvalidAttributeType("age".to_string()))
        );
    }

    #[test]
    fn test_operation_as_comparison_operand_is_rejected() {
        let ast = Node::operation(
            BinaryOp::Eq,
            Node::operand("age"),
            Node::operation(BinaryOp::Gt, Node::operand("a"), Node::operand("b")),
        );
        assert_eq!(
            evaluate(&ast, &data(&[("age", Value::from(1))])),
            Err(RuleError::NonScalarOperand)
        );
    }
}
