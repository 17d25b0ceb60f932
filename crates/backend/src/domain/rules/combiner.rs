//! Combining several stored rules into one AST.
//!
//! The combined rule joins the source ASTs left to right under a single
//! dominant operator: OR when OR occurrences strictly outnumber AND across
//! all sources, AND otherwise.

use contracts::rules::ast::{BinaryOp, LogicalCounts, Node};

use super::error::RuleError;

/// Pick the operator to join the given ASTs with.
pub fn dominant_operator(asts: &[Node]) -> BinaryOp {
    let mut total = LogicalCounts::default();
    for ast in asts {
        let counts = ast.logical_counts();
        total.and += counts.and;
        total.or += counts.or;
    }
    total.dominant()
}

/// Left-fold the ASTs under `op`. A single AST is returned unchanged.
pub fn combine(asts: Vec<Node>, op: BinaryOp) -> Result<Node, RuleError> {
    let mut iter = asts.into_iter();
    let Some(mut root) = iter.next() else {
        return Err(RuleError::EmptyCombination);
    };
    for next in iter {
        root = Node::operation(op, root, next);
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::parser::parse;

    #[test]
    fn test_two_rules_default_to_and() {
        let rules = vec![parse("age > 18").unwrap(), parse("salary < 50000").unwrap()];
        let op = dominant_operator(&rules);
        assert_eq!(op, BinaryOp::And);

        let combined = combine(rules.clone(), op).unwrap();
        assert_eq!(
            combined,
            Node::operation(BinaryOp::And, rules[0].clone(), rules[1].clone())
        );
    }

    #[test]
    fn test_dominant_or_wins() {
        let rules = vec![
            parse("age > 18").unwrap(),
            parse("salary < 50000").unwrap(),
            parse("experience > 2 OR level = 'senior'").unwrap(),
        ];
        assert_eq!(dominant_operator(&rules), BinaryOp::Or);
    }

    #[test]
    fn test_equal_counts_fall_back_to_and() {
        let rules = vec![
            parse("a > 1 OR b > 2").unwrap(),
            parse("c > 3 AND d > 4").unwrap(),
        ];
        assert_eq!(dominant_operator(&rules), BinaryOp::And);
    }

    #[test]
    fn test_single_rule_is_returned_unchanged() {
        let rule = parse("age = 18").unwrap();
        let combined = combine(vec![rule.clone()], BinaryOp::And).unwrap();
        assert_eq!(combined, rule);
    }

    #[test]
    fn test_left_fold_ordering() {
        let a = parse("a > 1").unwrap();
        let b = parse("b > 2").unwrap();
        let c = parse("c > 3").unwrap();
        let combined =
            combine(vec![a.clone(), b.clone(), c.clone()], BinaryOp::And).unwrap();
        assert_eq!(
            combined,
            Node::operation(
                BinaryOp::And,
                Node::operation(BinaryOp::And, a, b),
                c
            )
        );
    }

    #[test]
    fn test_empty_list_is_an_error() {
        assert_eq!(
            combine(Vec::new(), BinaryOp::And),
            Err(RuleError::EmptyCombination)
        );
    }

    #[test]
    fn test_combined_ast_still_evaluates() {
        use crate::domain::rules::evaluator::evaluate;
        use serde_json::Value;

        let rules = vec![parse("age > 18").unwrap(), parse("salary < 50000").unwrap()];
        let op = dominant_operator(&rules);
        let combined = combine(rules, op).unwrap();

        let mut data = serde_json::Map::new();
        data.insert("age".into(), Value::from(30));
        data.insert("salary".into(), Value::from(40000));
        assert!(evaluate(&combined, &data).unwrap());
    }
}
