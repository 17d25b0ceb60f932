use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Operators
// ============================================================================

/// Binary operators of the rule language.
///
/// The serde renderings match the surface syntax, so a serialized AST reads
/// the same way the rule was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
}

impl BinaryOp {
    /// Precedence used when building the AST: comparisons bind tighter than
    /// AND, which binds tighter than OR.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            _ => 3,
        }
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    pub fn is_comparison(self) -> bool {
        !self.is_logical()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Ge => ">=",
            BinaryOp::Le => "<=",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// AST
// ============================================================================

/// A node of a parsed rule.
///
/// Operands hold the raw token text (attribute name, numeric literal or
/// `'quoted'` string); interpretation happens at evaluation time. An
/// operation always has both children, so a half-built comparison cannot be
/// stored or shipped across the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Operand {
        value: String,
    },
    Operation {
        value: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn operand(value: impl Into<String>) -> Self {
        Node::Operand {
            value: value.into(),
        }
    }

    pub fn operation(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::Operation {
            value: op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Count AND / OR occurrences in the subtree. Used to pick the dominant
    /// operator when combining several rules.
    pub fn logical_counts(&self) -> LogicalCounts {
        let mut counts = LogicalCounts::default();
        self.accumulate_logical(&mut counts);
        counts
    }

    fn accumulate_logical(&self, counts: &mut LogicalCounts) {
        if let Node::Operation { value, left, right } = self {
            match value {
                BinaryOp::And => counts.and += 1,
                BinaryOp::Or => counts.or += 1,
                _ => {}
            }
            left.accumulate_logical(counts);
            right.accumulate_logical(counts);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicalCounts {
    pub and: usize,
    pub or: usize,
}

impl LogicalCounts {
    /// OR wins only when it strictly outnumbers AND.
    pub fn dominant(self) -> BinaryOp {
        if self.or > self.and {
            BinaryOp::Or
        } else {
            BinaryOp::And
        }
    }
}

// ============================================================================
// Persisted rule
// ============================================================================

/// A rule as stored by the backend and returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRule {
    pub id: i64,
    #[serde(rename = "ruleText")]
    pub rule_text: String,
    pub ast: Node,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_json_shape() {
        let node = Node::operation(
            BinaryOp::Gt,
            Node::operand("age"),
            Node::operand("18"),
        );
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "operation",
                "value": ">",
                "left": { "type": "operand", "value": "age" },
                "right": { "type": "operand", "value": "18" },
            })
        );
    }

    #[test]
    fn test_logical_counts_dominant() {
        let rule = Node::operation(
            BinaryOp::Or,
            Node::operation(
                BinaryOp::Or,
                Node::operand("a"),
                Node::operand("b"),
            ),
            Node::operation(BinaryOp::And, Node::operand("c"), Node::operand("d")),
        );
        let counts = rule.logical_counts();
        assert_eq!(counts, LogicalCounts { and: 1, or: 2 });
        assert_eq!(counts.dominant(), BinaryOp::Or);

        // Tie goes to AND
        assert_eq!(LogicalCounts { and: 1, or: 1 }.dominant(), BinaryOp::And);
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(BinaryOp::Gt.precedence() > BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
    }
}
