use contracts::rules::ast::BinaryOp;
use thiserror::Error;

/// Failures of the rule language itself: bad syntax, bad references, bad
/// data. These surface to clients as `status: "error"` response bodies.
#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("Rule cannot be empty")]
    EmptyRule,

    #[error("Invalid rule format: {0}")]
    InvalidFormat(String),

    #[error("Unbalanced parentheses in rule: {0}")]
    UnbalancedParentheses(String),

    #[error("Insufficient operands for operator {0}")]
    InsufficientOperands(BinaryOp),

    #[error("Unexpected character '{0}' in rule")]
    UnexpectedCharacter(char),

    #[error("No rule found for ID: {0}")]
    NotFound(i64),

    #[error("User data does not contain required attribute: {0}")]
    MissingAttribute(String),

    #[error("Invalid attribute type for operand: {0}")]
    InvalidAttributeType(String),

    #[error("Comparison operand must be a simple value")]
    NonScalarOperand,

    #[error("Incompatible types for comparison: {left} and {right}")]
    IncompatibleTypes {
        left: &'static str,
        right: &'static str,
    },

    #[error("Cannot combine an empty list of rules")]
    EmptyCombination,
}

/// Service-level failure: either a rule-language error (the client's fault,
/// reported in the response body) or a storage error (ours, reported as 500).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
