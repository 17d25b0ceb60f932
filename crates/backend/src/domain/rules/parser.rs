//! Rule parsing: tokenizer plus shunting-yard AST construction.
//!
//! The surface syntax is infix, e.g.
//! `(age > 18 AND department = 'Sales') OR experience >= 5`.
//! Comparisons bind tighter than AND, AND tighter than OR; everything is
//! left associative.

use contracts::rules::ast::{BinaryOp, Node};

use super::error::RuleError;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LParen,
    RParen,
    Op(BinaryOp),
    Word(String),
}

/// Parse a rule string into an AST.
pub fn parse(rule: &str) -> Result<Node, RuleError> {
    let trimmed = rule.trim();
    if trimmed.is_empty() {
        return Err(RuleError::EmptyRule);
    }
    check_parentheses(trimmed)?;

    let tokens = tokenize(trimmed)?;

    // A rule without a single comparison is a plain attribute list, which the
    // language does not accept at the top level.
    let has_comparison = tokens
        .iter()
        .any(|t| matches!(t, Token::Op(op) if op.is_comparison()));
    if !has_comparison {
        return Err(RuleError::InvalidFormat(trimmed.to_string()));
    }

    build_ast(trimmed, tokens)
}

fn check_parentheses(rule: &str) -> Result<(), RuleError> {
    let mut balance: i32 = 0;
    for ch in rule.chars() {
        match ch {
            '(' => balance += 1,
            ')' => {
                balance -= 1;
                if balance < 0 {
                    return Err(RuleError::UnbalancedParentheses(rule.to_string()));
                }
            }
            _ => {}
        }
    }
    if balance != 0 {
        return Err(RuleError::UnbalancedParentheses(rule.to_string()));
    }
    Ok(())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '\'' | '"')
}

fn tokenize(rule: &str) -> Result<Vec<Token>, RuleError> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut chars = rule.chars().peekable();

    // Keywords are classified per whole word, so identifiers like "android"
    // never get split into operator fragments.
    fn flush(word: &mut String, tokens: &mut Vec<Token>) {
        if word.is_empty() {
            return;
        }
        let token = if word.eq_ignore_ascii_case("AND") {
            Token::Op(BinaryOp::And)
        } else if word.eq_ignore_ascii_case("OR") {
            Token::Op(BinaryOp::Or)
        } else {
            Token::Word(std::mem::take(word))
        };
        word.clear();
        tokens.push(token);
    }

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => flush(&mut word, &mut tokens),
            '(' => {
                flush(&mut word, &mut tokens);
                tokens.push(Token::LParen);
            }
            ')' => {
                flush(&mut word, &mut tokens);
                tokens.push(Token::RParen);
            }
            '>' | '<' | '=' | '!' => {
                flush(&mut word, &mut tokens);
                let two_char = chars.peek() == Some(&'=');
                let op = match (c, two_char) {
                    ('>', true) => BinaryOp::Ge,
                    ('<', true) => BinaryOp::Le,
                    ('!', true) => BinaryOp::Ne,
                    ('>', false) => BinaryOp::Gt,
                    ('<', false) => BinaryOp::Lt,
                    ('=', false) => BinaryOp::Eq,
                    // "==" is not part of the language, and a bare "!" has
                    // no one-char meaning
                    _ => return Err(RuleError::UnexpectedCharacter(c)),
                };
                if two_char {
                    chars.next();
                }
                tokens.push(Token::Op(op));
            }
            c if is_word_char(c) => word.push(c),
            other => return Err(RuleError::UnexpectedCharacter(other)),
        }
    }
    flush(&mut word, &mut tokens);

    Ok(tokens)
}

fn build_ast(rule: &str, tokens: Vec<Token>) -> Result<Node, RuleError> {
    let mut operands: Vec<Node> = Vec::new();
    // None marks an open parenthesis on the operator stack
    let mut operators: Vec<Option<BinaryOp>> = Vec::new();

    fn reduce(operands: &mut Vec<Node>, op: BinaryOp) -> Result<(), RuleError> {
        let right = operands
            .pop()
            .ok_or(RuleError::InsufficientOperands(op))?;
        let left = operands
            .pop()
            .ok_or(RuleError::InsufficientOperands(op))?;
        operands.push(Node::operation(op, left, right));
        Ok(())
    }

    for token in tokens {
        match token {
            Token::LParen => operators.push(None),
            Token::RParen => {
                while let Some(Some(op)) = operators.last().copied() {
                    operators.pop();
                    reduce(&mut operands, op)?;
                }
                // Discard the matching open paren; balance was pre-checked
                operators.pop();
            }
            Token::Op(op) => {
                while let Some(Some(top)) = operators.last().copied() {
                    if op.precedence() > top.precedence() {
                        break;
                    }
                    operators.pop();
                    reduce(&mut operands, top)?;
                }
                operators.push(Some(op));
            }
            Token::Word(value) => operands.push(Node::operand(value)),
        }
    }

    while let Some(entry) = operators.pop() {
        match entry {
            Some(op) => reduce(&mut operands, op)?,
            None => return Err(RuleError::UnbalancedParentheses(rule.to_string())),
        }
    }

    match (operands.pop(), operands.is_empty()) {
        (Some(root), true) => Ok(root),
        _ => Err(RuleError::InvalidFormat(rule.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_comparison() {
        let ast = parse("age > 18").unwrap();
        assert_eq!(
            ast,
            Node::operation(BinaryOp::Gt, Node::operand("age"), Node::operand("18"))
        );
    }

    #[test]
    fn test_logical_combination() {
        let ast = parse("(age > 18) AND (salary >= 50000)").unwrap();
        assert_eq!(
            ast,
            Node::operation(
                BinaryOp::And,
                Node::operation(BinaryOp::Gt, Node::operand("age"), Node::operand("18")),
                Node::operation(
                    BinaryOp::Ge,
                    Node::operand("salary"),
                    Node::operand("50000")
                ),
            )
        );
    }

    #[test]
    fn test_precedence_and_binds_tighter_than_or() {
        // OR at the root, AND grouping the right-hand pair
        let ast = parse("(age > 18) OR (salary >= 50000) AND (experience < 10)").unwrap();
        assert_eq!(
            ast,
            Node::operation(
                BinaryOp::Or,
                Node::operation(BinaryOp::Gt, Node::operand("age"), Node::operand("18")),
                Node::operation(
                    BinaryOp::And,
                    Node::operation(
                        BinaryOp::Ge,
                        Node::operand("salary"),
                        Node::operand("50000")
                    ),
                    Node::operation(
                        BinaryOp::Lt,
                        Node::operand("experience"),
                        Node::operand("10")
                    ),
                ),
            )
        );
    }

    #[test]
    fn test_string_literal_operand() {
        let ast = parse("department = 'Sales'").unwrap();
        assert_eq!(
            ast,
            Node::operation(
                BinaryOp::Eq,
                Node::operand("department"),
                Node::operand("'Sales'")
            )
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let ast = parse("age > 18 and salary < 100").unwrap();
        match ast {
            Node::Operation { value, .. } => assert_eq!(value, BinaryOp::And),
            _ => panic!("expected operation root"),
        }
    }

    #[test]
    fn test_keyword_not_split_out_of_identifiers() {
        // "android" contains "and"; "score" contains "or"
        let ast = parse("android >= score").unwrap();
        assert_eq!(
            ast,
            Node::operation(
                BinaryOp::Ge,
                Node::operand("android"),
                Node::operand("score")
            )
        );
    }

    #[test]
    fn test_empty_rule() {
        assert_eq!(parse(""), Err(RuleError::EmptyRule));
        assert_eq!(parse("   "), Err(RuleError::EmptyRule));
    }

    #[test]
    fn test_double_operator_is_rejected() {
        assert_eq!(
            parse("age >> 18"),
            Err(RuleError::InsufficientOperands(BinaryOp::Gt))
        );
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(
            parse("(age > 18 AND (salary >= 50000)"),
            Err(RuleError::UnbalancedParentheses(
                "(age > 18 AND (salary >= 50000)".to_string()
            ))
        );
        assert!(matches!(
            parse("age > 18)"),
            Err(RuleError::UnbalancedParentheses(_))
        ));
    }

    #[test]
    fn test_rule_without_comparison_is_rejected() {
        assert_eq!(
            parse("age AND salary"),
            Err(RuleError::InvalidFormat("age AND salary".to_string()))
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            parse("age # 18"),
            Err(RuleError::UnexpectedCharacter('#'))
        );
        assert_eq!(parse("age ! 18"), Err(RuleError::UnexpectedCharacter('!')));
    }

    #[test]
    fn test_adjacent_words_do_not_merge() {
        // Whitespace separates operands; two operands around no operator
        // cannot reduce to a single root.
        assert!(parse("age height > 18").is_err());
    }
}
