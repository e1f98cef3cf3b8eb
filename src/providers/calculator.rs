//! Inline calculator provider

use super::traits::Provider;
use crate::results::{Category, ResultItem};
use async_trait::async_trait;
use tracing::info;

/// Evaluates arithmetic expressions typed straight into the query box
pub struct CalculatorProvider;

impl CalculatorProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CalculatorProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for CalculatorProvider {
    fn id(&self) -> &str {
        "core:calculator"
    }

    fn name(&self) -> &str {
        "Calculator"
    }

    fn icon(&self) -> &str {
        "calculator"
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<ResultItem>> {
        Ok(match try_calculate(query) {
            Some(rendered) => vec![ResultItem::new("calc:result", &rendered, Category::Calc)
                .with_subtitle("Inline Calculator")
                .with_icon("calculator")
                .with_action_data(rendered)
                .with_score(1000)],
            None => Vec::new(),
        })
    }

    async fn action(&self, result: &ResultItem) -> anyhow::Result<()> {
        // clipboard integration is app-side; the engine only records the pick
        info!("calculator result selected: {}", result.action_data);
        Ok(())
    }
}

/// Evaluate a candidate expression, rendering `expr = value`.
/// Queries without an operator are not treated as expressions.
fn try_calculate(expr: &str) -> Option<String> {
    let cleaned: String = expr
        .chars()
        .filter(|c| !c.is_whitespace() || *c == ' ')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let has_operator = cleaned
        .chars()
        .any(|c| matches!(c, '+' | '-' | '*' | '/' | '^' | '%' | 'x'));
    if !has_operator {
        return None;
    }
    // 'x' doubles as a multiplication sign
    let normalized = cleaned.replace('x', "*");
    match evaluate(&normalized) {
        Some(value) if value.is_finite() => Some(format!("{} = {}", expr, value)),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug)]
enum Token {
    Number(f64),
    Operator(char),
    LeftParen,
    RightParen,
}

fn evaluate(expr: &str) -> Option<f64> {
    let tokens = tokenize(expr)?;
    let rpn = to_rpn(tokens)?;
    eval_rpn(rpn)
}

fn tokenize(expr: &str) -> Option<Vec<Token>> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let prev = tokens.last().copied();
        let unary_minus = c == '-'
            && matches!(
                prev,
                None | Some(Token::Operator(_)) | Some(Token::LeftParen)
            );
        let starts_number = c.is_ascii_digit() || c == '.';
        if starts_number || unary_minus {
            let start = i;
            i += usize::from(unary_minus);
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            tokens.push(Token::Number(literal.parse().ok()?));
            continue;
        }

        match c {
            '+' | '-' | '*' | '/' | '%' | '^' => tokens.push(Token::Operator(c)),
            '(' => tokens.push(Token::LeftParen),
            ')' => tokens.push(Token::RightParen),
            _ => return None,
        }
        i += 1;
    }

    if tokens.is_empty() {
        return None;
    }
    Some(tokens)
}

/// Shunting-yard: infix tokens to reverse Polish notation
fn to_rpn(tokens: Vec<Token>) -> Option<Vec<Token>> {
    let mut output = Vec::new();
    let mut ops: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::Operator(op) => {
                while let Some(Token::Operator(top)) = ops.last().copied() {
                    let pops = if is_left_assoc(op) {
                        precedence(op) <= precedence(top)
                    } else {
                        precedence(op) < precedence(top)
                    };
                    if !pops {
                        break;
                    }
                    output.push(ops.pop()?);
                }
                ops.push(token);
            }
            Token::LeftParen => ops.push(token),
            Token::RightParen => {
                loop {
                    match ops.pop()? {
                        Token::LeftParen => break,
                        op @ Token::Operator(_) => output.push(op),
                        _ => return None,
                    }
                }
            }
        }
    }

    while let Some(top) = ops.pop() {
        match top {
            Token::Operator(_) => output.push(top),
            _ => return None,
        }
    }
    Some(output)
}

fn eval_rpn(tokens: Vec<Token>) -> Option<f64> {
    let mut stack: Vec<f64> = Vec::new();
    for token in tokens {
        match token {
            Token::Number(v) => stack.push(v),
            Token::Operator(op) => {
                let right = stack.pop()?;
                let left = stack.pop()?;
                stack.push(apply(left, right, op)?);
            }
            _ => return None,
        }
    }
    if stack.len() == 1 {
        stack.pop()
    } else {
        None
    }
}

fn precedence(op: char) -> u8 {
    match op {
        '^' => 4,
        '*' | '/' | '%' => 3,
        '+' | '-' => 2,
        _ => 0,
    }
}

fn is_left_assoc(op: char) -> bool {
    op != '^'
}

fn apply(left: f64, right: f64, op: char) -> Option<f64> {
    match op {
        '+' => Some(left + right),
        '-' => Some(left - right),
        '*' => Some(left * right),
        '/' => Some(left / right),
        '%' => Some(left % right),
        '^' => Some(left.powf(right)),
        _ => None,
    }
}
