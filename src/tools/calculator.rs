//! Arithmetic expression tool
//!
//! Accepts `+ - * /`, parentheses, unary signs and decimal literals.

use super::ToolHandler;
use crate::error::AgentError;
use crate::Result;

pub struct CalculatorTool;

fn is_expression(input: &str) -> bool {
    input.chars().any(|c| c.is_ascii_digit())
        && input
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || "+-*/().".contains(c))
}

#[async_trait::async_trait]
impl ToolHandler for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn can_handle(&self, input: &str) -> bool {
        is_expression(input)
    }

    fn score(&self, input: &str) -> i32 {
        if is_expression(input) {
            10
        } else if input.to_lowercase().contains("calculate") {
            7
        } else {
            1
        }
    }

    async fn handle(&self, input: &str) -> Result<String> {
        let value = evaluate(input)?;
        Ok(format!("Result: {}", value))
    }
}

/// Evaluate an arithmetic expression with the usual precedence.
pub fn evaluate(expression: &str) -> Result<f64> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };

    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(AgentError::InvalidToolInput(format!(
            "Unexpected token at position {} in '{}'",
            parser.pos, expression
        )));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Op(char),
    Open,
    Close,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '+' | '-' | '*' | '/' => {
                tokens.push(Token::Op(c));
                i += 1;
            }
            '(' => {
                tokens.push(Token::Open);
                i += 1;
            }
            ')' => {
                tokens.push(Token::Close);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal.parse::<f64>().map_err(|_| {
                    AgentError::InvalidToolInput(format!("Invalid number '{}'", literal))
                })?;
                tokens.push(Token::Num(value));
            }
            other => {
                return Err(AgentError::InvalidToolInput(format!(
                    "Unexpected character '{}'",
                    other
                )))
            }
        }
    }

    Ok(tokens)
}

/// Deepest run of parentheses and unary signs the parser will follow.
const MAX_NESTING: usize = 256;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64> {
        let mut value = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64> {
        let mut value = self.factor()?;
        while let Some(Token::Op(op @ ('*' | '/'))) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op == '*' {
                value *= rhs;
            } else {
                if rhs == 0.0 {
                    return Err(AgentError::ToolError("Division by zero".to_string()));
                }
                value /= rhs;
            }
        }
        Ok(value)
    }

    // factor := ('+' | '-') factor | number | '(' expr ')'
    fn factor(&mut self) -> Result<f64> {
        if self.depth >= MAX_NESTING {
            return Err(AgentError::InvalidToolInput(
                "Expression nested too deeply".to_string(),
            ));
        }
        self.depth += 1;
        let value = self.primary();
        self.depth -= 1;
        value
    }

    fn primary(&mut self) -> Result<f64> {
        match self.next() {
            Some(Token::Op('-')) => Ok(-self.factor()?),
            Some(Token::Op('+')) => self.factor(),
            Some(Token::Num(n)) => Ok(n),
            Some(Token::Open) => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(AgentError::InvalidToolInput(
                        "Missing closing parenthesis".to_string(),
                    )),
                }
            }
            _ => Err(AgentError::InvalidToolInput(
                "Expected a number or '('".to_string(),
            )),
        }
    }
}
