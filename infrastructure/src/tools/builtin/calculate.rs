//! calculate: arithmetic expression evaluator
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary (('^' | '**') unary)?
//! primary := number | constant | function '(' args ')' | '(' expr ')'
//! ```
//!
//! `^` is right-associative and binds tighter than unary minus, so `-2^2`
//! is `-4`. A `Math.` prefix on names is accepted and ignored.

use async_trait::async_trait;
use serde_json::json;
use toolloop_domain::{Tool, ToolArguments, ToolError, ToolParameter, ToolSpec};

pub const CALCULATE: &str = "calculate";

const EXPRESSION: &str = "expression";

/// Maximum parser recursion depth
const MAX_DEPTH: usize = 256;

/// The `calculate` tool
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculateTool;

#[async_trait]
impl Tool for CalculateTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            CALCULATE,
            "Evaluate a math expression, e.g. 2+3*4, sqrt(16) or pow(2, 10). Input: the expression.",
        )
        .with_parameter(
            ToolParameter::new(EXPRESSION, "Math expression to evaluate", true)
                .with_type("string"),
        )
    }

    async fn execute(&self, args: &ToolArguments) -> Result<String, ToolError> {
        let expression = args
            .require_primary(EXPRESSION)
            .map_err(ToolError::invalid_argument)?;
        let expression = strip_wrapping(expression);

        let value = evaluate(expression)
            .map_err(|e| ToolError::invalid_argument(format!("Calculation error: {}", e)))?;

        if args.is_text() {
            return Ok(format_number(value));
        }

        let result = if is_integral(value) {
            json!(value as i64)
        } else {
            json!(value)
        };
        Ok(json!({ "expression": expression, "result": result }).to_string())
    }
}

/// Models often quote the expression or wrap it in backticks.
fn strip_wrapping(input: &str) -> &str {
    let trimmed = input.trim();
    for quote in ['`', '"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    trimmed
}

fn is_integral(value: f64) -> bool {
    value.fract() == 0.0 && value.abs() < 1e15
}

/// `120.0` renders as `120`; everything else keeps its decimals.
pub fn format_number(value: f64) -> String {
    if is_integral(value) {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Evaluate an arithmetic expression.
pub fn evaluate(expression: &str) -> Result<f64, String> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err("empty expression".to_string());
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(format!("unexpected token '{}'", token));
    }
    if !value.is_finite() {
        return Err("result is not a finite number".to_string());
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(char),
    Pow,
    LParen,
    RParen,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Op(c) => write!(f, "{}", c),
            Token::Pow => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                // exponent: 1e3, 2.5E-2
                if i < chars.len() && matches!(chars[i], 'e' | 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && matches!(chars[j], '+' | '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        while j < chars.len() && chars[j].is_ascii_digit() {
                            j += 1;
                        }
                        i = j;
                    }
                }
                let text: String = chars[start..i].iter().collect();
                let number = text
                    .parse::<f64>()
                    .map_err(|_| format!("invalid number '{}'", text))?;
                tokens.push(Token::Number(number));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '.')
                {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let name = text.strip_prefix("Math.").unwrap_or(&text);
                tokens.push(Token::Ident(name.to_ascii_lowercase()));
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Pow);
                i += 2;
            }
            '^' => {
                tokens.push(Token::Pow);
                i += 1;
            }
            '+' | '-' | '*' | '/' | '%' => {
                tokens.push(Token::Op(c));
                i += 1;
            }
            '×' => {
                tokens.push(Token::Op('*'));
                i += 1;
            }
            '÷' => {
                tokens.push(Token::Op('/'));
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            other => return Err(format!("unexpected character '{}'", other)),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), String> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(format!("expected '{}', found '{}'", expected, token)),
            None => Err(format!("expected '{}' at end of expression", expected)),
        }
    }

    fn expr(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek().cloned() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.unary()?;
        while let Some(Token::Op(op @ ('*' | '/' | '%'))) = self.peek().cloned() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = match op {
                '*' => value * rhs,
                _ if rhs == 0.0 => return Err("division by zero".to_string()),
                '/' => value / rhs,
                _ => value % rhs,
            };
        }
        Ok(value)
    }

    // Every recursive path (parentheses, function arguments, signs and
    // exponents) passes through here.
    fn unary(&mut self) -> Result<f64, String> {
        if self.depth >= MAX_DEPTH {
            return Err("expression nested too deeply".to_string());
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some(Token::Op('-')) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Op('+')) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, String> {
        let base = self.primary()?;
        if self.peek() == Some(&Token::Pow) {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, String> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    self.pos += 1;
                    let args = self.arguments()?;
                    call_function(&name, &args)
                } else {
                    constant(&name)
                }
            }
            Some(token) => Err(format!("unexpected token '{}'", token)),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    /// Comma-separated arguments after an opening parenthesis.
    fn arguments(&mut self) -> Result<Vec<f64>, String> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            match self.next() {
                Some(Token::Comma) => continue,
                Some(Token::RParen) => return Ok(args),
                Some(token) => return Err(format!("expected ',' or ')', found '{}'", token)),
                None => return Err("unclosed function call".to_string()),
            }
        }
    }
}

fn constant(name: &str) -> Result<f64, String> {
    match name {
        "pi" => Ok(std::f64::consts::PI),
        "e" => Ok(std::f64::consts::E),
        other => Err(format!("unknown name '{}'", other)),
    }
}

fn call_function(name: &str, args: &[f64]) -> Result<f64, String> {
    let unary = |f: fn(f64) -> f64| match args {
        [x] => Ok(f(*x)),
        _ => Err(format!("{}() takes 1 argument, got {}", name, args.len())),
    };

    match name {
        "sqrt" => match args {
            [x] if *x < 0.0 => Err("sqrt() of a negative number".to_string()),
            _ => unary(f64::sqrt),
        },
        "sin" => unary(f64::sin),
        "cos" => unary(f64::cos),
        "tan" => unary(f64::tan),
        "abs" => unary(f64::abs),
        "ln" | "log" => unary(f64::ln),
        "log10" => unary(f64::log10),
        "exp" => unary(f64::exp),
        "floor" => unary(f64::floor),
        "ceil" => unary(f64::ceil),
        "round" => unary(f64::round),
        "pow" => match args {
            [base, exponent] => Ok(base.powf(*exponent)),
            _ => Err(format!("pow() takes 2 arguments, got {}", args.len())),
        },
        "max" | "min" if !args.is_empty() => {
            let pick = if name == "max" { f64::max } else { f64::min };
            Ok(args.iter().copied().fold(args[0], pick))
        }
        other => Err(format!("unknown function '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_precedence_and_parentheses() {
        assert_eq!(evaluate("(15 + 25) * 3").unwrap(), 120.0);
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluate("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(evaluate("17 % 5").unwrap(), 2.0);
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(evaluate("2 ^ 3 ^ 2").unwrap(), 512.0);
        assert_eq!(evaluate("2 ** 10").unwrap(), 1024.0);
        assert_eq!(evaluate("-2 ^ 2").unwrap(), -4.0);
    }

    #[test]
    fn test_functions_and_constants() {
        assert_eq!(evaluate("sqrt(16) + abs(-2)").unwrap(), 6.0);
        assert_eq!(evaluate("Math.pow(2, 10)").unwrap(), 1024.0);
        assert_eq!(evaluate("max(1, 7, 3)").unwrap(), 7.0);
        assert!((evaluate("cos(pi)").unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_errors() {
        assert_eq!(evaluate("1 / 0").unwrap_err(), "division by zero");
        assert_eq!(evaluate("").unwrap_err(), "empty expression");
        assert!(evaluate("(1 + 2").unwrap_err().contains("')'"));
        assert!(evaluate("2 $ 3").unwrap_err().contains("'$'"));
        assert!(evaluate("foo(1)").unwrap_err().contains("unknown function"));
        assert!(evaluate("sqrt(-1)").is_err());
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let nested = format!("{}1{}", "(".repeat(5_000), ")".repeat(5_000));
        assert_eq!(evaluate(&nested).unwrap_err(), "expression nested too deeply");

        let signs = format!("{}1", "-".repeat(5_000));
        assert!(evaluate(&signs).is_err());

        let calls = format!("{}1{}", "abs(".repeat(5_000), ")".repeat(5_000));
        assert!(evaluate(&calls).is_err());

        let moderate = format!("{}2{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(evaluate(&moderate).unwrap(), 2.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2.5), "2.5");
    }

    #[tokio::test]
    async fn test_text_input_returns_bare_number() {
        let out = CalculateTool
            .execute(&ToolArguments::text("(15+25)*3"))
            .await
            .unwrap();
        assert_eq!(out, "120");
    }

    #[tokio::test]
    async fn test_text_input_strips_quotes() {
        let out = CalculateTool
            .execute(&ToolArguments::text("`7 * 6`"))
            .await
            .unwrap();
        assert_eq!(out, "42");
    }

    #[tokio::test]
    async fn test_structured_input_returns_json() {
        let args = ToolArguments::Structured(json!({"expression": "1 / 4"}));
        let out = CalculateTool.execute(&args).await.unwrap();

        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["expression"], "1 / 4");
        assert_eq!(value["result"], 0.25);
    }

    #[tokio::test]
    async fn test_invalid_expression_is_tool_error() {
        let err = CalculateTool
            .execute(&ToolArguments::text("2 +"))
            .await
            .unwrap_err();
        assert_eq!(err.code, "INVALID_ARGUMENT");
        assert!(err.message.starts_with("Calculation error:"));
    }
}
