//! Recursive-descent parser for the modeling language
//!
//! Consumes the [`Token`](super::lexer::Token) stream and produces the
//! [`Statement`] sequence the code generator compiles. The grammar has no
//! statement nesting other than `als … dan … eindals` blocks, and statements
//! are separated by line breaks or `;`.

use super::ast::{BinOp, Expr, LogicOp, SourceLocation, Statement, UnOp};
use super::lexer::{LexError, Lexer, Token};
use std::fmt;

/// Error produced for malformed model source
#[derive(Debug, Clone)]
pub struct SyntaxError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for SyntaxError {}

impl From<LexError> for SyntaxError {
    fn from(e: LexError) -> Self {
        SyntaxError {
            message: e.message,
            location: e.location,
        }
    }
}

/// Parse a complete model program into a statement sequence.
///
/// This is the whole external contract of the parser: source text in,
/// `Vec<Statement>` out, [`SyntaxError`] on malformed input.
pub fn parse(source: &str) -> Result<Vec<Statement>, SyntaxError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse_program()
}

/// Token-stream parser
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // The parser relies on a trailing Eof sentinel
        if !matches!(tokens.last(), Some(Token::Eof(_))) {
            tokens.push(Token::Eof(SourceLocation::new(1, 1)));
        }
        Parser {
            tokens,
            position: 0,
        }
    }

    /// Parse statements until end of input
    pub fn parse_program(&mut self) -> Result<Vec<Statement>, SyntaxError> {
        let mut statements = Vec::new();

        self.skip_separators();
        while !matches!(self.peek(), Token::Eof(_)) {
            statements.push(self.parse_statement()?);
            self.expect_separator()?;
            self.skip_separators();
        }

        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement, SyntaxError> {
        match self.peek().clone() {
            Token::Stop(location) => {
                self.advance();
                Ok(Statement::Stop { location })
            }
            Token::Als(location) => self.parse_conditional(location),
            Token::Ident(name, location) => {
                self.advance();
                match self.peek() {
                    Token::Eq(_) => {
                        self.advance();
                    }
                    other => {
                        return Err(SyntaxError {
                            message: format!("Expected '=' after '{}', found {}", name, other),
                            location: other.location(),
                        });
                    }
                }
                let value = self.parse_expr()?;
                Ok(Statement::Assignment {
                    target: name,
                    value,
                    location,
                })
            }
            other => Err(SyntaxError {
                message: format!("Expected a statement, found {}", other),
                location: other.location(),
            }),
        }
    }

    /// `als <expr> dan <statements> eindals`
    fn parse_conditional(&mut self, location: SourceLocation) -> Result<Statement, SyntaxError> {
        self.advance(); // als

        let condition = self.parse_expr()?;

        match self.peek() {
            Token::Dan(_) => {
                self.advance();
            }
            other => {
                return Err(SyntaxError {
                    message: format!("Expected 'dan' after condition, found {}", other),
                    location: other.location(),
                });
            }
        }

        let mut body = Vec::new();
        self.skip_separators();
        loop {
            match self.peek() {
                Token::EindAls(_) => {
                    self.advance();
                    break;
                }
                Token::Eof(loc) => {
                    return Err(SyntaxError {
                        message: "Unterminated 'als' block: missing 'eindals'".to_string(),
                        location: *loc,
                    });
                }
                _ => {
                    body.push(self.parse_statement()?);
                    self.expect_separator()?;
                    self.skip_separators();
                }
            }
        }

        Ok(Statement::If {
            condition,
            body,
            location,
        })
    }

    // ========== Expression precedence ladder ==========

    fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_and()?;
        while matches!(self.peek(), Token::Or(_)) {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Logical {
                op: LogicOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_not()?;
        while matches!(self.peek(), Token::And(_)) {
            self.advance();
            let right = self.parse_not()?;
            left = Expr::Logical {
                op: LogicOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, SyntaxError> {
        if matches!(self.peek(), Token::Not(_)) {
            self.advance();
            let operand = self.parse_not()?;
            return Ok(Expr::Unary {
                op: UnOp::Not,
                operand: Box::new(operand),
            });
        }
        self.parse_comparison()
    }

    /// A single, non-associative comparison
    fn parse_comparison(&mut self) -> Result<Expr, SyntaxError> {
        let left = self.parse_additive()?;

        let op = match self.peek() {
            Token::EqEq(_) => LogicOp::Eq,
            Token::NotEq(_) => LogicOp::Ne,
            Token::Lt(_) => LogicOp::Lt,
            Token::Le(_) => LogicOp::Le,
            Token::Gt(_) => LogicOp::Gt,
            Token::Ge(_) => LogicOp::Ge,
            _ => return Ok(left),
        };
        self.advance();

        let right = self.parse_additive()?;
        Ok(Expr::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Token::Plus(_) => BinOp::Add,
                Token::Minus(_) => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Token::Star(_) => BinOp::Mul,
                Token::Slash(_) => BinOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        if matches!(self.peek(), Token::Minus(_)) {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnOp::Neg,
                operand: Box::new(operand),
            });
        }
        self.parse_power()
    }

    /// `^` is right-associative and binds tighter than unary minus,
    /// so `-2^2` is `-(2^2)` and `2^-3` takes a negative exponent.
    fn parse_power(&mut self) -> Result<Expr, SyntaxError> {
        let base = self.parse_primary()?;
        if matches!(self.peek(), Token::Caret(_)) {
            self.advance();
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary {
                op: BinOp::Pow,
                left: Box::new(base),
                right: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        match self.peek().clone() {
            Token::Number(n, _) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            Token::True(_) => {
                self.advance();
                Ok(Expr::Bool(true))
            }
            Token::False(_) => {
                self.advance();
                Ok(Expr::Bool(false))
            }
            Token::Ident(name, location) => {
                self.advance();
                Ok(Expr::Variable { name, location })
            }
            Token::LParen(_) => {
                self.advance();
                let inner = self.parse_expr()?;
                match self.peek() {
                    Token::RParen(_) => {
                        self.advance();
                        Ok(inner)
                    }
                    other => Err(SyntaxError {
                        message: format!("Expected ')', found {}", other),
                        location: other.location(),
                    }),
                }
            }
            other => Err(SyntaxError {
                message: format!("Expected an expression, found {}", other),
                location: other.location(),
            }),
        }
    }

    // ========== Token helpers ==========

    /// A statement must be followed by a line break, `;`, `eindals` or EOF
    fn expect_separator(&mut self) -> Result<(), SyntaxError> {
        match self.peek() {
            Token::Newline(_) | Token::Semicolon(_) => {
                self.advance();
                Ok(())
            }
            Token::Eof(_) | Token::EindAls(_) => Ok(()),
            other => Err(SyntaxError {
                message: format!("Expected end of statement, found {}", other),
                location: other.location(),
            }),
        }
    }

    fn skip_separators(&mut self) {
        while matches!(self.peek(), Token::Newline(_) | Token::Semicolon(_)) {
            self.advance();
        }
    }

    fn peek(&self) -> &Token {
        // Constructor guarantees a trailing Eof sentinel
        self.tokens
            .get(self.position)
            .unwrap_or(&self.tokens[self.tokens.len() - 1])
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment() {
        let program = parse("s = s + v * dt").unwrap();
        assert_eq!(program.len(), 1);
        match &program[0] {
            Statement::Assignment { target, value, .. } => {
                assert_eq!(target, "s");
                assert!(matches!(value, Expr::Binary { op: BinOp::Add, .. }));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence() {
        let program = parse("x = 1 + 2 * 3").unwrap();
        match &program[0] {
            Statement::Assignment { value, .. } => match value {
                Expr::Binary { op: BinOp::Add, right, .. } => {
                    assert!(matches!(**right, Expr::Binary { op: BinOp::Mul, .. }));
                }
                other => panic!("Expected addition at the top, got {:?}", other),
            },
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_power_right_associative() {
        let program = parse("x = 2 ^ 3 ^ 2").unwrap();
        match &program[0] {
            Statement::Assignment { value, .. } => match value {
                Expr::Binary { op: BinOp::Pow, right, .. } => {
                    assert!(matches!(**right, Expr::Binary { op: BinOp::Pow, .. }));
                }
                other => panic!("Expected power at the top, got {:?}", other),
            },
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_conditional_block() {
        let source = "als s > 100 dan\n    stop\neindals";
        let program = parse(source).unwrap();
        assert_eq!(program.len(), 1);
        match &program[0] {
            Statement::If { condition, body, .. } => {
                assert!(matches!(condition, Expr::Logical { op: LogicOp::Gt, .. }));
                assert_eq!(body.len(), 1);
                assert!(matches!(body[0], Statement::Stop { .. }));
            }
            other => panic!("Expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn test_inline_conditional() {
        let program = parse("als klaar dan stop eindals").unwrap();
        assert!(matches!(&program[0], Statement::If { body, .. } if body.len() == 1));
    }

    #[test]
    fn test_missing_eindals() {
        assert!(parse("als x > 1 dan\nstop\n").is_err());
    }

    #[test]
    fn test_two_statements_one_line_rejected() {
        assert!(parse("a = 1 b = 2").is_err());
    }

    #[test]
    fn test_semicolon_separator() {
        let program = parse("a = 1; b = 2").unwrap();
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_logical_and_not() {
        let program = parse("x = niet klaar en v > 0").unwrap();
        match &program[0] {
            Statement::Assignment { value, .. } => {
                assert!(matches!(value, Expr::Logical { op: LogicOp::And, .. }));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }
}
