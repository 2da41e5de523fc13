//! Lexer (tokenizer) for model source text
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Keywords are matched case-insensitively, and both the Dutch
//! spellings (`en`, `of`, `niet`, `waar`, `onwaar`) and the operator-token
//! spellings (`AND`, `OR`, `NOT`, `true`, `false`) are accepted.

use super::ast::SourceLocation;
use std::fmt;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Number(f64, SourceLocation),
    True(SourceLocation),
    False(SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Keywords
    Als(SourceLocation),     // als (if)
    Dan(SourceLocation),     // dan (then)
    EindAls(SourceLocation), // eindals (end of conditional block)
    Stop(SourceLocation),

    // Logical operators
    And(SourceLocation),
    Or(SourceLocation),
    Not(SourceLocation),

    // Arithmetic
    Plus(SourceLocation),  // +
    Minus(SourceLocation), // -
    Star(SourceLocation),  // *
    Slash(SourceLocation), // /
    Caret(SourceLocation), // ^

    // Comparison
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    // Assignment
    Eq(SourceLocation), // =

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    Semicolon(SourceLocation), // ;

    // Statement separator
    Newline(SourceLocation),

    // End of input
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Number(_, loc)
            | Token::Ident(_, loc)
            | Token::True(loc)
            | Token::False(loc)
            | Token::Als(loc)
            | Token::Dan(loc)
            | Token::EindAls(loc)
            | Token::Stop(loc)
            | Token::And(loc)
            | Token::Or(loc)
            | Token::Not(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Caret(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::Eq(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::Semicolon(loc)
            | Token::Newline(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n, _) => write!(f, "number {}", n),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::True(_) => write!(f, "'waar'"),
            Token::False(_) => write!(f, "'onwaar'"),
            Token::Als(_) => write!(f, "'als'"),
            Token::Dan(_) => write!(f, "'dan'"),
            Token::EindAls(_) => write!(f, "'eindals'"),
            Token::Stop(_) => write!(f, "'stop'"),
            Token::And(_) => write!(f, "'en'"),
            Token::Or(_) => write!(f, "'of'"),
            Token::Not(_) => write!(f, "'niet'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::Caret(_) => write!(f, "'^'"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::Eq(_) => write!(f, "'='"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Newline(_) => write!(f, "end of line"),
            Token::Eof(_) => write!(f, "end of input"),
        }
    }
}

/// Error produced while tokenizing
#[derive(Debug, Clone)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lex error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Tokenizer over a model source string
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            input: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            let loc = self.current_location();
            let ch = match self.peek() {
                Some(c) => c,
                None => break,
            };

            match ch {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' => {
                    self.advance();
                    // Collapse runs of blank lines into a single separator
                    if !matches!(tokens.last(), Some(Token::Newline(_)) | None) {
                        tokens.push(Token::Newline(loc));
                    }
                }
                '/' => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else {
                        self.advance();
                        tokens.push(Token::Slash(loc));
                    }
                }
                '+' => {
                    self.advance();
                    tokens.push(Token::Plus(loc));
                }
                '-' => {
                    self.advance();
                    tokens.push(Token::Minus(loc));
                }
                '*' => {
                    self.advance();
                    tokens.push(Token::Star(loc));
                }
                '^' => {
                    self.advance();
                    tokens.push(Token::Caret(loc));
                }
                '(' => {
                    self.advance();
                    tokens.push(Token::LParen(loc));
                }
                ')' => {
                    self.advance();
                    tokens.push(Token::RParen(loc));
                }
                ';' => {
                    self.advance();
                    tokens.push(Token::Semicolon(loc));
                }
                '=' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        tokens.push(Token::EqEq(loc));
                    } else {
                        tokens.push(Token::Eq(loc));
                    }
                }
                '!' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        tokens.push(Token::NotEq(loc));
                    } else {
                        return Err(LexError {
                            message: "Unexpected character '!' (did you mean '!=' or 'niet'?)"
                                .to_string(),
                            location: loc,
                        });
                    }
                }
                '<' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        tokens.push(Token::Le(loc));
                    } else {
                        tokens.push(Token::Lt(loc));
                    }
                }
                '>' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        tokens.push(Token::Ge(loc));
                    } else {
                        tokens.push(Token::Gt(loc));
                    }
                }
                c if c.is_ascii_digit() || (c == '.' && self.next_is_digit()) => {
                    tokens.push(self.lex_number(loc)?);
                }
                c if c.is_alphabetic() || c == '_' => {
                    tokens.push(self.lex_word(loc));
                }
                c => {
                    return Err(LexError {
                        message: format!("Unexpected character '{}'", c),
                        location: loc,
                    });
                }
            }
        }

        tokens.push(Token::Eof(self.current_location()));
        Ok(tokens)
    }

    /// Lex a numeric literal (IEEE-754 double, optional fraction and exponent)
    fn lex_number(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::new();

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                text.push(c);
                self.advance();
            } else if c == 'e' || c == 'E' {
                // Exponent only counts if followed by a digit or signed digit
                let next = self.peek_ahead(1);
                let after_sign = self.peek_ahead(2);
                let has_exponent = match next {
                    Some(d) if d.is_ascii_digit() => true,
                    Some('+') | Some('-') => after_sign.is_some_and(|d| d.is_ascii_digit()),
                    _ => false,
                };
                if !has_exponent {
                    break;
                }
                text.push(c);
                self.advance();
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    text.push(sign);
                    self.advance();
                }
            } else {
                break;
            }
        }

        text.parse::<f64>().map(|n| Token::Number(n, loc)).map_err(|_| LexError {
            message: format!("Invalid number literal '{}'", text),
            location: loc,
        })
    }

    /// Lex an identifier or keyword
    fn lex_word(&mut self, loc: SourceLocation) -> Token {
        let mut word = String::new();

        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
                self.advance();
            } else {
                break;
            }
        }

        match word.to_ascii_lowercase().as_str() {
            "als" => Token::Als(loc),
            "dan" => Token::Dan(loc),
            "eindals" => Token::EindAls(loc),
            "stop" => Token::Stop(loc),
            "en" | "and" => Token::And(loc),
            "of" | "or" => Token::Or(loc),
            "niet" | "not" => Token::Not(loc),
            "waar" | "true" => Token::True(loc),
            "onwaar" | "false" => Token::False(loc),
            _ => Token::Ident(word, loc),
        }
    }

    /// Skip a `//` comment up to (not including) the newline
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn next_is_digit(&self) -> bool {
        self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit())
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        if self.position < self.input.len() {
            Some(self.input[self.position])
        } else {
            None
        }
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        let pos = self.position + n;
        if pos < self.input.len() {
            Some(self.input[pos])
        } else {
            None
        }
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        if self.position >= self.input.len() {
            return None;
        }

        let ch = self.input[self.position];
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("s = s + v * dt");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "s"));
        assert!(matches!(tokens[1], Token::Eq(_)));
        assert!(matches!(tokens[2], Token::Ident(ref s, _) if s == "s"));
        assert!(matches!(tokens[3], Token::Plus(_)));
        assert!(matches!(tokens[4], Token::Ident(ref s, _) if s == "v"));
        assert!(matches!(tokens[5], Token::Star(_)));
        assert!(matches!(tokens[6], Token::Ident(ref s, _) if s == "dt"));
        assert!(matches!(tokens[7], Token::Eof(_)));
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let mut lexer = Lexer::new("ALS x > 1 DAN\nStop\nEindAls");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Als(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[2], Token::Gt(_)));
        assert!(matches!(tokens[3], Token::Number(n, _) if n == 1.0));
        assert!(matches!(tokens[4], Token::Dan(_)));
        assert!(matches!(tokens[5], Token::Newline(_)));
        assert!(matches!(tokens[6], Token::Stop(_)));
        assert!(matches!(tokens[7], Token::Newline(_)));
        assert!(matches!(tokens[8], Token::EindAls(_)));
    }

    #[test]
    fn test_numbers() {
        let mut lexer = Lexer::new("9.81 1e6 2.5e-3 .5");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Number(n, _) if n == 9.81));
        assert!(matches!(tokens[1], Token::Number(n, _) if n == 1e6));
        assert!(matches!(tokens[2], Token::Number(n, _) if n == 2.5e-3));
        assert!(matches!(tokens[3], Token::Number(n, _) if n == 0.5));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let mut lexer = Lexer::new("a = 1 // startwaarde\n\n\nb = 2\n");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "a"));
        assert!(matches!(tokens[1], Token::Eq(_)));
        assert!(matches!(tokens[2], Token::Number(n, _) if n == 1.0));
        // Comment is skipped and the blank-line run collapses to one separator
        assert!(matches!(tokens[3], Token::Newline(_)));
        assert!(matches!(tokens[4], Token::Ident(ref s, _) if s == "b"));
    }

    #[test]
    fn test_comparison_operators() {
        let mut lexer = Lexer::new("== != <= >= < >");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::EqEq(_)));
        assert!(matches!(tokens[1], Token::NotEq(_)));
        assert!(matches!(tokens[2], Token::Le(_)));
        assert!(matches!(tokens[3], Token::Ge(_)));
        assert!(matches!(tokens[4], Token::Lt(_)));
        assert!(matches!(tokens[5], Token::Gt(_)));
    }

    #[test]
    fn test_bare_bang_rejected() {
        let mut lexer = Lexer::new("a = !b");
        assert!(lexer.tokenize().is_err());
    }
}
