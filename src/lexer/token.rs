use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::parser::{Action, ArithOp, Combinator, Relop, Sensor};

lazy_static! {
    static ref VARIABLE_PATTERN: Regex = Regex::new(r"^\$[A-Za-z][A-Za-z0-9]*$").unwrap();
    static ref NUMBER_PATTERN: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
}

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Lexical class of the token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
}

impl Token {
    /// Creates a token, classifying the lexeme
    pub fn new(lexeme: impl Into<String>) -> Self {
        let lexeme = lexeme.into();
        Token {
            kind: TokenKind::classify(&lexeme),
            lexeme,
        }
    }
}

/// All lexical classes a Robolang token can fall into.
///
/// Classification is by exact, case-sensitive match of the whole token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    // Keywords
    /// Action keyword (move, turnL, ...)
    Action(Action),
    /// Sensor keyword (fuelLeft, barrelLR, ...)
    Sensor(Sensor),
    /// Arithmetic operator keyword (add, sub, mul, div)
    Operator(ArithOp),
    /// Relational operator keyword (lt, gt, eq)
    Relop(Relop),
    /// Boolean combinator keyword (and, or, not)
    Combinator(Combinator),
    /// `loop`
    Loop,
    /// `if`
    If,
    /// `elif`
    Elif,
    /// `else`
    Else,
    /// `while`
    While,

    // Literals and names
    /// Variable name: `$` followed by a letter and letters or digits
    Variable,
    /// Optionally negative run of digits (range checked by the parser)
    Number,

    // Punctuation
    /// `=`
    Assign,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
    /// `;`
    Semicolon,

    /// Anything else
    Word,
}

impl TokenKind {
    /// Determine the lexical class of a raw lexeme
    pub fn classify(lexeme: &str) -> TokenKind {
        match lexeme {
            "loop" => return TokenKind::Loop,
            "if" => return TokenKind::If,
            "elif" => return TokenKind::Elif,
            "else" => return TokenKind::Else,
            "while" => return TokenKind::While,
            "=" => return TokenKind::Assign,
            "(" => return TokenKind::LeftParen,
            ")" => return TokenKind::RightParen,
            "{" => return TokenKind::LeftBrace,
            "}" => return TokenKind::RightBrace,
            "," => return TokenKind::Comma,
            ";" => return TokenKind::Semicolon,
            _ => {}
        }

        if let Ok(action) = Action::from_str(lexeme) {
            TokenKind::Action(action)
        } else if let Ok(sensor) = Sensor::from_str(lexeme) {
            TokenKind::Sensor(sensor)
        } else if let Ok(op) = ArithOp::from_str(lexeme) {
            TokenKind::Operator(op)
        } else if let Ok(relop) = Relop::from_str(lexeme) {
            TokenKind::Relop(relop)
        } else if let Ok(combinator) = Combinator::from_str(lexeme) {
            TokenKind::Combinator(combinator)
        } else if VARIABLE_PATTERN.is_match(lexeme) {
            TokenKind::Variable
        } else if NUMBER_PATTERN.is_match(lexeme) {
            TokenKind::Number
        } else {
            TokenKind::Word
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TokenKind::Action(action) => write!(f, "{}", action),
            TokenKind::Sensor(sensor) => write!(f, "{}", sensor),
            TokenKind::Operator(op) => write!(f, "{}", op),
            TokenKind::Relop(relop) => write!(f, "{}", relop),
            TokenKind::Combinator(combinator) => write!(f, "{}", combinator),
            _ => write!(f, "{:?}", self),
        }
    }
}
