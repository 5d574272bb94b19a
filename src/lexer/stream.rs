use super::token::{Token, TokenKind};

/// Cursor over a scanned token list.
///
/// Only ever moves forward; every token is handed out at most once.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    current: usize,
}

impl TokenStream {
    /// Wraps scanned tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens, current: 0 }
    }

    /// Returns true while unconsumed tokens remain
    pub fn has_more(&self) -> bool {
        self.current < self.tokens.len()
    }

    /// Next token, without consuming it
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    /// Lexical class of the next token
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Checks whether the next token satisfies `pred`, without consuming it
    pub fn check(&self, pred: impl Fn(&TokenKind) -> bool) -> bool {
        self.peek().is_some_and(|t| pred(&t.kind))
    }

    /// Checks whether the next token has exactly the given kind
    pub fn check_kind(&self, kind: TokenKind) -> bool {
        self.check(|k| *k == kind)
    }

    /// Consumes and returns the next token
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    /// Lexemes of up to `n` tokens from the cursor on, without consuming them
    pub fn upcoming(&self, n: usize) -> Vec<String> {
        self.tokens[self.current..]
            .iter()
            .take(n)
            .map(|t| t.lexeme.clone())
            .collect()
    }
}
