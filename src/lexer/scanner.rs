use super::token::Token;

/// Scanner for Robolang source text.
///
/// Tokens are separated by runs of ASCII whitespace (space, tab, line feed,
/// vertical tab, form feed, carriage return). Other characters, including
/// Unicode spaces such as U+00A0, are part of a token. The characters `{ } ( ) , ;`
/// additionally split on both sides, so they always stand alone even when
/// written flush against their neighbours (`move(3);` is five tokens).
pub struct Scanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of current token
    start: usize,
    /// Current position in source
    current: usize,
}

impl Scanner {
    /// Creates a new scanner from source code
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    /// Returns true for the characters that separate tokens
    pub fn is_separator(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
    }

    /// Returns true for the characters that always form their own token
    pub fn is_delimiter(c: char) -> bool {
        matches!(c, '{' | '}' | '(' | ')' | ',' | ';')
    }

    /// Scans all tokens from source code and returns them as a vector
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        std::mem::take(&mut self.tokens)
    }

    fn scan_token(&mut self) {
        let c = self.advance();

        if Self::is_separator(c) {
            return;
        }

        if Self::is_delimiter(c) {
            self.add_token();
            return;
        }

        while !self.is_at_end() {
            let next = self.peek();
            if Self::is_separator(next) || Self::is_delimiter(next) {
                break;
            }
            self.advance();
        }
        self.add_token();
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn add_token(&mut self) {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        self.tokens.push(Token::new(lexeme));
    }
}
