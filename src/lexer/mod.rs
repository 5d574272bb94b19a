//! Lexical analysis for Robolang
//!
//! Splits source text into whitespace- and punctuation-delimited tokens.

mod scanner;
mod stream;
mod token;

pub use scanner::Scanner;
pub use stream::TokenStream;
pub use token::{Token, TokenKind};
