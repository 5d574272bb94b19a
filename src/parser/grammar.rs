use super::ast::{
    Block, Combinator, Condition, ElifBranch, Expression, IfStatement, Program, Statement,
};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind, TokenStream};

/// Number of upcoming tokens quoted in a parse failure
const CONTEXT_TOKENS: usize = 5;

/// Deepest allowed nesting of blocks, conditions and expressions combined.
///
/// Parsing, rendering and evaluation all recurse once per level, so the limit
/// keeps hostile input from exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Recursive-descent parser for Robolang.
///
/// One method per grammar production. Each production consumes exactly the
/// tokens its rule names, punctuation included, and the first mismatch is
/// returned as [`Error::ParseError`] all the way to the caller.
pub struct Parser {
    tokens: TokenStream,
    /// Blocks, conditions and expressions currently open
    depth: usize,
}

impl Parser {
    /// Creates a new parser over scanned tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: TokenStream::new(tokens),
            depth: 0,
        }
    }

    /// PROGRAM ::= STATEMENT+
    pub fn parse(&mut self) -> Result<Program> {
        let mut statements = vec![self.parse_statement()?];

        while self.tokens.has_more() {
            statements.push(self.parse_statement()?);
        }

        tracing::debug!(statements = statements.len(), "parsed program");
        Ok(Program { statements })
    }

    /// Parses a standalone expression that must span the whole input
    pub fn parse_standalone_expression(&mut self) -> Result<Expression> {
        let expr = self.parse_expression()?;
        if self.tokens.has_more() {
            return Err(self.fail("Unexpected tokens after expression"));
        }
        Ok(expr)
    }

    /// Parses a standalone condition that must span the whole input
    pub fn parse_standalone_condition(&mut self) -> Result<Condition> {
        let cond = self.parse_condition()?;
        if self.tokens.has_more() {
            return Err(self.fail("Unexpected tokens after condition"));
        }
        Ok(cond)
    }

    /// STATEMENT ::= ACTION ';' | LOOP | IF | WHILE | ASSIGNMENT
    fn parse_statement(&mut self) -> Result<Statement> {
        match self.tokens.peek_kind() {
            Some(TokenKind::Action(_)) => self.parse_action(),
            Some(TokenKind::Loop) => self.parse_loop(),
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::While) => self.parse_while(),
            Some(TokenKind::Variable) => self.parse_assignment(),
            _ => Err(self.fail("Not a valid statement")),
        }
    }

    /// ACTION ::= actKeyword [ '(' EXPR ')' ] ';'
    fn parse_action(&mut self) -> Result<Statement> {
        let action = match self.tokens.peek_kind() {
            Some(TokenKind::Action(action)) => action,
            _ => return Err(self.fail("Not a valid action")),
        };
        self.tokens.advance();

        let count = if action.takes_count() && self.tokens.check_kind(TokenKind::LeftParen) {
            self.require(TokenKind::LeftParen, "Missing ( in action")?;
            let count = self.parse_expression()?;
            self.require(TokenKind::RightParen, "Missing ) in action")?;
            Some(count)
        } else {
            None
        };

        self.require(TokenKind::Semicolon, "Missing semicolon")?;
        Ok(Statement::Action { action, count })
    }

    /// LOOP ::= 'loop' BLOCK
    fn parse_loop(&mut self) -> Result<Statement> {
        self.require(TokenKind::Loop, "not a valid loop")?;
        let body = self.parse_block()?;
        Ok(Statement::Loop { body })
    }

    /// IF ::= 'if' '(' COND ')' BLOCK ( 'elif' '(' COND ')' BLOCK )* ( 'else' BLOCK )?
    fn parse_if(&mut self) -> Result<Statement> {
        self.require(TokenKind::If, "Missing if keyword")?;
        self.require(TokenKind::LeftParen, "Missing ( in if statement")?;
        let condition = self.parse_condition()?;
        self.require(TokenKind::RightParen, "Missing ) in if statement")?;
        let then_block = self.parse_block()?;

        let mut elifs = Vec::new();
        while self.tokens.check_kind(TokenKind::Elif) {
            elifs.push(self.parse_elif()?);
        }

        let else_block = if self.tokens.check_kind(TokenKind::Else) {
            self.require(TokenKind::Else, "Missing else keyword")?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Statement::If(IfStatement {
            condition,
            then_block,
            elifs,
            else_block,
        }))
    }

    fn parse_elif(&mut self) -> Result<ElifBranch> {
        self.require(TokenKind::Elif, "Missing elif keyword")?;
        self.require(TokenKind::LeftParen, "Missing ( in elif statement")?;
        let condition = self.parse_condition()?;
        self.require(TokenKind::RightParen, "Missing ) in elif statement")?;
        let block = self.parse_block()?;
        Ok(ElifBranch { condition, block })
    }

    /// WHILE ::= 'while' '(' COND ')' BLOCK
    fn parse_while(&mut self) -> Result<Statement> {
        self.require(TokenKind::While, "Missing while keyword")?;
        self.require(TokenKind::LeftParen, "Missing ( in while statement")?;
        let condition = self.parse_condition()?;
        self.require(TokenKind::RightParen, "Missing ) in while statement")?;
        let body = self.parse_block()?;
        Ok(Statement::While { condition, body })
    }

    /// ASSIGNMENT ::= VAR '=' EXPR ';'
    fn parse_assignment(&mut self) -> Result<Statement> {
        let name = self.parse_variable()?;
        self.require(TokenKind::Assign, "Missing = in assignment")?;
        let value = self.parse_expression()?;
        self.require(TokenKind::Semicolon, "Missing ; in assignment")?;
        Ok(Statement::Assignment { name, value })
    }

    /// BLOCK ::= '{' STATEMENT+ '}'
    fn parse_block(&mut self) -> Result<Block> {
        self.nested(Self::block_body)
    }

    fn block_body(&mut self) -> Result<Block> {
        self.require(TokenKind::LeftBrace, "Missing { for block")?;

        let mut statements = vec![self.parse_statement()?];
        while !self.tokens.check_kind(TokenKind::RightBrace) {
            statements.push(self.parse_statement()?);
        }

        self.require(TokenKind::RightBrace, "Missing } for block")?;
        Ok(Block { statements })
    }

    /// COND ::= relop '(' EXPR ',' EXPR ')'
    ///        | ('and'|'or') '(' COND ',' COND ')'
    ///        | 'not' '(' COND ')'
    fn parse_condition(&mut self) -> Result<Condition> {
        self.nested(Self::condition_body)
    }

    fn condition_body(&mut self) -> Result<Condition> {
        let cond = match self.tokens.peek_kind() {
            Some(TokenKind::Relop(relop)) => {
                self.tokens.advance();
                self.require(TokenKind::LeftParen, "Missing ( in relop condition")?;
                let left = self.parse_expression()?;
                self.require(TokenKind::Comma, "Missing a comma in relop condition")?;
                let right = self.parse_expression()?;
                Condition::compare(relop, left, right)
            }
            Some(TokenKind::Combinator(Combinator::Not)) => {
                self.tokens.advance();
                self.require(TokenKind::LeftParen, "Missing ( in not condition")?;
                Condition::not(self.parse_condition()?)
            }
            Some(TokenKind::Combinator(combinator)) => {
                self.tokens.advance();
                let name = combinator.keyword();
                self.require(
                    TokenKind::LeftParen,
                    &format!("Missing ( in {} condition", name),
                )?;
                let left = self.parse_condition()?;
                self.require(
                    TokenKind::Comma,
                    &format!("Missing a comma in {} condition", name),
                )?;
                let right = self.parse_condition()?;
                if combinator == Combinator::And {
                    Condition::and(left, right)
                } else {
                    Condition::or(left, right)
                }
            }
            _ => return Err(self.fail("Not a valid conditional")),
        };

        self.require(TokenKind::RightParen, "Missing ) in condition")?;
        Ok(cond)
    }

    /// EXPR ::= SENSOR | NUMBER | VAR | op '(' EXPR ',' EXPR ')'
    fn parse_expression(&mut self) -> Result<Expression> {
        self.nested(Self::expression_body)
    }

    fn expression_body(&mut self) -> Result<Expression> {
        match self.tokens.peek_kind() {
            Some(TokenKind::Sensor(_)) => self.parse_sensor(),
            Some(TokenKind::Number) => self.parse_number(),
            Some(TokenKind::Variable) => Ok(Expression::Variable(self.parse_variable()?)),
            Some(TokenKind::Operator(op)) => {
                self.tokens.advance();
                self.require(TokenKind::LeftParen, "Missing ( in expression")?;
                let left = self.parse_expression()?;
                self.require(TokenKind::Comma, "Missing comma in expression")?;
                let right = self.parse_expression()?;
                self.require(TokenKind::RightParen, "Missing ) in expression")?;
                Ok(Expression::binary(op, left, right))
            }
            _ => Err(self.fail("not a valid expression")),
        }
    }

    /// SENSOR ::= sensorKeyword [ '(' EXPR ')' ]
    fn parse_sensor(&mut self) -> Result<Expression> {
        let sensor = match self.tokens.peek_kind() {
            Some(TokenKind::Sensor(sensor)) => sensor,
            _ => return Err(self.fail("Not a valid sensor")),
        };
        self.tokens.advance();

        let rank = if sensor.takes_rank() && self.tokens.check_kind(TokenKind::LeftParen) {
            self.require(TokenKind::LeftParen, "Missing ( in sensor")?;
            let rank = self.parse_expression()?;
            self.require(TokenKind::RightParen, "Missing ) in sensor")?;
            Some(rank)
        } else {
            None
        };

        Ok(Expression::sensor(sensor, rank))
    }

    /// NUMBER ::= '-'? digit+, within the 32-bit range
    fn parse_number(&mut self) -> Result<Expression> {
        let value = match self.tokens.peek() {
            Some(token) if token.kind == TokenKind::Number => token.lexeme.parse::<i32>().ok(),
            _ => None,
        };

        match value {
            Some(n) => {
                self.tokens.advance();
                Ok(Expression::Number(n))
            }
            None => Err(self.fail("not a valid integer")),
        }
    }

    /// VAR ::= '$' letter (letter|digit)*
    fn parse_variable(&mut self) -> Result<String> {
        let token = self.require(TokenKind::Variable, "Not a valid variable name")?;
        Ok(token.lexeme)
    }

    /// Consumes the next token if it has the given kind, fails otherwise
    fn require(&mut self, kind: TokenKind, message: &str) -> Result<Token> {
        if self.tokens.check_kind(kind) {
            if let Some(token) = self.tokens.advance() {
                return Ok(token);
            }
        }
        Err(self.fail(message))
    }

    /// Runs `production` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`]
    fn nested<T>(&mut self, production: fn(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.fail("Nesting too deep"));
        }
        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    fn fail(&self, message: &str) -> Error {
        Error::parse(message, self.tokens.upcoming(CONTEXT_TOKENS))
    }
}
