//! # Robolang - A Small Language for Scripting Robots
//!
//! Parser and tree-walking interpreter for a tiny imperative language that
//! drives a robot in a simulated arena. Programs issue actions (`move`,
//! `turnL`, `shieldOn`, ...), read integer sensors (`fuelLeft`,
//! `barrelLR(1)`, ...), compute with integer variables and branch or loop on
//! boolean conditions.
//!
//! ## Quick Start
//!
//! ```rust
//! use robolang::{parse, Evaluator, Robot};
//!
//! #[derive(Default)]
//! struct Rover {
//!     steps: u32,
//! }
//!
//! impl Robot for Rover {
//!     fn move_step(&mut self) { self.steps += 1; }
//!     fn turn_left(&mut self) {}
//!     fn turn_right(&mut self) {}
//!     fn take_fuel(&mut self) {}
//!     fn idle_wait(&mut self) {}
//!     fn turn_around(&mut self) {}
//!     fn set_shield(&mut self, _on: bool) {}
//!     fn opponent_fb(&mut self) -> i32 { 0 }
//!     fn opponent_lr(&mut self) -> i32 { 0 }
//!     fn barrel_fb(&mut self, _rank: i32) -> i32 { 0 }
//!     fn barrel_lr(&mut self, _rank: i32) -> i32 { 0 }
//!     fn fuel(&mut self) -> i32 { 100 }
//!     fn distance_to_wall(&mut self) -> i32 { 10 }
//!     fn num_barrels(&mut self) -> i32 { 0 }
//! }
//!
//! # fn main() -> robolang::Result<()> {
//! let program = parse("$n = 3; while (gt($n, 0)) { move(2); $n = sub($n, 1); }")?;
//!
//! let mut rover = Rover::default();
//! let mut evaluator = Evaluator::new();
//! evaluator.execute(&program, &mut rover)?;
//!
//! assert_eq!(rover.steps, 6);
//! assert_eq!(evaluator.environment().get("$n"), Some(0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - **Actions**: `move`, `turnL`, `turnR`, `takeFuel`, `wait`, `turnAround`,
//!   `shieldOn`, `shieldOff`, each ending in `;`. `move(n)` and `wait(n)` repeat.
//! - **Sensors**: `fuelLeft`, `oppLR`, `oppFB`, `numBarrels`, `wallDist`,
//!   `barrelLR`, `barrelFB` (the last two take an optional rank: `barrelLR(1)`).
//! - **Expressions**: numbers, sensors, `$variables`, `add/sub/mul/div(a, b)`.
//! - **Conditions**: `lt/gt/eq(a, b)`, `and/or(c1, c2)`, `not(c)`.
//! - **Control flow**: `loop { }`, `while (c) { }`,
//!   `if (c) { } elif (c) { } else { }`. The `else` block only runs when the
//!   statement has no `elif` branches.
//! - **Assignment**: `$x = expr;` (spaces around `=` are required).
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → AST → Evaluator ⇄ Robot
//! ```
//!
//! - [`Scanner`] - Splits source text into tokens
//! - [`Parser`] - Parses tokens into a [`Program`]
//! - [`Evaluator`] - Executes programs against a [`Robot`]
//! - [`Environment`] - Variable storage for one execution
//! - [`StopSignal`] - Stops a running program from another thread
//!
//! ## Error Handling
//!
//! ```rust
//! let err = robolang::parse("if (gt(fuelLeft, 10) { move; }").unwrap_err();
//! assert!(err.to_string().starts_with("Missing ) in if statement"));
//! ```

/// Version of the Robolang interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

use std::path::Path;

// Re-export main types
pub use error::{Error, ErrorSeverity, Result};
pub use lexer::{Scanner, Token, TokenKind, TokenStream};
pub use parser::{
    Action, ArithOp, Block, Combinator, Condition, ElifBranch, Expression, IfStatement, Parser,
    Program, Relop, Sensor, Statement, MAX_NESTING_DEPTH,
};
pub use runtime::{Environment, Evaluator, EvaluatorConfig, Robot, StopSignal};

/// Parse program text into an AST
pub fn parse(source: &str) -> Result<Program> {
    let tokens = Scanner::new(source).scan_tokens();
    Parser::new(tokens).parse()
}

/// Read and parse a program file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Program> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse(&source)
}

/// Parse a single expression such as `add(fuelLeft, 2)`
pub fn parse_expression(source: &str) -> Result<Expression> {
    let tokens = Scanner::new(source).scan_tokens();
    Parser::new(tokens).parse_standalone_expression()
}

/// Parse a single condition such as `and(lt($x, 3), not(eq(oppLR, 0)))`
pub fn parse_condition(source: &str) -> Result<Condition> {
    let tokens = Scanner::new(source).scan_tokens();
    Parser::new(tokens).parse_standalone_condition()
}

/// Execute a program with a fresh evaluator, returning the final variables
pub fn execute<R: Robot + ?Sized>(program: &Program, robot: &mut R) -> Result<Environment> {
    let mut evaluator = Evaluator::new();
    evaluator.execute(program, robot)?;
    Ok(evaluator.into_environment())
}
