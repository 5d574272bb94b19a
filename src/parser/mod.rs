//! Robolang Parser Module
//!
//! Parses token streams into Abstract Syntax Trees (AST) by recursive descent.

mod ast;
mod grammar;

pub use ast::{
    Action, ArithOp, Block, Combinator, Condition, ElifBranch, Expression, IfStatement, Program,
    Relop, Sensor, Statement,
};
pub use grammar::{Parser, MAX_NESTING_DEPTH};
