use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Declares a keyword enum together with its source spelling, `Display` and `FromStr`.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Spelling of this keyword in program source
            pub fn keyword(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.keyword())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(Error::unknown($kind, other)),
                }
            }
        }
    };
}

keyword_enum! {
    /// Primitive robot commands
    Action, "action" {
        /// Step forward (repeatable)
        Move => "move",
        /// Turn left
        TurnL => "turnL",
        /// Turn right
        TurnR => "turnR",
        /// Pick up a fuel barrel
        TakeFuel => "takeFuel",
        /// Idle for one tick (repeatable)
        Wait => "wait",
        /// Turn 180 degrees
        TurnAround => "turnAround",
        /// Raise the shield
        ShieldOn => "shieldOn",
        /// Lower the shield
        ShieldOff => "shieldOff",
    }
}

keyword_enum! {
    /// Integer-valued environment queries
    Sensor, "sensor" {
        /// Fuel remaining
        FuelLeft => "fuelLeft",
        /// Opponent left/right offset
        OppLR => "oppLR",
        /// Opponent forward/back offset
        OppFB => "oppFB",
        /// Count of visible barrels
        NumBarrels => "numBarrels",
        /// Left/right offset of the barrel at a rank
        BarrelLR => "barrelLR",
        /// Forward/back offset of the barrel at a rank
        BarrelFB => "barrelFB",
        /// Distance to the nearest wall
        WallDist => "wallDist",
    }
}

keyword_enum! {
    /// Arithmetic operators
    ArithOp, "operator" {
        /// Addition
        Add => "add",
        /// Subtraction
        Sub => "sub",
        /// Multiplication
        Mul => "mul",
        /// Truncating division
        Div => "div",
    }
}

keyword_enum! {
    /// Relational operators used in leaf conditions
    Relop, "relop" {
        /// Less than
        Lt => "lt",
        /// Greater than
        Gt => "gt",
        /// Equal
        Eq => "eq",
    }
}

keyword_enum! {
    /// Boolean combinators
    Combinator, "combinator" {
        /// Conjunction
        And => "and",
        /// Disjunction
        Or => "or",
        /// Negation
        Not => "not",
    }
}

impl Action {
    /// Whether the action accepts an optional repeat count
    pub fn takes_count(self) -> bool {
        matches!(self, Action::Move | Action::Wait)
    }
}

impl Sensor {
    /// Whether the sensor accepts an optional rank argument
    pub fn takes_rank(self) -> bool {
        matches!(self, Sensor::BarrelLR | Sensor::BarrelFB)
    }
}

/// Complete Robolang program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Top-level statements in the program
    pub statements: Vec<Statement>,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Primitive action: `move(3);`, `turnL;`
    Action {
        /// Action to perform
        action: Action,
        /// Optional repeat count (only for move and wait)
        count: Option<Expression>,
    },

    /// Unconditional loop: `loop { ... }`
    Loop {
        /// Loop body
        body: Block,
    },

    /// If statement with optional elif branches and else block
    If(IfStatement),

    /// While loop
    While {
        /// Loop condition
        condition: Condition,
        /// Loop body
        body: Block,
    },

    /// Variable assignment: `$x = expr;`
    Assignment {
        /// Variable name, including the `$`
        name: String,
        /// Value to assign
        value: Expression,
    },
}

/// Braced, non-empty statement sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Statements in execution order
    pub statements: Vec<Statement>,
}

/// `if (cond) { } elif (cond) { } ... else { }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    /// Primary condition
    pub condition: Condition,
    /// Block run when the primary condition holds
    pub then_block: Block,
    /// Elif branches in source order
    pub elifs: Vec<ElifBranch>,
    /// Optional else block
    pub else_block: Option<Block>,
}

/// A single `elif (cond) { }` branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElifBranch {
    /// Branch condition
    pub condition: Condition,
    /// Block run when the condition holds
    pub block: Block,
}

/// Integer-valued expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Integer literal
    Number(i32),

    /// Sensor query, with an optional rank for the barrel sensors
    Sensor {
        /// Sensor to query
        sensor: Sensor,
        /// Optional rank argument
        rank: Option<Box<Expression>>,
    },

    /// Variable reference
    Variable(String),

    /// Arithmetic operation: `add(a, b)`
    Binary {
        /// Operator to apply
        op: ArithOp,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
    },
}

/// Boolean-valued conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Leaf comparison: `lt(a, b)`
    Compare {
        /// Relational operator
        relop: Relop,
        /// Left operand
        left: Expression,
        /// Right operand
        right: Expression,
    },
    /// `and(a, b)`
    And(Box<Condition>, Box<Condition>),
    /// `or(a, b)`
    Or(Box<Condition>, Box<Condition>),
    /// `not(a)`
    Not(Box<Condition>),
}

impl Expression {
    /// Builds an arithmetic node
    pub fn binary(op: ArithOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Builds a sensor node
    pub fn sensor(sensor: Sensor, rank: Option<Expression>) -> Self {
        Expression::Sensor {
            sensor,
            rank: rank.map(Box::new),
        }
    }
}

impl Condition {
    /// Builds a leaf comparison
    pub fn compare(relop: Relop, left: Expression, right: Expression) -> Self {
        Condition::Compare { relop, left, right }
    }

    /// Builds `and(left, right)`
    pub fn and(left: Condition, right: Condition) -> Self {
        Condition::And(Box::new(left), Box::new(right))
    }

    /// Builds `or(left, right)`
    pub fn or(left: Condition, right: Condition) -> Self {
        Condition::Or(Box::new(left), Box::new(right))
    }

    /// Builds `not(inner)`
    pub fn not(inner: Condition) -> Self {
        Condition::Not(Box::new(inner))
    }

    /// Combinator at the root of this condition, if any
    pub fn combinator(&self) -> Option<Combinator> {
        match self {
            Condition::Compare { .. } => None,
            Condition::And(..) => Some(Combinator::And),
            Condition::Or(..) => Some(Combinator::Or),
            Condition::Not(_) => Some(Combinator::Not),
        }
    }
}

// Rendering. Expressions and conditions print as valid source; statements
// keep the compact diagnostic layout (no `;`, blocks as `{\n + s\n}`).

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for stmt in &self.statements {
            write!(f, " + {}", stmt)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\n")?;
        for stmt in &self.statements {
            write!(f, " + {}", stmt)?;
        }
        write!(f, "\n}}")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Action {
                action,
                count: Some(count),
            } => write!(f, "{}({})", action, count),
            Statement::Action { action, count: None } => write!(f, "{}", action),
            Statement::Loop { body } => write!(f, "loop{}", body),
            Statement::If(if_stmt) => write!(f, "{}", if_stmt),
            Statement::While { condition, body } => write!(f, "while({}){}", condition, body),
            Statement::Assignment { name, value } => write!(f, "{}={}", name, value),
        }
    }
}

impl fmt::Display for IfStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if({}){}", self.condition, self.then_block)?;
        for elif in &self.elifs {
            write!(f, " elif({}){}", elif.condition, elif.block)?;
        }
        if let Some(else_block) = &self.else_block {
            write!(f, " else {}", else_block)?;
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Sensor {
                sensor,
                rank: Some(rank),
            } => write!(f, "{}({})", sensor, rank),
            Expression::Sensor { sensor, rank: None } => write!(f, "{}", sensor),
            Expression::Variable(name) => write!(f, "{}", name),
            Expression::Binary { op, left, right } => write!(f, "{}({},{})", op, left, right),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare { relop, left, right } => {
                write!(f, "{}({},{})", relop, left, right)
            }
            Condition::And(left, right) => write!(f, "and({},{})", left, right),
            Condition::Or(left, right) => write!(f, "or({},{})", left, right),
            Condition::Not(inner) => write!(f, "not({})", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn move_stmt(count: Option<i32>) -> Statement {
        Statement::Action {
            action: Action::Move,
            count: count.map(Expression::Number),
        }
    }

    #[test]
    fn test_keyword_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.keyword().parse::<Action>().unwrap(), *action);
        }
        for sensor in Sensor::ALL {
            assert_eq!(sensor.keyword().parse::<Sensor>().unwrap(), *sensor);
        }
        assert_eq!(Relop::ALL.len(), 3);
        assert_eq!(Combinator::ALL.len(), 3);
        assert_eq!(ArithOp::ALL.len(), 4);
    }

    #[test]
    fn test_unknown_keyword() {
        let err = "jump".parse::<Action>().unwrap_err();
        assert_eq!(
            err,
            Error::UnknownValue {
                kind: "action".into(),
                value: "jump".into()
            }
        );
        assert!("Add".parse::<ArithOp>().is_err());
    }

    #[test]
    fn test_optional_arguments() {
        assert!(Action::Move.takes_count());
        assert!(Action::Wait.takes_count());
        assert!(!Action::TurnL.takes_count());
        assert!(Sensor::BarrelFB.takes_rank());
        assert!(!Sensor::FuelLeft.takes_rank());
    }

    #[test]
    fn test_render_program_and_block() {
        let program = Program {
            statements: vec![
                move_stmt(Some(3)),
                Statement::Loop {
                    body: Block {
                        statements: vec![move_stmt(None), move_stmt(None)],
                    },
                },
            ],
        };
        assert_eq!(program.to_string(), "( + move(3) + loop{\n + move + move\n})");
    }

    #[test]
    fn test_render_if_elif_else() {
        let fuel_eq = |n| {
            Condition::compare(
                Relop::Eq,
                Expression::sensor(Sensor::FuelLeft, None),
                Expression::Number(n),
            )
        };
        let block = |action| Block {
            statements: vec![Statement::Action {
                action,
                count: None,
            }],
        };
        let stmt = Statement::If(IfStatement {
            condition: fuel_eq(1),
            then_block: block(Action::Move),
            elifs: vec![ElifBranch {
                condition: fuel_eq(2),
                block: block(Action::TurnL),
            }],
            else_block: Some(block(Action::Wait)),
        });
        assert_eq!(
            stmt.to_string(),
            "if(eq(fuelLeft,1)){\n + move\n} elif(eq(fuelLeft,2)){\n + turnL\n} else {\n + wait\n}"
        );
    }

    #[test]
    fn test_render_expressions_and_conditions() {
        let expr = Expression::binary(
            ArithOp::Add,
            Expression::Variable("$x".into()),
            Expression::sensor(Sensor::BarrelLR, Some(Expression::Number(-2))),
        );
        assert_eq!(expr.to_string(), "add($x,barrelLR(-2))");

        let cond = Condition::and(
            Condition::compare(Relop::Lt, Expression::Number(1), Expression::Number(2)),
            Condition::not(Condition::compare(
                Relop::Gt,
                Expression::Number(3),
                Expression::Number(4),
            )),
        );
        assert_eq!(cond.to_string(), "and(lt(1,2),not(gt(3,4)))");
    }

    #[test]
    fn test_combinator_constructors_keep_their_kind() {
        let lt = || Condition::compare(Relop::Lt, Expression::Number(1), Expression::Number(2));

        let and = Condition::and(lt(), lt());
        assert_eq!(and.combinator(), Some(Combinator::And));
        assert_eq!(and.to_string(), "and(lt(1,2),lt(1,2))");

        let or = Condition::or(lt(), lt());
        assert_eq!(or.combinator(), Some(Combinator::Or));
        assert_eq!(or.to_string(), "or(lt(1,2),lt(1,2))");

        let not = Condition::not(lt());
        assert_eq!(not.combinator(), Some(Combinator::Not));
        assert_eq!(not.to_string(), "not(lt(1,2))");

        assert_eq!(lt().combinator(), None);
    }

    #[test]
    fn test_render_assignment_and_while() {
        let stmt = Statement::While {
            condition: Condition::compare(
                Relop::Gt,
                Expression::Variable("$n".into()),
                Expression::Number(0),
            ),
            body: Block {
                statements: vec![Statement::Assignment {
                    name: "$n".into(),
                    value: Expression::binary(
                        ArithOp::Sub,
                        Expression::Variable("$n".into()),
                        Expression::Number(1),
                    ),
                }],
            },
        };
        assert_eq!(stmt.to_string(), "while(gt($n,0)){\n + $n=sub($n,1)\n}");
    }
}
