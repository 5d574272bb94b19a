use crate::error::{Error, Result};
use crate::parser::{
    Action, ArithOp, Block, Condition, Expression, IfStatement, Program, Relop, Sensor, Statement,
};
use crate::runtime::{Environment, EvaluatorConfig, Robot, StopSignal};

/// Ranks above this are treated as rank 0 by the barrel sensors
const MAX_BARREL_RANK: i32 = 13;

/// Tree-walking interpreter for Robolang programs
///
/// Owns the variable store for one running program. Statements are executed
/// against a host [`Robot`]; integer expressions and boolean conditions are
/// evaluated against the same robot and store.
pub struct Evaluator {
    /// Variable store
    env: Environment,
    /// Execution limits
    config: EvaluatorConfig,
    /// Cooperative cancellation flag
    stop: StopSignal,
    /// Statements executed so far
    steps: u64,
}

impl Evaluator {
    /// Creates an evaluator with an empty store and no limits
    pub fn new() -> Self {
        Self::with_config(EvaluatorConfig::default())
    }

    /// Creates an evaluator with custom configuration
    pub fn with_config(config: EvaluatorConfig) -> Self {
        Evaluator {
            env: Environment::new(),
            config,
            stop: StopSignal::new(),
            steps: 0,
        }
    }

    /// Replaces the stop signal, e.g. with one already handed to a host
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// Handle the host can use to stop this evaluator
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Current variable store
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Mutable access to the variable store (for presetting variables)
    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Consumes the evaluator, returning its variable store
    pub fn into_environment(self) -> Environment {
        self.env
    }

    /// Number of statements executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Execute a program
    pub fn execute<R: Robot + ?Sized>(&mut self, program: &Program, robot: &mut R) -> Result<()> {
        tracing::debug!(statements = program.statements.len(), "executing program");

        for stmt in &program.statements {
            if let Err(err) = self.execute_statement(stmt, robot) {
                tracing::debug!(steps = self.steps, error = %err, "execution aborted");
                return Err(err);
            }
        }

        tracing::debug!(steps = self.steps, "execution finished");
        Ok(())
    }

    /// Execute each statement of a block in order
    pub fn execute_block<R: Robot + ?Sized>(&mut self, block: &Block, robot: &mut R) -> Result<()> {
        for stmt in &block.statements {
            self.execute_statement(stmt, robot)?;
        }
        Ok(())
    }

    /// Execute a single statement
    pub fn execute_statement<R: Robot + ?Sized>(
        &mut self,
        stmt: &Statement,
        robot: &mut R,
    ) -> Result<()> {
        self.checkpoint()?;

        match stmt {
            Statement::Action { action, count } => {
                self.execute_action(*action, count.as_ref(), robot)
            }

            // Runs until the stop signal, the step budget, or an error ends it
            Statement::Loop { body } => loop {
                self.execute_block(body, robot)?;
            },

            Statement::If(if_stmt) => self.execute_if(if_stmt, robot),

            Statement::While { condition, body } => {
                while self.evaluate_condition(condition, robot)? {
                    self.execute_block(body, robot)?;
                }
                Ok(())
            }

            Statement::Assignment { name, value } => {
                let val = self.evaluate_expression(value, robot)?;
                tracing::trace!(variable = %name, value = val, "assign");
                self.env.set(name, val);
                Ok(())
            }
        }
    }

    /// Primary branch if its condition holds. Otherwise, when elif branches
    /// exist, the first one whose condition holds; the else block is only
    /// reachable when there are no elif branches at all.
    fn execute_if<R: Robot + ?Sized>(
        &mut self,
        if_stmt: &IfStatement,
        robot: &mut R,
    ) -> Result<()> {
        if self.evaluate_condition(&if_stmt.condition, robot)? {
            return self.execute_block(&if_stmt.then_block, robot);
        }

        if !if_stmt.elifs.is_empty() {
            for elif in &if_stmt.elifs {
                if self.evaluate_condition(&elif.condition, robot)? {
                    return self.execute_block(&elif.block, robot);
                }
            }
            return Ok(());
        }

        match &if_stmt.else_block {
            Some(else_block) => self.execute_block(else_block, robot),
            None => Ok(()),
        }
    }

    fn execute_action<R: Robot + ?Sized>(
        &mut self,
        action: Action,
        count: Option<&Expression>,
        robot: &mut R,
    ) -> Result<()> {
        let repeats = match count {
            Some(expr) => self.evaluate_expression(expr, robot)?,
            None => 1,
        };
        tracing::trace!(action = %action, repeats, "action");

        match action {
            Action::Move => {
                for _ in 0..repeats {
                    self.check_stop()?;
                    robot.move_step();
                }
            }
            Action::Wait => {
                for _ in 0..repeats {
                    self.check_stop()?;
                    robot.idle_wait();
                }
            }
            Action::TurnL => robot.turn_left(),
            Action::TurnR => robot.turn_right(),
            Action::TakeFuel => robot.take_fuel(),
            Action::TurnAround => robot.turn_around(),
            Action::ShieldOn => robot.set_shield(true),
            Action::ShieldOff => robot.set_shield(false),
        }
        Ok(())
    }

    /// Evaluate an integer expression
    pub fn evaluate_expression<R: Robot + ?Sized>(
        &mut self,
        expr: &Expression,
        robot: &mut R,
    ) -> Result<i32> {
        match expr {
            Expression::Number(n) => Ok(*n),

            Expression::Variable(name) => Ok(self.env.read(name)),

            Expression::Sensor { sensor, rank } => {
                let rank = match rank {
                    Some(rank_expr) => self.evaluate_expression(rank_expr, robot)?,
                    None => 0,
                };
                Ok(Self::sense(*sensor, rank, robot))
            }

            Expression::Binary { op, left, right } => {
                let l = self.evaluate_expression(left, robot)?;
                let r = self.evaluate_expression(right, robot)?;
                match op {
                    ArithOp::Add => Ok(l.wrapping_add(r)),
                    ArithOp::Sub => Ok(l.wrapping_sub(r)),
                    ArithOp::Mul => Ok(l.wrapping_mul(r)),
                    ArithOp::Div => {
                        if r == 0 {
                            return Err(Error::DivisionByZero {
                                expression: expr.to_string(),
                            });
                        }
                        Ok(l.wrapping_div(r))
                    }
                }
            }
        }
    }

    /// Evaluate a boolean condition
    pub fn evaluate_condition<R: Robot + ?Sized>(
        &mut self,
        cond: &Condition,
        robot: &mut R,
    ) -> Result<bool> {
        match cond {
            Condition::Compare { relop, left, right } => {
                // Right operand first
                let r = self.evaluate_expression(right, robot)?;
                let l = self.evaluate_expression(left, robot)?;
                Ok(match relop {
                    Relop::Lt => l < r,
                    Relop::Gt => l > r,
                    Relop::Eq => l == r,
                })
            }

            // Both sides are always evaluated
            Condition::And(left, right) => {
                let l = self.evaluate_condition(left, robot)?;
                let r = self.evaluate_condition(right, robot)?;
                Ok(l && r)
            }
            Condition::Or(left, right) => {
                let l = self.evaluate_condition(left, robot)?;
                let r = self.evaluate_condition(right, robot)?;
                Ok(l || r)
            }

            Condition::Not(inner) => Ok(!self.evaluate_condition(inner, robot)?),
        }
    }

    fn sense<R: Robot + ?Sized>(sensor: Sensor, rank: i32, robot: &mut R) -> i32 {
        let rank = if rank > MAX_BARREL_RANK {
            tracing::warn!(sensor = %sensor, rank, "barrel rank out of range, using 0");
            0
        } else {
            rank
        };

        match sensor {
            Sensor::OppFB => robot.opponent_fb(),
            Sensor::OppLR => robot.opponent_lr(),
            Sensor::BarrelFB => robot.barrel_fb(rank),
            Sensor::BarrelLR => robot.barrel_lr(rank),
            Sensor::FuelLeft => robot.fuel(),
            Sensor::WallDist => robot.distance_to_wall(),
            Sensor::NumBarrels => robot.num_barrels(),
        }
    }

    /// Called before every statement
    fn checkpoint(&mut self) -> Result<()> {
        self.check_stop()?;

        if let Some(limit) = self.config.max_steps {
            if self.steps >= limit {
                return Err(Error::ExecutionLimitExceeded { limit });
            }
        }
        self.steps += 1;
        Ok(())
    }

    fn check_stop(&self) -> Result<()> {
        if self.stop.is_stopped() {
            tracing::debug!(steps = self.steps, "stop signal observed");
            return Err(Error::Interrupted);
        }
        Ok(())
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
