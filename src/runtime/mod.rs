//! Runtime execution for Robolang programs

mod config;
mod environment;
mod evaluator;
mod interrupt;
mod robot;

pub use config::EvaluatorConfig;
pub use environment::Environment;
pub use evaluator::Evaluator;
pub use interrupt::StopSignal;
pub use robot::Robot;
