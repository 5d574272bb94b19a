/// Stopping running programs: stop signal and step budget
mod common;

use std::thread;
use std::time::Duration;

use common::{Call, RecordingRobot};
use robolang::{parse, Error, ErrorSeverity, Evaluator, EvaluatorConfig, Robot, StopSignal};

/// Robot that raises a stop signal once it has moved a given number of times
struct TiredRobot {
    inner: RecordingRobot,
    stop: StopSignal,
    stop_after: usize,
}

impl Robot for TiredRobot {
    fn move_step(&mut self) {
        self.inner.move_step();
        if self.inner.count(&Call::Move) == self.stop_after {
            self.stop.stop();
        }
    }
    fn turn_left(&mut self) {
        self.inner.turn_left()
    }
    fn turn_right(&mut self) {
        self.inner.turn_right()
    }
    fn take_fuel(&mut self) {
        self.inner.take_fuel()
    }
    fn idle_wait(&mut self) {
        self.inner.idle_wait()
    }
    fn turn_around(&mut self) {
        self.inner.turn_around()
    }
    fn set_shield(&mut self, on: bool) {
        self.inner.set_shield(on)
    }
    fn opponent_fb(&mut self) -> i32 {
        self.inner.opponent_fb()
    }
    fn opponent_lr(&mut self) -> i32 {
        self.inner.opponent_lr()
    }
    fn barrel_fb(&mut self, rank: i32) -> i32 {
        self.inner.barrel_fb(rank)
    }
    fn barrel_lr(&mut self, rank: i32) -> i32 {
        self.inner.barrel_lr(rank)
    }
    fn fuel(&mut self) -> i32 {
        self.inner.fuel()
    }
    fn distance_to_wall(&mut self) -> i32 {
        self.inner.distance_to_wall()
    }
    fn num_barrels(&mut self) -> i32 {
        self.inner.num_barrels()
    }
}

#[test]
fn test_stop_from_robot_ends_infinite_loop() {
    let program = parse("loop { move; }").unwrap();
    let stop = StopSignal::new();
    let mut robot = TiredRobot {
        inner: RecordingRobot::with_fuel(100),
        stop: stop.clone(),
        stop_after: 5,
    };

    let mut evaluator = Evaluator::new().with_stop_signal(stop);
    let err = evaluator.execute(&program, &mut robot).unwrap_err();

    assert_eq!(err, Error::Interrupted);
    assert_eq!(err.classify(), ErrorSeverity::Recoverable);
    assert_eq!(robot.inner.count(&Call::Move), 5);
}

#[test]
fn test_stop_between_repeated_moves() {
    let program = parse("move(10); turnL;").unwrap();
    let stop = StopSignal::new();
    let mut robot = TiredRobot {
        inner: RecordingRobot::with_fuel(100),
        stop: stop.clone(),
        stop_after: 3,
    };

    let err = Evaluator::new()
        .with_stop_signal(stop)
        .execute(&program, &mut robot)
        .unwrap_err();

    assert_eq!(err, Error::Interrupted);
    assert_eq!(robot.inner.actions(), vec![Call::Move, Call::Move, Call::Move]);
}

#[test]
fn test_stop_from_another_thread() {
    let program = parse("loop { wait; turnL; }").unwrap();
    let mut evaluator = Evaluator::new();
    let stop = evaluator.stop_signal();

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        stop.stop();
    });

    let mut robot = RecordingRobot::default();
    let err = evaluator.execute(&program, &mut robot).unwrap_err();
    stopper.join().unwrap();

    assert_eq!(err, Error::Interrupted);
    assert!(evaluator.stop_signal().is_stopped());
}

#[test]
fn test_reset_signal_allows_rerun() {
    let program = parse("$runs = add($runs, 1);").unwrap();
    let mut evaluator = Evaluator::new();
    let mut robot = RecordingRobot::default();

    evaluator.stop_signal().stop();
    assert_eq!(
        evaluator.execute(&program, &mut robot).unwrap_err(),
        Error::Interrupted
    );

    evaluator.stop_signal().reset();
    evaluator.execute(&program, &mut robot).unwrap();
    assert_eq!(evaluator.environment().get("$runs"), Some(1));
}

#[test]
fn test_step_budget_from_json_config() {
    let config = EvaluatorConfig::from_json(r#"{"max_steps": 25}"#).unwrap();
    let program = parse("$i = 0; while (lt($i, 1000)) { move; $i = add($i, 1); }").unwrap();

    let mut robot = RecordingRobot::with_fuel(1000);
    let mut evaluator = Evaluator::with_config(config);
    let err = evaluator.execute(&program, &mut robot).unwrap_err();

    assert_eq!(err, Error::ExecutionLimitExceeded { limit: 25 });
    assert_eq!(err.classify(), ErrorSeverity::Recoverable);
    assert_eq!(evaluator.steps(), 25);
    // assignment + while, then two statements per iteration
    assert_eq!(robot.count(&Call::Move), 12);
    assert_eq!(evaluator.environment().get("$i"), Some(11));
}

#[test]
fn test_budget_large_enough_completes() {
    let config = EvaluatorConfig::with_max_steps(100);
    let program = parse("$i = 0; while (lt($i, 10)) { move; $i = add($i, 1); }").unwrap();

    let mut robot = RecordingRobot::with_fuel(100);
    let mut evaluator = Evaluator::with_config(config);
    evaluator.execute(&program, &mut robot).unwrap();

    assert_eq!(evaluator.steps(), 22);
    assert_eq!(robot.count(&Call::Move), 10);
}
