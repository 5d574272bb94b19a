//! Shared test robot for the integration tests

#![allow(dead_code)]

use robolang::Robot;

/// A capability call observed by [`RecordingRobot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Move,
    TurnLeft,
    TurnRight,
    TakeFuel,
    Wait,
    TurnAround,
    Shield(bool),
    OpponentFB,
    OpponentLR,
    BarrelFB(i32),
    BarrelLR(i32),
    Fuel,
    WallDist,
    NumBarrels,
}

/// Robot that records every call and answers sensors from fixed readings.
///
/// `move_step` burns one unit of fuel so that fuel-driven loops terminate.
#[derive(Debug, Default)]
pub struct RecordingRobot {
    pub calls: Vec<Call>,
    pub fuel: i32,
    pub wall_distance: i32,
    pub barrels: i32,
    pub opponent: (i32, i32),
}

impl RecordingRobot {
    pub fn with_fuel(fuel: i32) -> Self {
        RecordingRobot {
            fuel,
            ..Default::default()
        }
    }

    /// Calls that change the world, in order
    pub fn actions(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::Move
                        | Call::TurnLeft
                        | Call::TurnRight
                        | Call::TakeFuel
                        | Call::Wait
                        | Call::TurnAround
                        | Call::Shield(_)
                )
            })
            .cloned()
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl Robot for RecordingRobot {
    fn move_step(&mut self) {
        self.calls.push(Call::Move);
        self.fuel -= 1;
    }
    fn turn_left(&mut self) {
        self.calls.push(Call::TurnLeft);
    }
    fn turn_right(&mut self) {
        self.calls.push(Call::TurnRight);
    }
    fn take_fuel(&mut self) {
        self.calls.push(Call::TakeFuel);
    }
    fn idle_wait(&mut self) {
        self.calls.push(Call::Wait);
    }
    fn turn_around(&mut self) {
        self.calls.push(Call::TurnAround);
    }
    fn set_shield(&mut self, on: bool) {
        self.calls.push(Call::Shield(on));
    }
    fn opponent_fb(&mut self) -> i32 {
        self.calls.push(Call::OpponentFB);
        self.opponent.0
    }
    fn opponent_lr(&mut self) -> i32 {
        self.calls.push(Call::OpponentLR);
        self.opponent.1
    }
    fn barrel_fb(&mut self, rank: i32) -> i32 {
        self.calls.push(Call::BarrelFB(rank));
        rank
    }
    fn barrel_lr(&mut self, rank: i32) -> i32 {
        self.calls.push(Call::BarrelLR(rank));
        -rank
    }
    fn fuel(&mut self) -> i32 {
        self.calls.push(Call::Fuel);
        self.fuel
    }
    fn distance_to_wall(&mut self) -> i32 {
        self.calls.push(Call::WallDist);
        self.wall_distance
    }
    fn num_barrels(&mut self) -> i32 {
        self.calls.push(Call::NumBarrels);
        self.barrels
    }
}
