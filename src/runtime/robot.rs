//! The capability through which programs act on and observe a robot.
//!
//! The interpreter never simulates anything itself: every action and sensor
//! reading is a blocking call on a host-supplied [`Robot`].

/// Actions and sensors a Robolang program can reach.
///
/// All sensor readings are integers. Calls are expected to block until the
/// simulation has carried them out.
pub trait Robot {
    /// Move forward one step
    fn move_step(&mut self);
    /// Turn left on the spot
    fn turn_left(&mut self);
    /// Turn right on the spot
    fn turn_right(&mut self);
    /// Pick up fuel at the current position
    fn take_fuel(&mut self);
    /// Do nothing for one tick
    fn idle_wait(&mut self);
    /// Turn to face the opposite direction
    fn turn_around(&mut self);
    /// Raise or lower the shield
    fn set_shield(&mut self, on: bool);

    /// Forward/back offset of the opponent
    fn opponent_fb(&mut self) -> i32;
    /// Left/right offset of the opponent
    fn opponent_lr(&mut self) -> i32;
    /// Forward/back offset of the barrel at `rank` (0 is the nearest)
    fn barrel_fb(&mut self, rank: i32) -> i32;
    /// Left/right offset of the barrel at `rank` (0 is the nearest)
    fn barrel_lr(&mut self, rank: i32) -> i32;
    /// Fuel remaining
    fn fuel(&mut self) -> i32;
    /// Distance to the nearest wall
    fn distance_to_wall(&mut self) -> i32;
    /// Number of visible barrels
    fn num_barrels(&mut self) -> i32;
}

impl<R: Robot + ?Sized> Robot for &mut R {
    fn move_step(&mut self) {
        (**self).move_step()
    }
    fn turn_left(&mut self) {
        (**self).turn_left()
    }
    fn turn_right(&mut self) {
        (**self).turn_right()
    }
    fn take_fuel(&mut self) {
        (**self).take_fuel()
    }
    fn idle_wait(&mut self) {
        (**self).idle_wait()
    }
    fn turn_around(&mut self) {
        (**self).turn_around()
    }
    fn set_shield(&mut self, on: bool) {
        (**self).set_shield(on)
    }
    fn opponent_fb(&mut self) -> i32 {
        (**self).opponent_fb()
    }
    fn opponent_lr(&mut self) -> i32 {
        (**self).opponent_lr()
    }
    fn barrel_fb(&mut self, rank: i32) -> i32 {
        (**self).barrel_fb(rank)
    }
    fn barrel_lr(&mut self, rank: i32) -> i32 {
        (**self).barrel_lr(rank)
    }
    fn fuel(&mut self) -> i32 {
        (**self).fuel()
    }
    fn distance_to_wall(&mut self) -> i32 {
        (**self).distance_to_wall()
    }
    fn num_barrels(&mut self) -> i32 {
        (**self).num_barrels()
    }
}

impl<R: Robot + ?Sized> Robot for Box<R> {
    fn move_step(&mut self) {
        (**self).move_step()
    }
    fn turn_left(&mut self) {
        (**self).turn_left()
    }
    fn turn_right(&mut self) {
        (**self).turn_right()
    }
    fn take_fuel(&mut self) {
        (**self).take_fuel()
    }
    fn idle_wait(&mut self) {
        (**self).idle_wait()
    }
    fn turn_around(&mut self) {
        (**self).turn_around()
    }
    fn set_shield(&mut self, on: bool) {
        (**self).set_shield(on)
    }
    fn opponent_fb(&mut self) -> i32 {
        (**self).opponent_fb()
    }
    fn opponent_lr(&mut self) -> i32 {
        (**self).opponent_lr()
    }
    fn barrel_fb(&mut self, rank: i32) -> i32 {
        (**self).barrel_fb(rank)
    }
    fn barrel_lr(&mut self, rank: i32) -> i32 {
        (**self).barrel_lr(rank)
    }
    fn fuel(&mut self) -> i32 {
        (**self).fuel()
    }
    fn distance_to_wall(&mut self) -> i32 {
        (**self).distance_to_wall()
    }
    fn num_barrels(&mut self) -> i32 {
        (**self).num_barrels()
    }
}
