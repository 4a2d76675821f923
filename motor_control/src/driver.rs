use crate::motor::{Motor, MotorState};

/// Names one channel of a [`MotorDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

/// Left and right motor channels of a differential-drive robot.
///
/// Every call is a handful of immediate register writes. Nothing here locks:
/// a caller reaching the driver from more than one execution context has to
/// serialise access itself.
pub struct MotorDriver<L, R> {
    left: L,
    right: R,
}

impl<L, R> MotorDriver<L, R>
where
    L: Motor,
    R: Motor,
{
    pub fn new(left: L, right: R) -> Self {
        MotorDriver { left, right }
    }

    /// Drives one channel. Only that channel's pins and compare value are
    /// written.
    pub fn set_speed(&mut self, side: Side, speed: i16) {
        match side {
            Side::Left => self.left.set_speed(speed),
            Side::Right => self.right.set_speed(speed),
        }

        trace!("{} speed {} -> {}", side, speed, self.state(side));
    }

    pub fn set_speed_left(&mut self, speed: i16) {
        self.set_speed(Side::Left, speed);
    }

    pub fn set_speed_right(&mut self, speed: i16) {
        self.set_speed(Side::Right, speed);
    }

    /// Coasts both motors regardless of what they were doing. The writes are
    /// independent; left is fully stopped before right is touched.
    pub fn stop_all(&mut self) {
        self.left.coast();
        self.right.coast();

        debug!("all motors stopped");
    }

    pub fn state(&self, side: Side) -> MotorState {
        match side {
            Side::Left => self.left.state(),
            Side::Right => self.right.state(),
        }
    }

    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }

    pub fn release(self) -> (L, R) {
        (self.left, self.right)
    }
}
