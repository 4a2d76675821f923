use embedded_hal::digital::v2::OutputPin;
use embedded_hal::PwmPin;

use crate::config::DriverConfig;

/// Which H-bridge input carries current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Reverse,
}

/// Last state a channel was commanded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorState {
    /// Nothing written since reset; the pins hold whatever the platform left.
    Unknown,
    Forward(u16),
    Reverse(u16),
    /// Coasting: both direction lines high, zero duty.
    Stopped,
}

/// Splits a signed speed into a direction and a duty in `0..=max_duty`.
///
/// Zero counts as forward. `i16::MIN` has no positive counterpart in `i16`,
/// so the magnitude is taken unsigned and saturates like any other
/// out-of-range value.
pub fn duty_for(speed: i16, max_duty: u16) -> (Direction, u16) {
    let direction = if speed >= 0 {
        Direction::Forward
    } else {
        Direction::Reverse
    };

    (direction, speed.unsigned_abs().min(max_duty))
}

/// Something that turns a signed speed into a motor output.
pub trait Motor {
    fn set_speed(&mut self, speed: i16);

    /// Asserts both direction lines and drops the duty to zero.
    fn coast(&mut self);

    fn state(&self) -> MotorState;
}

/// One motor on an H-bridge: two direction lines and a PWM compare channel.
pub struct MotorChannel<FWD, REV, PWM> {
    fwd: FWD,
    rev: REV,
    pwm: PWM,
    max_duty: u16,
    state: MotorState,
}

impl<FWD, REV, PWM> MotorChannel<FWD, REV, PWM>
where
    FWD: OutputPin,
    REV: OutputPin,
    PWM: PwmPin<Duty = u16>,
{
    /// Takes pins already configured as outputs and a timer channel already in
    /// PWM mode, and enables the PWM output. No pin or compare value is
    /// written until the first command.
    pub fn new(fwd: FWD, rev: REV, mut pwm: PWM, config: &DriverConfig) -> Self {
        pwm.enable();

        MotorChannel {
            fwd,
            rev,
            pwm,
            max_duty: config.max_duty(),
            state: MotorState::Unknown,
        }
    }

    pub fn max_duty(&self) -> u16 {
        self.max_duty
    }

    /// Gives the pins and the timer channel back.
    pub fn release(self) -> (FWD, REV, PWM) {
        (self.fwd, self.rev, self.pwm)
    }
}

impl<FWD, REV, PWM> Motor for MotorChannel<FWD, REV, PWM>
where
    FWD: OutputPin,
    REV: OutputPin,
    PWM: PwmPin<Duty = u16>,
{
    fn set_speed(&mut self, speed: i16) {
        let (direction, duty) = duty_for(speed, self.max_duty);

        // Pin errors are discarded; the HAL outputs this drives are infallible.
        match direction {
            Direction::Forward => {
                self.fwd.set_high().ok();
                self.rev.set_low().ok();
                self.state = MotorState::Forward(duty);
            }
            Direction::Reverse => {
                self.fwd.set_low().ok();
                self.rev.set_high().ok();
                self.state = MotorState::Reverse(duty);
            }
        }

        self.pwm.set_duty(duty);
    }

    fn coast(&mut self) {
        self.fwd.set_high().ok();
        self.rev.set_high().ok();
        self.pwm.set_duty(0);
        self.state = MotorState::Stopped;
    }

    fn state(&self) -> MotorState {
        self.state
    }
}
