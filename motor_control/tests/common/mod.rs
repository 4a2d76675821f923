//! Recording stand-ins for the GPIO bank and PWM timer.
//!
//! Every fake pin and fake timer channel appends to one shared [`Bus`] log,
//! so tests can assert both on the order of writes and on the final level
//! of each line and compare register.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::v2::OutputPin;
use embedded_hal::PwmPin;
use motor_control::{DriverConfig, MotorChannel, MotorDriver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    LeftFwd,
    LeftRev,
    RightFwd,
    RightRev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compare {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    Pin(Line, bool),
    Duty(Compare, u16),
    Enable(Compare),
    Disable(Compare),
}

#[derive(Clone, Default)]
pub struct Bus(Rc<RefCell<Vec<Write>>>);

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self, line: Line) -> FakePin {
        FakePin {
            line,
            bus: self.clone(),
        }
    }

    pub fn timer(&self, compare: Compare, max_duty: u16) -> FakePwm {
        FakePwm {
            compare,
            duty: 0,
            max_duty,
            bus: self.clone(),
        }
    }

    fn record(&self, write: Write) {
        self.0.borrow_mut().push(write);
    }

    pub fn writes(&self) -> Vec<Write> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Last level written to `line`, `None` if it was never touched.
    pub fn level(&self, line: Line) -> Option<bool> {
        self.0.borrow().iter().rev().find_map(|w| match *w {
            Write::Pin(l, high) if l == line => Some(high),
            _ => None,
        })
    }

    /// Last value written to a compare register, `None` if never written.
    pub fn compare(&self, compare: Compare) -> Option<u16> {
        self.0.borrow().iter().rev().find_map(|w| match *w {
            Write::Duty(c, duty) if c == compare => Some(duty),
            _ => None,
        })
    }

    /// Level of every line and compare register, in a fixed order.
    pub fn snapshot(&self) -> [Option<u16>; 6] {
        let pin = |line: Line| self.level(line).map(u16::from);
        [
            pin(Line::LeftFwd),
            pin(Line::LeftRev),
            pin(Line::RightFwd),
            pin(Line::RightRev),
            self.compare(Compare::Left),
            self.compare(Compare::Right),
        ]
    }
}

pub struct FakePin {
    line: Line,
    bus: Bus,
}

impl OutputPin for FakePin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.bus.record(Write::Pin(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.bus.record(Write::Pin(self.line, true));
        Ok(())
    }
}

pub struct FakePwm {
    compare: Compare,
    duty: u16,
    max_duty: u16,
    bus: Bus,
}

impl PwmPin for FakePwm {
    type Duty = u16;

    fn disable(&mut self) {
        self.bus.record(Write::Disable(self.compare));
    }

    fn enable(&mut self) {
        self.bus.record(Write::Enable(self.compare));
    }

    fn get_duty(&self) -> u16 {
        self.duty
    }

    fn get_max_duty(&self) -> u16 {
        self.max_duty
    }

    fn set_duty(&mut self, duty: u16) {
        self.duty = duty;
        self.bus.record(Write::Duty(self.compare, duty));
    }
}

pub type FakeChannel = MotorChannel<FakePin, FakePin, FakePwm>;

pub fn left_channel(bus: &Bus, config: &DriverConfig) -> FakeChannel {
    MotorChannel::new(
        bus.output(Line::LeftFwd),
        bus.output(Line::LeftRev),
        bus.timer(Compare::Left, 1000),
        config,
    )
}

pub fn right_channel(bus: &Bus, config: &DriverConfig) -> FakeChannel {
    MotorChannel::new(
        bus.output(Line::RightFwd),
        bus.output(Line::RightRev),
        bus.timer(Compare::Right, 1000),
        config,
    )
}

/// A driver over fresh fakes with the construction writes already cleared.
pub fn driver(config: DriverConfig) -> (Bus, MotorDriver<FakeChannel, FakeChannel>) {
    let bus = Bus::new();
    let driver = MotorDriver::new(left_channel(&bus, &config), right_channel(&bus, &config));
    bus.clear();
    (bus, driver)
}
