use core::fmt;

/// Full-scale duty value: 1000 = 100% on-time.
pub const DEFAULT_MAX_DUTY: u16 = 1000;

/// Settings shared by both motor channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    max_duty: u16,
}

impl DriverConfig {
    /// Builds a configuration whose speed magnitudes saturate at `max_duty`.
    pub fn new(max_duty: u16) -> Result<Self, ConfigError> {
        if max_duty == 0 {
            return Err(ConfigError::ZeroMaxDuty);
        }

        Ok(DriverConfig { max_duty })
    }

    pub fn max_duty(&self) -> u16 {
        self.max_duty
    }

    /// Checks that `max_duty` is exactly one full PWM period of a timer whose
    /// compare value tops out at `timer_max`, so a saturated speed is 100%
    /// on-time and not a fraction of it.
    pub fn check_timer(&self, timer_max: u16) -> Result<(), ConfigError> {
        if self.max_duty != timer_max {
            return Err(ConfigError::TimerPeriodMismatch {
                max_duty: self.max_duty,
                timer_max,
            });
        }

        Ok(())
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            max_duty: DEFAULT_MAX_DUTY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A zero maximum would pin every channel at 0% duty.
    ZeroMaxDuty,
    /// The timer period is not the configured maximum duty.
    TimerPeriodMismatch { max_duty: u16, timer_max: u16 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroMaxDuty => f.write_str("max duty must be non-zero"),
            ConfigError::TimerPeriodMismatch { max_duty, timer_max } => write!(
                f,
                "max duty {} does not match timer period {}",
                max_duty, timer_max
            ),
        }
    }
}
