//! Pin map and clock settings for the drive board.
//!
//! ```text
//! PA4 - LEFT_IN1   (forward enable)
//! PA5 - LEFT_IN2   (reverse enable)
//! PA8 - LEFT_PWM   TIM1.1
//! PB0 - RIGHT_IN1  (forward enable)
//! PB1 - RIGHT_IN2  (reverse enable)
//! PA9 - RIGHT_PWM  TIM1.2
//! PA10 - ON_SW     (motors enabled while released)
//! PF0 - LED1       (drive enabled)
//! ```

use motor_control::{MotorChannel, MotorDriver, DEFAULT_MAX_DUTY};
use stm32g4xx_hal::gpio::gpioa::{PA4, PA5};
use stm32g4xx_hal::gpio::gpiob::{PB0, PB1};
use stm32g4xx_hal::gpio::{Output, PushPull};
use stm32g4xx_hal::pwm::{ActiveHigh, ComplementaryDisabled, Pwm, C1, C2};
use stm32g4xx_hal::stm32::TIM1;

/// H-bridge PWM carrier, kHz. `SYSCLK_HZ / 128kHz` gives a 1000 tick
/// period, so a duty of `DEFAULT_MAX_DUTY` is 100% on-time.
pub const PWM_FREQ_KHZ: u32 = SYSCLK_HZ / 1000 / DEFAULT_MAX_DUTY as u32;

/// System clock after the PLL: 16MHz HSI / 2 * 32 / 2.
pub const SYSCLK_HZ: u32 = 128_000_000;

/// How long each step of the bring-up pattern is held.
pub const STEP_CYCLES: u32 = SYSCLK_HZ * 2;

/// Left/right speeds cycled by the idle loop while the switch allows driving.
pub const DRIVE_PATTERN: [(i16, i16); 4] = [
    (600, 600),
    (-600, -600),
    (400, -400),
    (1500, -1500),
];

type MotorPwm<C> = Pwm<TIM1, C, ComplementaryDisabled, ActiveHigh, ActiveHigh>;

pub type LeftMotor = MotorChannel<PA4<Output<PushPull>>, PA5<Output<PushPull>>, MotorPwm<C1>>;
pub type RightMotor = MotorChannel<PB0<Output<PushPull>>, PB1<Output<PushPull>>, MotorPwm<C2>>;
pub type Drive = MotorDriver<LeftMotor, RightMotor>;
