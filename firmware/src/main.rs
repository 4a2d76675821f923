#![no_main]
#![no_std]

use defmt_rtt as _;
use panic_probe as _;

mod board;

#[rtic::app(device = stm32g4xx_hal::stm32, peripherals = true)]
mod app {
    use super::board::{self, Drive};

    use embedded_hal::PwmPin;
    use motor_control::{DriverConfig, MotorChannel, MotorDriver, Side};
    use rtic::mutex_prelude::*;
    use stm32g4xx_hal as hal;
    use hal::prelude::*;
    use hal::time::RateExtU32;
    use hal::gpio::{ExtiPin, Input, Output, PullUp, PushPull, SignalEdge};
    use hal::gpio::gpioa::PA10;
    use hal::gpio::gpiof::PF0;
    use hal::pwr::PwrExt;
    use hal::rcc::{Config, PllConfig, PllMDiv, PllNMul, PllRDiv};
    use hal::syscfg::SysCfgExt;

    use defmt::{error, info, warn};

    #[shared]
    struct Shared {
        drive: Drive,
        enabled: bool,
    }

    #[local]
    struct Local {
        led1: PF0<Output<PushPull>>,
        on_off_sw: PA10<Input<PullUp>>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local) {
        let mut dp = ctx.device;

        let pwr = dp.PWR.constrain().freeze();
        let rcc = dp.RCC.constrain();
        /* PLL Configured for 128MHz from 16MHz HSI */
        let mut pll_cfg = PllConfig::default();
        pll_cfg.m = PllMDiv::DIV_2;
        pll_cfg.n = PllNMul::MUL_32;
        pll_cfg.r = Some(PllRDiv::DIV_2);
        let mut rcc = rcc.freeze(Config::pll().pll_cfg(pll_cfg), pwr);

        let mut syscfg = dp.SYSCFG.constrain();

        let gpioa = dp.GPIOA.split(&mut rcc);
        let gpiob = dp.GPIOB.split(&mut rcc);
        let gpiof = dp.GPIOF.split(&mut rcc);

        let left_in1 = gpioa.pa4.into_push_pull_output();
        let left_in2 = gpioa.pa5.into_push_pull_output();
        let right_in1 = gpiob.pb0.into_push_pull_output();
        let right_in2 = gpiob.pb1.into_push_pull_output();

        let left_out = gpioa.pa8.into_alternate();
        let right_out = gpioa.pa9.into_alternate();
        let (left_pwm, right_pwm) =
            dp.TIM1.pwm((left_out, right_out), board::PWM_FREQ_KHZ.kHz(), &mut rcc);

        // Saturated speed must be a full period; fall back to the timer's own
        // range if the HAL rounded the carrier.
        let timer_max = left_pwm.get_max_duty();
        let config = match DriverConfig::default().check_timer(timer_max) {
            Ok(()) => DriverConfig::default(),
            Err(e) => {
                error!("{}, using timer period as max duty", e);
                DriverConfig::new(timer_max).unwrap_or_default()
            }
        };

        let mut drive = MotorDriver::new(
            MotorChannel::new(left_in1, left_in2, left_pwm, &config),
            MotorChannel::new(right_in1, right_in2, right_pwm, &config),
        );
        drive.stop_all();

        let mut on_off_sw = gpioa.pa10.into_pull_up_input();
        on_off_sw.make_interrupt_source(&mut syscfg);
        on_off_sw.enable_interrupt(&mut dp.EXTI);
        on_off_sw.trigger_on_edge(&mut dp.EXTI, SignalEdge::RisingFalling);
        let enabled = on_off_sw.is_high().unwrap_or(false);

        let mut led1 = gpiof.pf0.into_push_pull_output();
        if enabled {
            led1.set_high().ok();
        } else {
            led1.set_low().ok();
        }

        info!("sysclk = {}", rcc.clocks.sys_clk.to_MHz());
        info!(
            "left: IN1=PA4 IN2=PA5 PWM=TIM1.1, right: IN1=PB0 IN2=PB1 PWM=TIM1.2, max duty {}",
            config.max_duty()
        );
        info!("starting main loop, drive enabled = {}", enabled);

        (
            Shared { drive, enabled },
            Local { led1, on_off_sw },
        )
    }

    #[idle(shared = [drive, enabled])]
    fn idle(mut ctx: idle::Context) -> ! {
        let mut step = 0;
        loop {
            let (left, right) = board::DRIVE_PATTERN[step];

            (&mut ctx.shared.drive, &mut ctx.shared.enabled).lock(|drive, enabled| {
                if *enabled {
                    drive.set_speed_left(left);
                    drive.set_speed_right(right);
                    info!("left {}, right {}", drive.state(Side::Left), drive.state(Side::Right));
                }
            });

            cortex_m::asm::delay(board::STEP_CYCLES);
            step = (step + 1) % board::DRIVE_PATTERN.len();
        }
    }

    #[task(binds = EXTI15_10, local = [led1, on_off_sw], shared = [drive, enabled], priority = 2)]
    fn on_off_switch(mut ctx: on_off_switch::Context) {
        let sw = ctx.local.on_off_sw;
        sw.clear_interrupt_pending_bit();

        let released = sw.is_high().unwrap_or(false);

        (&mut ctx.shared.drive, &mut ctx.shared.enabled).lock(|drive, enabled| {
            *enabled = released;
            if !released {
                drive.stop_all();
            }
        });

        if released {
            ctx.local.led1.set_high().ok();
            info!("drive enabled");
        } else {
            ctx.local.led1.set_low().ok();
            warn!("stop switch pressed, motors coasting");
        }
    }
}
