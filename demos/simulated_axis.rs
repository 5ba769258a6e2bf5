//! Example: an interrupt-driven axis against a simulated timer.
//!
//! This example demonstrates how to:
//! - Load timer limits and axis parameters from TOML
//! - Build a sequencer around an acceleration ramp
//! - Service timer expiries and retarget the ramp mid-move
//!
//! Run with: `cargo run --example simulated_axis --features std`

use std::cell::Cell;
use std::rc::Rc;

use interrupt_stepper::{
    parse_config, AccelRamp, Micros, PinActuator, SequencerBuilder, StepOutcome, Timestamp,
    TimerService,
};

const CONFIG: &str = r#"
[timers.tc0]
setup_latency_us = 8
min_period_us = 5
max_period_us = 102261126

[axes.x]
name = "X Axis"
timer = "tc0"
max_speed_steps_per_sec = 2000.0
acceleration_steps_per_sec2 = 4000.0
"#;

/// One-shot timer that only remembers the pending period.
struct SimTimer {
    pending: Rc<Cell<Option<u32>>>,
}

impl TimerService for SimTimer {
    fn arm(&mut self, period: Micros) {
        self.pending.set(Some(period.value()));
    }

    fn disarm(&mut self) {
        self.pending.set(None);
    }

    fn attach(&mut self, _callback: fn()) {}

    fn detach(&mut self) {}
}

/// Mock output pin for demonstration.
struct MockPin;

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Delay provider that just advances the simulated clock.
struct SimDelay {
    now: Rc<Cell<u32>>,
}

impl embedded_hal::delay::DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.now.set(self.now.get().wrapping_add(ns / 1_000));
    }
}

fn main() -> interrupt_stepper::Result<()> {
    println!("=== Simulated Interrupt Axis ===\n");

    let config = parse_config(CONFIG)?;
    let axis = config.axis("x").expect("axis 'x' is declared above");
    let setup_latency = config.timer_for_axis("x").map(|t| t.setup_latency.value()).unwrap_or(0);

    let now = Rc::new(Cell::new(0u32));
    let pending = Rc::new(Cell::new(None));
    let clock_now = now.clone();

    let mut x = SequencerBuilder::new()
        .from_config(&config, "x")?
        .timer(SimTimer { pending: pending.clone() })
        .actuator(PinActuator::new(MockPin, MockPin).invert_direction(axis.invert_direction))
        .source(AccelRamp::from_config(axis))
        .clock(move || Timestamp(clock_now.get()))
        .delay(SimDelay { now: now.clone() })
        .build()?;

    println!("Axis: {} (timer '{}')", axis.name, axis.timer);
    println!("Moving to 1200 steps...\n");
    println!("{:>8} {:>10} {:>10} {:>10}", "step", "t (us)", "interval", "reload");

    x.move_to(1200)?;

    let mut slowed = false;
    while let Some(period) = pending.get() {
        // The countdown starts `setup_latency` after it was armed
        now.set(now.get().wrapping_add(period + setup_latency));

        match x.on_step()? {
            StepOutcome::Scheduled(event) => {
                if x.position() % 100 == 0 {
                    println!(
                        "{:>8} {:>10} {:>10} {:>10}",
                        x.position(),
                        event.start_time.ticks(),
                        event.requested_interval.value(),
                        event.corrected_period.value()
                    );
                }
            }
            StepOutcome::Finished => println!("\nFinished at step {}", x.position()),
        }

        if !slowed && x.position() == 600 {
            println!("-- max speed lowered to 800 steps/s --");
            x.set_max_speed(800.0)?;
            slowed = true;
        }
    }

    println!("Elapsed: {:.3} s", now.get() as f32 / 1_000_000.0);
    println!("Running: {}", x.is_running());

    Ok(())
}
