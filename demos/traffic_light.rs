//! Traffic Light State Machine
//!
//! This example demonstrates a cyclic machine driven by a fixed tick loop.
//!
//! Key concepts:
//! - States own their own timers and post `Timeout` from `on_update`
//! - Capacities fixed at compile time, no allocation in the loop
//! - A pedestrian request handled only where a transition exists
//!
//! Run with: cargo run --example traffic_light

use fixedstate::core::{Context, State};
use fixedstate::{id_enum, MachineBuilder};

id_enum! {
    enum Light {
        Red,
        Green,
        Yellow,
    }
}

id_enum! {
    enum Signal {
        Timeout,
        Walk,
    }
}

struct Lamp {
    light: Light,
    duration: u32,
    elapsed: u32,
}

impl Lamp {
    fn new(light: Light, duration: u32) -> Self {
        Self {
            light,
            duration,
            elapsed: 0,
        }
    }
}

impl State<Light, Signal> for Lamp {
    fn id(&self) -> Light {
        self.light
    }

    fn name(&self) -> &str {
        self.light.name()
    }

    fn on_enter(&mut self, ctx: &mut Context<'_, Light, Signal>) {
        self.elapsed = 0;
        println!("  -> {} (trigger: {:?})", self.light.name(), ctx.trigger());
    }

    fn on_exit(&mut self, _ctx: &mut Context<'_, Light, Signal>) {
        println!("  <- {} after {} ticks", self.light.name(), self.elapsed);
    }

    fn on_update(&mut self, ctx: &mut Context<'_, Light, Signal>) {
        self.elapsed += 1;
        if self.elapsed >= self.duration {
            let _ = ctx.post_event(Signal::Timeout);
        }
    }
}

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let mut red = Lamp::new(Light::Red, 4);
    let mut green = Lamp::new(Light::Green, 5);
    let mut yellow = Lamp::new(Light::Yellow, 2);

    let mut machine = MachineBuilder::<'_, Light, Signal, 3, 12>::new()
        .state(&mut red)
        .state(&mut green)
        .state(&mut yellow)
        .transitions([
            (Light::Red, Signal::Timeout, Light::Green),
            (Light::Green, Signal::Timeout, Light::Yellow),
            (Light::Green, Signal::Walk, Light::Yellow),
            (Light::Yellow, Signal::Timeout, Light::Red),
        ])
        .initial(Light::Red)
        .build()
        .expect("traffic light definition is valid");

    for tick in 0..20 {
        if tick == 7 {
            println!("  pedestrian pressed walk");
            if let Err(err) = machine.handle_event(Signal::Walk) {
                println!("  walk ignored: {err}");
            }
        }
        if let Err(err) = machine.update() {
            println!("  update failed: {err}");
        }
    }

    println!("\nFinal state: {:?}", machine.current_state_id());
    println!("\n=== Example Complete ===");
}
