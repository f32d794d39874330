//! Driving the field without a window.
//!
//! Steps a canvas-backed field with a fixed delta, prints the lifecycle
//! counts as particles settle and fade, and saves the half-way frame as
//! a PNG. Shows the embedding API: the host owns the loop, the engine
//! never schedules itself.

use std::time::Duration;

use kumkum::prelude::*;

fn main() -> Result<(), kumkum::SnapshotError> {
    let mut field = ParticleField::new(800, 600).with_config(FieldConfig::default().seed(42));
    let mut time = Time::new();
    time.set_fixed_delta(Some(Duration::from_millis(16)));

    field.spread(400.0, 300.0);
    println!("spread: {} active", field.active().len());

    for frame in 1..=400u32 {
        time.update();
        field.tick(&time);
        field.render();

        if frame % 50 == 0 {
            println!(
                "frame {frame:3}: {:2} active, {:2} settled",
                field.active().len(),
                field.settled().len()
            );
        }
        if frame == 100 {
            field.snapshot("headless-frame-100.png")?;
        }
    }

    println!("final: {} particles left", field.len());
    Ok(())
}
