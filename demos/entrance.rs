//! The four-corner entrance flourish.
//!
//! Both left corners scatter immediately, both right corners follow
//! 100 ms later. Click anywhere to keep scattering.

use kumkum::prelude::*;

fn main() -> Result<(), kumkum::SimulationError> {
    let (width, height) = (1280u32, 720u32);

    Simulation::new()
        .with_title("Kumkum - entrance")
        .with_size(width, height)
        .with_emitter(Emitter::entrance(width as f32, height as f32))
        .run()
}
