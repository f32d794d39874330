use kumkum::prelude::*;

fn main() -> Result<(), kumkum::SimulationError> {
    let (width, height) = (1280, 720);

    Simulation::new()
        .with_title("Kumkum - click to scatter")
        .with_size(width, height)
        .with_emitter(Emitter::entrance(width as f32, height as f32))
        .run()
}
