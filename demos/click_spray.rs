//! Click-to-scatter with a custom golden palette and a strict capacity.
//!
//! Demonstrates hoisted configuration: palettes, batch size and the
//! particle ceiling are all data. Press M to toggle the (silent) cue
//! mute, Space to pause, S to save a snapshot.

use kumkum::prelude::*;

/// Prints instead of playing audio, to show where a real bell would go.
struct PrintedBell;

impl Chime for PrintedBell {
    fn ring(&mut self) {
        println!("*ding*");
    }
}

fn main() -> Result<(), kumkum::SimulationError> {
    let mut config = FieldConfig::default()
        .capacity(Capacity::Bounded {
            limit: 2_000,
            policy: EvictionPolicy::DropOldest,
        })
        .kumkum_palette(Palette::Custom(vec![
            Color::rgb(0xc9, 0xa2, 0x27), // Antique gold
            Color::rgb(0xe8, 0xc5, 0x4a), // Bright gold
            Color::rgb(0xa8, 0x85, 0x1f), // Deep gold
        ]));
    // A heavier toss than the default.
    config.kumkum.count = 40;
    config.kumkum.speed = 5.0..14.0;

    let audio = AudioSettings::new();

    Simulation::new()
        .with_title("Kumkum - golden spray")
        .with_size(1024, 768)
        .with_config(config)
        .with_audio(audio)
        .with_chime(Box::new(PrintedBell))
        .run()
}
