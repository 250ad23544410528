//! Headless demo: run the choreography against a procedural glyph and print
//! what the swarm is doing.
//!
//! Run with: `cargo run --release [seconds]`

use glyphswarm::prelude::*;

/// Stand-in for a real QR/code encoder: hashes the text into a deterministic
/// checker glyph so different inputs produce different shapes.
struct PatternEncoder {
    size: u32,
}

impl BitmapEncoder for PatternEncoder {
    fn encode(&self, text: &str) -> Result<Bitmap, BitmapError> {
        if text.is_empty() {
            return Err(BitmapError::Encode("empty source text".into()));
        }
        // FNV-1a over the text picks the cell size, so the glyph tracks the
        // input without a real encoder dependency.
        let mut hash: u32 = 0x811c9dc5;
        for byte in text.bytes() {
            hash ^= byte as u32;
            hash = hash.wrapping_mul(0x0100_0193);
        }
        let cell = 2 + hash % 4;
        Ok(Bitmap::test_pattern(self.size, self.size, cell))
    }
}

fn main() {
    let seconds: f32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(20.0);

    let encoder = PatternEncoder { size: 64 };
    let mut sim = Choreography::new(Config::default());
    if let Err(e) = sim.rebuild(&encoder, "GLYPHSWARM") {
        eprintln!("rebuild failed: {}", e);
        return;
    }

    println!("=== Glyphswarm Demo ===");
    println!("Particles: {}", sim.particle_count());
    println!("Simulating {:.0}s at a fixed 60 ticks/s...", seconds);
    println!();

    let mut time = Time::new();
    time.set_fixed_delta(Some(1.0 / 60.0));

    let mut last_phase = sim.phase();
    println!("[{:>6.2}s] {:?}", 0.0, last_phase);

    while time.elapsed() < seconds {
        let (elapsed, dt) = time.update();
        sim.tick(dt);

        let phase = sim.phase();
        if phase != last_phase {
            let mean_speed: f32 = sim
                .velocities()
                .iter()
                .map(|v| v.length())
                .sum::<f32>()
                / sim.particle_count().max(1) as f32;
            println!(
                "[{:>6.2}s] {:?} (mean speed {:.3})",
                elapsed, phase, mean_speed
            );
            last_phase = phase;
        }
    }

    sim.dispose();
    println!();
    println!("Done after {} ticks.", time.frame());
}
