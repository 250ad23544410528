//! Simulation configuration.
//!
//! Every numeric knob of the choreography lives here, with defaults tuned for
//! a scannable-code glyph of a few thousand particles at 60 ticks per second.
//! The struct is plain data: construct it, tweak fields, hand it to
//! [`Choreography::new`](crate::Choreography::new). It is never mutated during
//! a run.
//!
//! # Example
//!
//! ```ignore
//! let config = Config {
//!     world_width: 4.0,
//!     sample_stride: 3,
//!     ..Config::default()
//! };
//! let sim = Choreography::new(config);
//! ```
//!
//! Out-of-range values (negative durations, zero stride) are not validated
//! here; loading and validating external configuration is the caller's
//! concern.

use std::ops::Range;

/// All tunable knobs for sampling, spawning, and the four-phase lifecycle.
#[derive(Debug, Clone)]
pub struct Config {
    // ========== Assembly spring ==========
    /// Spring stiffness pulling particles toward their targets during
    /// Assemble and Hold.
    pub spring_stiffness: f32,
    /// Multiplicative per-tick velocity decay in (0, 1). Applied as a factor,
    /// not a drag force, so stability does not depend on stiffness.
    pub damping: f32,

    // ========== Wander ==========
    /// Strength of the deterministic wander perturbation.
    pub wander_strength: f32,
    /// Half-range of the soft z slab that confines wandering particles.
    pub z_half_range: f32,

    // ========== Phase durations (seconds) ==========
    /// Duration range sampled on entering Wander.
    pub wander_duration: Range<f32>,
    /// Duration range sampled on entering Assemble.
    pub assemble_duration: Range<f32>,
    /// Fixed duration of Hold.
    pub hold_seconds: f32,
    /// Duration range sampled on entering Disperse.
    pub disperse_duration: Range<f32>,

    // ========== Disperse blast ==========
    /// Speed range for the one-time blast velocity on entering Disperse.
    pub blast_speed: Range<f32>,
    /// Per-reference-tick velocity decay factor during Disperse, in (0, 1).
    pub blast_drag: f32,

    // ========== Spawn volume ==========
    /// XY spawn half-extents as a multiple of half the world width.
    pub spawn_spread_xy: f32,
    /// Z spawn half-extent as a multiple of `z_half_range`.
    pub spawn_spread_z: f32,

    // ========== Bitmap sampling ==========
    /// Pixel step between samples; 1 samples every pixel. Must be >= 1.
    pub sample_stride: u32,
    /// Minimum mean-channel brightness (0-255) for a pixel to yield a target.
    pub brightness_threshold: f32,
    /// Magnitude of uniform in-plane jitter added to each target, in world
    /// units. Each axis receives an independent offset in [-jitter/2, +jitter/2].
    pub jitter: f32,

    // ========== World mapping ==========
    /// World-space width the bitmap maps onto; height follows the bitmap's
    /// aspect ratio.
    pub world_width: f32,
    /// Visual size hint for the render collaborator. Not used by the
    /// simulation itself.
    pub particle_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spring_stiffness: 8.0,
            damping: 0.9,

            wander_strength: 3.0,
            z_half_range: 0.6,

            wander_duration: 3.0..6.0,
            assemble_duration: 4.0..7.0,
            hold_seconds: 3.0,
            disperse_duration: 2.0..4.0,

            blast_speed: 2.0..5.0,
            blast_drag: 0.96,

            spawn_spread_xy: 2.5,
            spawn_spread_z: 2.0,

            sample_stride: 2,
            brightness_threshold: 128.0,
            jitter: 0.02,

            world_width: 3.0,
            particle_size: 0.015,
        }
    }
}
