//! Deterministic wander noise.
//!
//! A cheap, stateless pseudo-random source built from sine-fract hashes, the
//! same family of hashes shader code uses for per-particle randomness. It is
//! deliberately separate from the crate's general random source: spawn layout
//! and wander motion stay reproducible per particle index, while phase
//! durations and blast directions keep using true randomness that tests can
//! seed independently.
//!
//! All functions here are pure: the same input always produces the same
//! output.

use glam::Vec3;

/// Wander inputs are re-rolled once per this many seconds, so the perturbation
/// direction holds briefly and then jumps, reading as aimless drift rather
/// than white noise.
pub const WANDER_QUANTUM: f32 = 0.1;

/// Per-axis salts. Large irrational-like multipliers keep the three channels
/// decorrelated.
const SALT_X: f32 = 12.9898;
const SALT_Y: f32 = 78.233;
const SALT_Z: f32 = 37.719;
const SCALE: f32 = 43758.547;

/// Positive fractional part, in [0, 1) for any finite input.
#[inline]
fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Hash a scalar to a scalar in [0, 1).
#[inline]
pub fn hash11(n: f32) -> f32 {
    fract((n * SALT_X).sin() * SCALE)
}

/// Hash a scalar to a vector in [0, 1)^3.
#[inline]
pub fn hash31(n: f32) -> Vec3 {
    Vec3::new(
        fract((n * SALT_X).sin() * SCALE),
        fract((n * SALT_Y).sin() * SCALE),
        fract((n * SALT_Z).sin() * SCALE),
    )
}

/// Spawn placement hash for particle `index`, in [0, 1)^3.
///
/// Offset from the wander stream so a particle's spawn point and its wander
/// perturbation at t=0 are unrelated.
#[inline]
pub fn spawn(index: u32) -> Vec3 {
    hash31(index as f32 * 1.618 + 0.377)
}

/// Wander perturbation for particle `index` at simulation time `time`, in
/// [0, 1)^3.
///
/// Time is quantized to [`WANDER_QUANTUM`] before hashing, so the output
/// varies over a run without consuming any random state.
#[inline]
pub fn wander(index: u32, time: f32) -> Vec3 {
    let quantum = (time / WANDER_QUANTUM).floor();
    hash31(index as f32 + quantum * 57.31)
}
