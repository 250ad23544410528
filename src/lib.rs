//! # Glyphswarm - Glyph Swarm Particle Engine
//!
//! Bitmap-to-particle choreography with a simple, driver-agnostic API.
//!
//! Glyphswarm turns a 2D bitmap (typically a scannable code produced by an
//! external encoder) into a 3D point cloud and animates a swarm of particles
//! through a looping four-phase lifecycle: free wander, spring assembly into
//! the glyph, a timed hold, and an explosive dispersal.
//!
//! ## Quick Start
//!
//! ```ignore
//! use glyphswarm::prelude::*;
//!
//! let mut sim = Choreography::new(Config::default());
//! sim.rebuild(&my_encoder, "HELLO WORLD")?;
//!
//! let mut time = Time::new();
//! loop {
//!     let (_, dt) = time.update();
//!     sim.tick(dt);
//!     // Hand the flat xyz array and the view-projection to your renderer.
//!     draw_points(sim.position_data(), sim.camera().view_proj());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Targets
//!
//! Every sufficiently bright bitmap pixel (sampled at a configurable stride)
//! becomes one target point on the z = 0 plane, and one particle. Particle
//! `i` always assembles to target `i`.
//!
//! ### Phases
//!
//! | Phase | Force model | Duration |
//! |-------|-------------|----------|
//! | Wander | deterministic noise drift in a soft z slab | random, configured range |
//! | Assemble | damped spring to the target | random, configured range |
//! | Hold | same spring, glyph pinned | fixed |
//! | Disperse | one-time blast, then drag | random, configured range |
//!
//! The cycle loops forever; see [`Phase`] and [`Config`] for the knobs.
//!
//! ### Ticks
//!
//! The driver calls [`Choreography::tick`] once per display frame with the
//! elapsed delta time. Deltas are clamped to a stable window, ticks never
//! fail, and all work happens synchronously on the calling thread.
//!
//! ### Rebuilds
//!
//! [`Choreography::rebuild`] runs an external [`BitmapEncoder`] and replaces
//! the whole population atomically. For asynchronous encoders, pair
//! [`Choreography::begin_rebuild`] with
//! [`Choreography::commit_rebuild`]; results arriving after
//! [`Choreography::dispose`] are silently discarded.

pub mod bitmap;
pub mod camera;
mod choreography;
pub mod config;
mod error;
pub mod integrator;
pub mod noise;
pub mod phase;
pub mod sampler;
pub mod store;
pub mod time;

pub use bitmap::{Bitmap, BitmapEncoder};
pub use bytemuck;
pub use camera::Camera;
pub use choreography::{Choreography, PendingRebuild};
pub use config::Config;
pub use error::{BitmapError, ChoreographyError};
pub use glam::{Mat4, Vec3};
pub use phase::{Phase, PhaseState};
pub use store::ParticleStore;
pub use time::Time;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use glyphswarm::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bitmap::{Bitmap, BitmapEncoder};
    pub use crate::camera::Camera;
    pub use crate::choreography::{Choreography, PendingRebuild};
    pub use crate::config::Config;
    pub use crate::error::{BitmapError, ChoreographyError};
    pub use crate::phase::{Phase, PhaseState};
    pub use crate::time::Time;
    pub use crate::{Mat4, Vec3};
}
