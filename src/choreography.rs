//! The choreography engine.
//!
//! [`Choreography`] owns the whole simulation: the sampled target points, the
//! particle store, the phase state machine, and the general random source. An
//! external driver feeds it a bitmap on (re)initialization and one `tick` per
//! display frame; the render collaborator reads the position array back out
//! after each tick.
//!
//! # Quick Start
//!
//! ```ignore
//! use glyphswarm::prelude::*;
//!
//! let mut sim = Choreography::new(Config::default());
//! sim.rebuild(&encoder, "HELLO")?;
//!
//! loop {
//!     sim.tick(dt);
//!     submit_points(sim.position_data(), sim.camera().view_proj());
//! }
//! ```
//!
//! # Rebuilds and disposal
//!
//! A rebuild replaces targets and particles wholesale and resets the phase to
//! Wander. When bitmap production is asynchronous, take a [`PendingRebuild`]
//! handle first; a result committed after [`Choreography::dispose`] is
//! silently discarded, so a late callback can never resurrect a torn-down
//! scene. Everything runs on the caller's thread: one tick finishes before
//! the next begins, and the position array is stable between ticks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::bitmap::{Bitmap, BitmapEncoder};
use crate::camera::Camera;
use crate::config::Config;
use crate::error::ChoreographyError;
use crate::integrator;
use crate::phase::{Phase, PhaseState};
use crate::sampler;
use crate::store::ParticleStore;

/// Handle for an in-flight asynchronous rebuild.
///
/// Carries a reference to the engine's disposed flag; committing through a
/// handle whose engine has since been disposed is a no-op. The handle makes
/// no attempt to guard against overlapping rebuilds; avoiding that race is
/// the driver's job.
pub struct PendingRebuild {
    disposed: Arc<AtomicBool>,
}

/// The particle choreography engine. See the module docs for the lifecycle.
pub struct Choreography {
    config: Config,
    targets: Vec<Vec3>,
    store: ParticleStore,
    state: PhaseState,
    camera: Camera,
    rng: SmallRng,
    /// Accumulated clamped tick time; drives the wander noise quantum.
    clock: f32,
    /// Bumped on every rebuild and on disposal, so the render collaborator
    /// knows its buffers for the old population are stale.
    generation: u64,
    disposed: Arc<AtomicBool>,
}

impl Choreography {
    /// Create an engine with no particles; call [`rebuild`](Self::rebuild)
    /// (or commit a pending one) to populate it.
    pub fn new(config: Config) -> Self {
        let rng = SmallRng::from_entropy();
        Self::with_rng(config, rng)
    }

    /// Create an engine with a seeded random source, for reproducible runs.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, mut rng: SmallRng) -> Self {
        let state = PhaseState::enter(Phase::Wander, &config, &mut rng);
        let camera = Camera::new(config.world_width);
        Self {
            config,
            targets: Vec::new(),
            store: ParticleStore::empty(),
            state,
            camera,
            rng,
            clock: 0.0,
            generation: 0,
            disposed: Arc::new(AtomicBool::new(false)),
        }
    }

    // ========== Rebuild ==========

    /// Produce a bitmap for `text` through `encoder` and reinitialize the
    /// population from it.
    ///
    /// On encoder failure nothing is mutated: the previous targets, particles
    /// and phase all survive.
    pub fn rebuild(
        &mut self,
        encoder: &dyn BitmapEncoder,
        text: &str,
    ) -> Result<(), ChoreographyError> {
        if self.is_disposed() {
            return Err(ChoreographyError::Disposed);
        }
        let bitmap = encoder.encode(text)?;
        self.apply_bitmap(&bitmap);
        Ok(())
    }

    /// Begin an asynchronous rebuild: hand the returned handle to whatever
    /// produces the bitmap and commit the result when it arrives.
    pub fn begin_rebuild(&self) -> PendingRebuild {
        PendingRebuild {
            disposed: self.disposed.clone(),
        }
    }

    /// Commit the result of an asynchronous rebuild.
    ///
    /// Returns `true` if the bitmap was applied. A result arriving after
    /// disposal is silently discarded and `false` is returned.
    pub fn commit_rebuild(&mut self, pending: PendingRebuild, bitmap: &Bitmap) -> bool {
        if pending.disposed.load(Ordering::SeqCst) {
            return false;
        }
        self.apply_bitmap(bitmap);
        true
    }

    /// Sample targets from an already-produced bitmap and reinitialize.
    pub fn rebuild_from_bitmap(&mut self, bitmap: &Bitmap) -> Result<(), ChoreographyError> {
        if self.is_disposed() {
            return Err(ChoreographyError::Disposed);
        }
        self.apply_bitmap(bitmap);
        Ok(())
    }

    /// Replace targets, store, and phase atomically.
    fn apply_bitmap(&mut self, bitmap: &Bitmap) {
        let targets = sampler::sample_targets(bitmap, &self.config, &mut self.rng);
        self.store = ParticleStore::rebuild(targets.len(), &self.config, &mut self.rng);
        self.targets = targets;
        self.state = PhaseState::enter(Phase::Wander, &self.config, &mut self.rng);
        self.generation += 1;
    }

    // ========== Simulation ==========

    /// Advance the simulation by `dt` seconds.
    ///
    /// The delta is clamped to the integrator's stable window, so a huge or
    /// negative delta (resume after a pause, a wrapped timer) behaves like a
    /// clamped one. No-op after disposal.
    pub fn tick(&mut self, dt: f32) {
        if self.is_disposed() {
            return;
        }
        let dt = integrator::clamp_dt(dt);
        self.clock += dt;

        integrator::step(
            &mut self.store,
            &self.targets,
            self.state.phase,
            &self.config,
            dt,
            self.clock,
        );

        if let Some(entered) = self.state.advance(dt, &self.config, &mut self.rng) {
            self.on_enter(entered);
        }
    }

    /// Force-jump to `phase`, running its entry effects. Primarily for tests
    /// and manual control. No-op after disposal.
    pub fn set_phase(&mut self, phase: Phase) {
        if self.is_disposed() {
            return;
        }
        self.state = PhaseState::enter(phase, &self.config, &mut self.rng);
        self.on_enter(phase);
    }

    /// One-time entry effects. Entering Disperse reassigns every velocity to
    /// a blast; the other phases have none.
    fn on_enter(&mut self, phase: Phase) {
        if phase == Phase::Disperse {
            self.store.blast(&mut self.rng, &self.config.blast_speed);
        }
    }

    // ========== Output surface ==========

    /// Particle positions, one per sampled target.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        self.store.positions()
    }

    /// Particle velocities, for inspection.
    #[inline]
    pub fn velocities(&self) -> &[Vec3] {
        self.store.velocities()
    }

    /// Positions as a flat `&[f32]` for draw submission.
    #[inline]
    pub fn position_data(&self) -> &[f32] {
        self.store.position_data()
    }

    /// The sampled target points of the current glyph.
    #[inline]
    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    /// Number of particles (equals the number of sampled targets).
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    /// The particle store.
    #[inline]
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// The active phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// The full phase state (phase, elapsed, duration).
    #[inline]
    pub fn phase_state(&self) -> &PhaseState {
        &self.state
    }

    /// The configuration this engine was built with.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Population generation, bumped whenever the arrays are replaced.
    ///
    /// A renderer holding GPU-side copies should dispose and recreate them
    /// whenever this changes.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ========== Viewport ==========

    /// Update the consuming camera's aspect ratio. Never touches simulation
    /// state.
    pub fn resize(&mut self, view_width: f32, view_height: f32) {
        self.camera.set_viewport(view_width, view_height);
    }

    /// The consuming camera.
    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access to the consuming camera, for orbit controls.
    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    // ========== Disposal ==========

    /// Release held buffers and mark the engine disposed.
    ///
    /// Idempotent. Afterwards ticks, phase jumps, and commits of pending
    /// rebuilds are all no-ops, and `rebuild` returns an error.
    pub fn dispose(&mut self) {
        if !self.is_disposed() {
            self.generation += 1;
        }
        self.disposed.store(true, Ordering::SeqCst);
        self.store = ParticleStore::empty();
        self.targets = Vec::new();
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}
