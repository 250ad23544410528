//! Bitmap sampling: pixels to target points.
//!
//! Scans a bitmap at a configurable stride and turns every sufficiently
//! bright pixel into a 3D target point on the z = 0 plane. The pixel grid is
//! mapped onto a world-space rectangle [`Config::world_width`] wide, with the
//! height following the bitmap's aspect ratio and image rows flipped so the
//! top of the bitmap ends up at positive y.
//!
//! Output order is row-major and deterministic for a given bitmap; only the
//! optional jitter draws from the general random source.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::bitmap::Bitmap;
use crate::config::Config;

/// Sample target points from `bitmap` per the sampling knobs in `config`.
///
/// A pixel yields a target iff its mean-channel brightness is at least
/// `config.brightness_threshold`. The point count is data-dependent; tune it
/// indirectly through `sample_stride` and the threshold.
pub fn sample_targets(bitmap: &Bitmap, config: &Config, rng: &mut SmallRng) -> Vec<Vec3> {
    let stride = config.sample_stride.max(1);
    let half_width = config.world_width * 0.5;
    let half_height = half_width * bitmap.height as f32 / bitmap.width.max(1) as f32;

    // Normalization denominators, guarded for degenerate bitmap sizes.
    let span_x = bitmap.width.saturating_sub(1).max(1) as f32;
    let span_y = bitmap.height.saturating_sub(1).max(1) as f32;

    let mut targets = Vec::new();
    let mut y = 0;
    while y < bitmap.height {
        let mut x = 0;
        while x < bitmap.width {
            if bitmap.brightness(x, y) >= config.brightness_threshold {
                // NDC in [-1, 1], y flipped: image rows grow downward.
                let nx = (x as f32 / span_x) * 2.0 - 1.0;
                let ny = 1.0 - (y as f32 / span_y) * 2.0;
                let mut point = Vec3::new(nx * half_width, ny * half_height, 0.0);
                if config.jitter > 0.0 {
                    let half = config.jitter * 0.5;
                    point.x += rng.gen_range(-half..half);
                    point.y += rng.gen_range(-half..half);
                }
                targets.push(point);
            }
            x += stride;
        }
        y += stride;
    }
    targets
}
