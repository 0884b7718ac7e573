//! Random helpers for seeding particle state.
//!
//! Only initialization draws random numbers. The per-frame update path is
//! fully deterministic once positions and velocities are set.

use crate::bounds::BoundingVolume;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Samples shorter than this are redrawn before normalizing.
const MIN_DIRECTION_LENGTH: f32 = 1e-4;

/// Random source used while seeding particles.
///
/// ```ignore
/// let mut spawner = Spawner::seeded(7);
/// let velocity = spawner.random_direction() * 0.01;
/// let position = spawner.random_in_volume(&volume);
/// ```
pub struct Spawner {
    rng: SmallRng,
}

impl Spawner {
    /// Spawner seeded from the system clock, different on every run.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    /// Spawner with a fixed seed, reproducible across runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, clock-seeded otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }

    /// Random point inside a cube of given half-size, centered at origin.
    ///
    /// The sign of `half_size` is ignored and a zero size yields the origin.
    pub fn random_in_cube(&mut self, half_size: f32) -> Vec3 {
        self.random_in_volume(&BoundingVolume::cube(Vec3::ZERO, half_size))
    }

    /// Random point inside an axis-aligned volume.
    ///
    /// Degenerate axes (zero half extent) collapse to the center.
    pub fn random_in_volume(&mut self, volume: &BoundingVolume) -> Vec3 {
        let unit = Vec3::new(
            self.rng.gen_range(-1.0..1.0),
            self.rng.gen_range(-1.0..1.0),
            self.rng.gen_range(-1.0..1.0),
        );
        volume.center + unit * volume.half_extents
    }

    /// Random unit vector.
    ///
    /// Drawn uniformly from the `[-1, 1]` cube and normalized, which slightly
    /// favours the cube diagonals over a true spherical distribution.
    pub fn random_direction(&mut self) -> Vec3 {
        loop {
            let v = self.random_in_cube(1.0);
            if v.length() > MIN_DIRECTION_LENGTH {
                return v.normalize();
            }
        }
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}
