//! Network configuration builder.
//!
//! Everything here is fixed once a [`Network`](crate::Network) is built.
//! Defaults reproduce the brain visual the crate was written for: every
//! second mesh vertex, scaled by 15, at most 10 lines per particle and a
//! reach of 1.2 world units.

use glam::Vec3;

use crate::bounds::BoundingVolume;
use crate::error::{NetworkError, Result};

/// Default mesh-vertex decimation factor.
pub const DEFAULT_SAMPLING_COEFFICIENT: usize = 2;
/// Default position scale applied to source vertices.
pub const DEFAULT_SCALE_FACTOR: f32 = 15.0;
/// Default per-particle connection cap.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
/// Default reach below which two particles connect.
pub const DEFAULT_MIN_DISTANCE: f32 = 1.2;
/// Speed of mesh-derived particles, in world units per frame.
pub const DEFAULT_MESH_DAMPING: f32 = 0.01;
/// Speed of ambient particles, in world units per frame.
pub const DEFAULT_AMBIENT_DAMPING: f32 = 0.005;
/// Divisor turning the source box size into half extents.
pub const DEFAULT_BOUNDS_DIVISOR: f32 = 2.0;

/// How ambient particles behave at the edge of their spawn volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbientBoundary {
    /// Drift forever.
    Unbounded,
    /// Re-enter from the opposite face.
    #[default]
    Wrap,
    /// Bounce off the spawn volume with the mesh reflection rule.
    Reflect,
}

/// Ambient particles seeded outside the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientConfig {
    /// Number of ambient particles appended after the mesh particles.
    pub count: usize,
    /// Volume they spawn in (and wrap or bounce in).
    pub volume: BoundingVolume,
    /// Speed in world units per frame.
    pub damping: f32,
    /// Edge behaviour.
    pub boundary: AmbientBoundary,
}

impl AmbientConfig {
    /// `count` ambient particles in a cube of `half_size` around the origin.
    pub fn new(count: usize, half_size: f32) -> Self {
        Self {
            count,
            volume: BoundingVolume::cube(Vec3::ZERO, half_size),
            damping: DEFAULT_AMBIENT_DAMPING,
            boundary: AmbientBoundary::default(),
        }
    }

    /// Set the spawn volume.
    pub fn with_volume(mut self, volume: BoundingVolume) -> Self {
        self.volume = volume;
        self
    }

    /// Set the per-frame speed.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Set the edge behaviour.
    pub fn with_boundary(mut self, boundary: AmbientBoundary) -> Self {
        self.boundary = boundary;
        self
    }
}

/// Configuration for a particle network.
///
/// Use method chaining to configure, then pass it to
/// [`Network::new`](crate::Network::new).
///
/// The two distance bounds are independent. `min_distance` is the reach:
/// pairs closer than it connect. `max_distance` excludes pairs that are too
/// close, which keeps overlapping mesh and ambient points from drawing
/// zero-length lines. Either can be disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// Take every n-th source vertex.
    pub sampling_coefficient: usize,
    /// Per-axis scale applied to sampled vertices.
    pub scale_factor: f32,
    /// Mesh particle count override. Derived from the source when `None`.
    pub mesh_particles: Option<usize>,
    /// Connection cap per particle.
    pub max_connections: u32,
    /// Pairs connect only when strictly closer than this.
    pub min_distance: Option<f32>,
    /// Pairs connect only when strictly farther than this.
    pub max_distance: Option<f32>,
    /// Speed of mesh-derived particles.
    pub mesh_damping: f32,
    /// Extra room added to each face of the reflection box.
    pub boundary_margin: f32,
    /// Divisor applied when deriving the reflection box from the source.
    pub bounds_divisor: f32,
    /// Optional ambient particles.
    pub ambient: Option<AmbientConfig>,
    /// Seed for initial velocities and ambient positions.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self {
            sampling_coefficient: DEFAULT_SAMPLING_COEFFICIENT,
            scale_factor: DEFAULT_SCALE_FACTOR,
            mesh_particles: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_distance: Some(DEFAULT_MIN_DISTANCE),
            max_distance: None,
            mesh_damping: DEFAULT_MESH_DAMPING,
            boundary_margin: 0.0,
            bounds_divisor: DEFAULT_BOUNDS_DIVISOR,
            ambient: None,
            seed: None,
        }
    }

    /// Set the mesh-vertex decimation factor.
    pub fn with_sampling_coefficient(mut self, coefficient: usize) -> Self {
        self.sampling_coefficient = coefficient;
        self
    }

    /// Set the position scale.
    pub fn with_scale_factor(mut self, scale: f32) -> Self {
        self.scale_factor = scale;
        self
    }

    /// Use exactly `count` mesh particles instead of deriving it.
    pub fn with_mesh_particle_count(mut self, count: usize) -> Self {
        self.mesh_particles = Some(count);
        self
    }

    /// Set the per-particle connection cap.
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set (or disable) the connection reach.
    pub fn with_min_distance(mut self, distance: Option<f32>) -> Self {
        self.min_distance = distance;
        self
    }

    /// Set (or disable) the too-close exclusion.
    pub fn with_max_distance(mut self, distance: Option<f32>) -> Self {
        self.max_distance = distance;
        self
    }

    /// Set the speed of mesh-derived particles.
    pub fn with_mesh_damping(mut self, damping: f32) -> Self {
        self.mesh_damping = damping;
        self
    }

    /// Grow the reflection box by `margin` on every face.
    pub fn with_boundary_margin(mut self, margin: f32) -> Self {
        self.boundary_margin = margin;
        self
    }

    /// Set the divisor used to derive the reflection box.
    pub fn with_bounds_divisor(mut self, divisor: f32) -> Self {
        self.bounds_divisor = divisor;
        self
    }

    /// Add ambient particles.
    pub fn with_ambient(mut self, ambient: AmbientConfig) -> Self {
        self.ambient = Some(ambient);
        self
    }

    /// Seed the initial random state.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Mesh particles drawn from a source of `vertex_count` vertices.
    ///
    /// # Panics
    ///
    /// Panics if the count is derived and `sampling_coefficient` is zero,
    /// which [`validate`](Self::validate) rejects.
    pub fn mesh_particle_count(&self, vertex_count: usize) -> usize {
        match self.mesh_particles {
            Some(count) => count,
            None => vertex_count / self.sampling_coefficient,
        }
    }

    /// Number of ambient particles.
    pub fn ambient_particle_count(&self) -> usize {
        self.ambient.map_or(0, |a| a.count)
    }

    /// Check the configuration for values the algorithm cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.sampling_coefficient == 0 {
            return Err(invalid("sampling coefficient must be at least 1"));
        }
        if !self.scale_factor.is_finite() {
            return Err(invalid("scale factor must be finite"));
        }
        if self.max_connections == 0 {
            return Err(invalid("max connections must be at least 1"));
        }
        if let Some(min) = self.min_distance {
            if !(min.is_finite() && min > 0.0) {
                return Err(invalid(format!("min distance must be positive, got {}", min)));
            }
        }
        if let Some(max) = self.max_distance {
            if !(max.is_finite() && max >= 0.0) {
                return Err(invalid(format!("max distance must be non-negative, got {}", max)));
            }
        }
        if let (Some(min), Some(max)) = (self.min_distance, self.max_distance) {
            if max >= min {
                return Err(invalid(format!(
                    "empty distance window: max distance {} is not below min distance {}",
                    max, min
                )));
            }
        }
        if !(self.mesh_damping.is_finite() && self.mesh_damping >= 0.0) {
            return Err(invalid("mesh damping must be finite and non-negative"));
        }
        if !(self.boundary_margin.is_finite() && self.boundary_margin >= 0.0) {
            return Err(invalid("boundary margin must be finite and non-negative"));
        }
        if !(self.bounds_divisor.is_finite() && self.bounds_divisor > 0.0) {
            return Err(invalid("bounds divisor must be positive"));
        }
        if let Some(ambient) = &self.ambient {
            if !ambient.volume.half_extents.cmpgt(Vec3::ZERO).all() {
                return Err(invalid("ambient volume must have a positive size on every axis"));
            }
            if !(ambient.damping.is_finite() && ambient.damping >= 0.0) {
                return Err(invalid("ambient damping must be finite and non-negative"));
            }
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> NetworkError {
    NetworkError::InvalidConfig(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = NetworkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sampling_coefficient, 2);
        assert_eq!(config.min_distance, Some(1.2));
        assert_eq!(config.max_distance, None);
    }

    #[test]
    fn test_mesh_particle_count_floors() {
        let config = NetworkConfig::new().with_sampling_coefficient(3);
        assert_eq!(config.mesh_particle_count(10), 3);
        assert_eq!(config.with_mesh_particle_count(7).mesh_particle_count(10), 7);
    }

    #[test]
    fn test_zero_sampling_rejected() {
        let err = NetworkConfig::new().with_sampling_coefficient(0).validate().unwrap_err();
        assert!(matches!(err, NetworkError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_window_rejected() {
        let config = NetworkConfig::new()
            .with_min_distance(Some(1.0))
            .with_max_distance(Some(1.0));
        assert!(config.validate().is_err());

        let config = config.with_max_distance(Some(0.5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bounds_independently_optional() {
        let config = NetworkConfig::new()
            .with_min_distance(None)
            .with_max_distance(Some(3.0));
        assert!(config.validate().is_ok());
        assert!(NetworkConfig::new().with_min_distance(Some(-1.0)).validate().is_err());
    }

    #[test]
    fn test_ambient_volume_must_be_solid() {
        let flat = AmbientConfig::new(10, 1.0)
            .with_volume(BoundingVolume::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0)));
        let config = NetworkConfig::new().with_ambient(flat);
        assert!(config.validate().is_err());
        assert_eq!(config.ambient_particle_count(), 10);
    }
}
