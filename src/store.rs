//! Particle storage and per-frame integration.

use glam::Vec3;

use crate::bounds::BoundingVolume;
use crate::config::{AmbientBoundary, AmbientConfig, NetworkConfig};
use crate::error::{NetworkError, Result};
use crate::particle::Particle;
use crate::spawn::Spawner;

/// Fixed-size set of particles.
///
/// Mesh-derived particles come first, ambient particles after them. The set
/// never grows or shrinks; only the contents change. A flat copy of the
/// positions is kept alongside for renderers, refreshed on every step.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    positions: Vec<Vec3>,
    boundary_margin: f32,
    ambient_volume: BoundingVolume,
    ambient_boundary: AmbientBoundary,
}

impl ParticleStore {
    /// Seed a particle set from flat source positions.
    ///
    /// Mesh particle `i` sits on source vertex `i * sampling_coefficient`,
    /// scaled by `scale_factor`, and heads off in a random direction at
    /// `mesh_damping` units per frame. Ambient particles are appended after
    /// them at random points in their spawn volume.
    ///
    /// The configuration is validated first.
    pub fn initialize(source: &[f32], config: &NetworkConfig, spawner: &mut Spawner) -> Result<Self> {
        config.validate()?;
        if source.len() % 3 != 0 {
            return Err(NetworkError::MalformedSource { len: source.len() });
        }

        let available = source.len() / 3;
        let coefficient = config.sampling_coefficient;
        let mesh_count = config.mesh_particle_count(available);
        let required = mesh_count * coefficient;
        if available < required {
            return Err(NetworkError::InvalidSource {
                required,
                available,
            });
        }

        let ambient = config.ambient;
        let total = mesh_count + ambient.map_or(0, |a| a.count);
        let mut particles = Vec::with_capacity(total);

        for i in 0..mesh_count {
            let base = i * coefficient * 3;
            let position = Vec3::new(source[base], source[base + 1], source[base + 2])
                * config.scale_factor;
            let velocity = spawner.random_direction() * config.mesh_damping;
            particles.push(Particle::mesh(position, velocity));
        }

        if let Some(ambient) = &ambient {
            for _ in 0..ambient.count {
                let position = spawner.random_in_volume(&ambient.volume);
                let velocity = spawner.random_direction() * ambient.damping;
                particles.push(Particle::ambient(position, velocity));
            }
        }

        let mut store = Self::from_particles(particles);
        store.boundary_margin = config.boundary_margin;
        store.set_ambient(ambient);
        Ok(store)
    }

    /// Store holding exactly these particles, with no margin and unbounded
    /// ambient particles.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        let positions = particles.iter().map(|p| p.position).collect();
        Self {
            particles,
            positions,
            boundary_margin: 0.0,
            ambient_volume: BoundingVolume::default(),
            ambient_boundary: AmbientBoundary::Unbounded,
        }
    }

    /// Set the reflection margin.
    pub fn with_boundary_margin(mut self, margin: f32) -> Self {
        self.boundary_margin = margin;
        self
    }

    /// Set how ambient particles treat their volume.
    pub fn with_ambient_boundary(mut self, volume: BoundingVolume, boundary: AmbientBoundary) -> Self {
        self.ambient_volume = volume;
        self.ambient_boundary = boundary;
        self
    }

    fn set_ambient(&mut self, ambient: Option<AmbientConfig>) {
        if let Some(ambient) = ambient {
            self.ambient_volume = ambient.volume;
            self.ambient_boundary = ambient.boundary;
        }
    }

    /// Advance every particle by one frame.
    ///
    /// Positions move by their velocity. A mesh particle that ends up past a
    /// face of `bounds` (grown by the margin) has that axis of its velocity
    /// negated; the other axes are untouched. Sitting exactly on a face does
    /// not count. Ambient particles
    /// follow their own boundary rule.
    pub fn step(&mut self, bounds: &BoundingVolume) {
        let mesh_box = bounds.inflated(self.boundary_margin);
        let ambient_box = self.ambient_volume;

        for (particle, mirror) in self.particles.iter_mut().zip(self.positions.iter_mut()) {
            particle.position += particle.velocity;

            if !particle.is_background() {
                reflect(particle, &mesh_box);
            } else {
                match self.ambient_boundary {
                    AmbientBoundary::Unbounded => {}
                    AmbientBoundary::Wrap => wrap(particle, &ambient_box),
                    AmbientBoundary::Reflect => reflect(particle, &ambient_box),
                }
            }

            *mirror = particle.position;
        }
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// `true` when the set holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// All particles in order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Particle positions as flat x,y,z triples, `3 * len()` floats.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Number of mesh-derived particles.
    pub fn mesh_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.is_background()).count()
    }
}

fn reflect(particle: &mut Particle, bounds: &BoundingVolume) {
    let outside = bounds.outside_mask(particle.position);
    if outside.x {
        particle.velocity.x = -particle.velocity.x;
    }
    if outside.y {
        particle.velocity.y = -particle.velocity.y;
    }
    if outside.z {
        particle.velocity.z = -particle.velocity.z;
    }
}

fn wrap(particle: &mut Particle, bounds: &BoundingVolume) {
    let min = bounds.min();
    let max = bounds.max();
    let size = bounds.size();
    for axis in 0..3 {
        let p = &mut particle.position[axis];
        if *p > max[axis] {
            *p -= size[axis];
        } else if *p < min[axis] {
            *p += size[axis];
        }
    }
}
