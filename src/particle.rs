//! Per-particle state.

use glam::Vec3;

/// A single point in the network.
///
/// `position` and `velocity` change every frame. The connection count is
/// owned by the graph builder: it is reset at the start of each rebuild and
/// only ever read by everyone else. Whether a particle is ambient is fixed
/// when it is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current position in world units.
    pub position: Vec3,
    /// Displacement applied per frame.
    pub velocity: Vec3,
    connection_count: u32,
    is_background: bool,
}

impl Particle {
    /// A mesh-derived particle. Reflects off the mesh bounding volume.
    pub fn mesh(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            connection_count: 0,
            is_background: false,
        }
    }

    /// An ambient particle. Exempt from mesh-boundary reflection.
    pub fn ambient(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            connection_count: 0,
            is_background: true,
        }
    }

    /// Connections accepted for this particle in the last rebuild.
    #[inline]
    pub fn connection_count(&self) -> u32 {
        self.connection_count
    }

    /// `true` for ambient particles.
    #[inline]
    pub fn is_background(&self) -> bool {
        self.is_background
    }

    #[inline]
    pub(crate) fn reset_connections(&mut self) {
        self.connection_count = 0;
    }

    #[inline]
    pub(crate) fn add_connection(&mut self) {
        self.connection_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        let m = Particle::mesh(Vec3::ZERO, Vec3::X);
        let a = Particle::ambient(Vec3::ONE, Vec3::Y);
        assert!(!m.is_background());
        assert!(a.is_background());
        assert_eq!(m.connection_count(), 0);
        assert_eq!(a.velocity, Vec3::Y);
    }

    #[test]
    fn test_connection_bookkeeping() {
        let mut p = Particle::mesh(Vec3::ZERO, Vec3::ZERO);
        p.add_connection();
        p.add_connection();
        assert_eq!(p.connection_count(), 2);
        p.reset_connections();
        assert_eq!(p.connection_count(), 0);
    }
}
