//! Frame driver tying the particle store and the proximity graph together.

use std::ops::Range;

use crate::bounds::BoundingVolume;
use crate::config::NetworkConfig;
use crate::error::Result;
use crate::graph::{ConnectionParams, LineBuffer, ProximityGraph};
use crate::particle::Particle;
use crate::spawn::Spawner;
use crate::store::ParticleStore;

/// A running particle network.
///
/// Owns all simulation state. The host calls [`advance`](Network::advance)
/// once per rendered frame; nothing happens between calls.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    bounds: BoundingVolume,
    store: ParticleStore,
    graph: ProximityGraph,
    frame: u64,
}

impl Network {
    /// Seed a network from flat source vertex positions.
    ///
    /// The reflection box is derived from the source, scaled like the
    /// particles and divided by `bounds_divisor`.
    pub fn new(source: &[f32], config: NetworkConfig) -> Result<Self> {
        config.validate()?;

        let bounds =
            BoundingVolume::from_positions(source, config.scale_factor, config.bounds_divisor)?;
        let mut spawner = Spawner::from_seed(config.seed);
        let store = ParticleStore::initialize(source, &config, &mut spawner)?;

        Ok(Self::assemble(store, bounds, config))
    }

    /// Network over explicit particles and an explicit reflection box.
    ///
    /// Sampling, scale, damping and seed settings are ignored; the boundary
    /// margin and ambient boundary rule still apply.
    pub fn from_particles(
        particles: Vec<Particle>,
        bounds: BoundingVolume,
        config: NetworkConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut store =
            ParticleStore::from_particles(particles).with_boundary_margin(config.boundary_margin);
        if let Some(ambient) = &config.ambient {
            store = store.with_ambient_boundary(ambient.volume, ambient.boundary);
        }

        Ok(Self::assemble(store, bounds, config))
    }

    fn assemble(store: ParticleStore, bounds: BoundingVolume, config: NetworkConfig) -> Self {
        let params = ConnectionParams::from_config(&config);
        let graph = ProximityGraph::new(store.len(), params);

        log::debug!(
            "network ready: {} mesh + {} ambient particles, line capacity {} segments",
            store.mesh_count(),
            store.len() - store.mesh_count(),
            graph.lines().capacity()
        );
        if store.len() < 2 {
            log::warn!("network has {} particles, no lines can form", store.len());
        }

        Self {
            config,
            bounds,
            store,
            graph,
            frame: 0,
        }
    }

    /// Run one frame: move every particle, then rebuild the lines.
    pub fn advance(&mut self) -> Frame<'_> {
        self.store.step(&self.bounds);
        self.graph.rebuild(&mut self.store);
        self.frame += 1;
        self.current()
    }

    /// Output of the last frame without advancing.
    pub fn current(&self) -> Frame<'_> {
        Frame {
            positions: self.store.positions(),
            lines: self.graph.lines(),
        }
    }

    /// Particle state.
    #[inline]
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// Graph state.
    #[inline]
    pub fn graph(&self) -> &ProximityGraph {
        &self.graph
    }

    /// Reflection box for mesh particles.
    #[inline]
    pub fn bounds(&self) -> &BoundingVolume {
        &self.bounds
    }

    /// Configuration the network was built with.
    #[inline]
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Frames advanced so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

/// Borrowed view of one frame's output buffers.
///
/// Line buffers are returned at full capacity. Only the first
/// `2 * segment_count()` vertices are meaningful; see [`Frame::draw_range`].
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    positions: &'a [f32],
    lines: &'a LineBuffer,
}

impl<'a> Frame<'a> {
    /// Particle positions, `3 * particle_count` floats.
    #[inline]
    pub fn particle_positions(&self) -> &'a [f32] {
        self.positions
    }

    /// Number of particles.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Full line position buffer, stale tail included.
    #[inline]
    pub fn line_positions(&self) -> &'a [f32] {
        self.lines.positions()
    }

    /// Full line color buffer, stale tail included.
    #[inline]
    pub fn line_colors(&self) -> &'a [f32] {
        self.lines.colors()
    }

    /// Line positions written this frame.
    #[inline]
    pub fn valid_line_positions(&self) -> &'a [f32] {
        self.lines.valid_positions()
    }

    /// Line colors written this frame.
    #[inline]
    pub fn valid_line_colors(&self) -> &'a [f32] {
        self.lines.valid_colors()
    }

    /// Segments written this frame.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.lines.segment_count()
    }

    /// Vertex range to draw as a line list.
    #[inline]
    pub fn draw_range(&self) -> Range<u32> {
        self.lines.draw_range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::SourceMesh;
    use glam::Vec3;

    #[test]
    fn test_new_derives_bounds_from_scaled_source() {
        let mesh = SourceMesh::from_points(&[Vec3::splat(-1.0), Vec3::splat(1.0)]);
        let config = NetworkConfig::new()
            .with_sampling_coefficient(1)
            .with_scale_factor(3.0)
            .with_seed(1);
        let network = Network::new(mesh.positions(), config).unwrap();
        assert_eq!(network.bounds().half_extents, Vec3::splat(3.0));
        assert_eq!(network.store().len(), 2);
    }

    #[test]
    fn test_invalid_config_rejected_before_seeding() {
        let config = NetworkConfig::new().with_max_connections(0);
        assert!(Network::new(&[0.0; 9], config).is_err());
    }

    #[test]
    fn test_advance_counts_frames() {
        let particles = vec![
            Particle::mesh(Vec3::ZERO, Vec3::new(0.01, 0.0, 0.0)),
            Particle::mesh(Vec3::new(0.5, 0.0, 0.0), Vec3::ZERO),
        ];
        let mut network =
            Network::from_particles(particles, BoundingVolume::default(), NetworkConfig::new()).unwrap();

        assert_eq!(network.current().segment_count(), 0);
        let frame = network.advance();
        assert_eq!(frame.segment_count(), 1);
        assert_eq!(frame.particle_count(), 2);
        assert_eq!(frame.draw_range(), 0..2);
        assert_eq!(network.frame_count(), 1);
    }

    #[test]
    fn test_seeded_networks_match() {
        let mesh = SourceMesh::ellipsoid(Vec3::new(0.3, 0.25, 0.35), 12, 8);
        let config = NetworkConfig::new().with_seed(17);
        let mut a = Network::new(mesh.positions(), config.clone()).unwrap();
        let mut b = Network::new(mesh.positions(), config).unwrap();
        for _ in 0..20 {
            let fa = a.advance();
            let fb = b.advance();
            assert_eq!(fa.particle_positions(), fb.particle_positions());
            assert_eq!(fa.valid_line_positions(), fb.valid_line_positions());
        }
    }
}
