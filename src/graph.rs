//! Proximity graph construction.
//!
//! Every frame, all pairs of particles are tested against the distance
//! window and a per-particle connection cap. Accepted pairs are written as
//! line segments into fixed-capacity buffers that a renderer can upload
//! directly.
//!
//! The search is brute force, `O(N²)` per frame. Pair priority is decided by
//! index order: the lowest index claims its neighbours first, regardless of
//! distance.
//!
//! ## Valid range
//!
//! The line buffers are allocated once and never cleared. Only the first
//! `segment_count * 2` endpoints hold this frame's data; everything after
//! that is left over from earlier frames and must not be drawn. Use
//! [`LineBuffer::draw_range`] or the `valid_*` slices.

use std::ops::Range;

use glam::Vec3;

use crate::config::NetworkConfig;
use crate::store::ParticleStore;

/// Distance window and cap used by [`ProximityGraph::rebuild`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionParams {
    /// Connect only when strictly closer than this. `None` disables the reach.
    pub min_distance: Option<f32>,
    /// Connect only when strictly farther than this. `None` disables it.
    pub max_distance: Option<f32>,
    /// Maximum connections per particle per frame.
    pub max_connections: u32,
}

impl ConnectionParams {
    /// Pull the connection settings out of a network configuration.
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self {
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            max_connections: config.max_connections,
        }
    }

    /// Line intensity for a pair at `dist`, or `None` if the pair is
    /// outside the window.
    ///
    /// Intensity falls linearly from 1.0 at zero distance to 0.0 at the
    /// reach. Without a reach every accepted pair gets 1.0.
    #[inline]
    pub fn alpha(&self, dist: f32) -> Option<f32> {
        if let Some(max) = self.max_distance {
            if !(dist > max) {
                return None;
            }
        }
        match self.min_distance {
            Some(min) if dist < min => Some(1.0 - dist / min),
            Some(_) => None,
            None => Some(1.0),
        }
    }
}

/// Largest number of segments a frame can produce.
///
/// Every segment uses one connection slot on each of its two particles, so
/// the count is bounded both by the number of distinct pairs and by half
/// the total number of slots.
pub fn segment_capacity(particle_count: usize, max_connections: u32) -> usize {
    let pairs = particle_count * particle_count.saturating_sub(1) / 2;
    let slots = particle_count.saturating_mul(max_connections as usize) / 2;
    pairs.min(slots)
}

/// Fixed-capacity line segment buffers.
///
/// `positions` and `colors` hold one `Vec3` per endpoint, two endpoints per
/// segment. Colors are grayscale, the intensity repeated in all three
/// channels.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    segment_count: usize,
}

impl LineBuffer {
    /// Allocate room for `capacity` segments.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: vec![Vec3::ZERO; capacity * 2],
            colors: vec![Vec3::ZERO; capacity * 2],
            segment_count: 0,
        }
    }

    /// Maximum number of segments.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.positions.len() / 2
    }

    /// Segments written by the last rebuild.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Whole position buffer as flat x,y,z floats, stale tail included.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Whole color buffer as flat r,g,b floats, stale tail included.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// The `segment_count * 6` position floats written this frame.
    #[inline]
    pub fn valid_positions(&self) -> &[f32] {
        &self.positions()[..self.segment_count * 6]
    }

    /// The `segment_count * 6` color floats written this frame.
    #[inline]
    pub fn valid_colors(&self) -> &[f32] {
        &self.colors()[..self.segment_count * 6]
    }

    /// Vertex range to draw as a line list.
    #[inline]
    pub fn draw_range(&self) -> Range<u32> {
        0..(self.segment_count * 2) as u32
    }

    /// Endpoints of segment `index`, if it is in the valid range.
    pub fn segment(&self, index: usize) -> Option<(Vec3, Vec3, f32)> {
        if index >= self.segment_count {
            return None;
        }
        let a = index * 2;
        Some((self.positions[a], self.positions[a + 1], self.colors[a].x))
    }
}

/// Builds the line graph between nearby particles.
#[derive(Debug, Clone)]
pub struct ProximityGraph {
    params: ConnectionParams,
    lines: LineBuffer,
}

impl ProximityGraph {
    /// Graph for `particle_count` particles, with buffers sized for the
    /// worst case.
    pub fn new(particle_count: usize, params: ConnectionParams) -> Self {
        let capacity = segment_capacity(particle_count, params.max_connections);
        Self {
            params,
            lines: LineBuffer::with_capacity(capacity),
        }
    }

    /// Connection settings.
    #[inline]
    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// Output of the last rebuild.
    #[inline]
    pub fn lines(&self) -> &LineBuffer {
        &self.lines
    }

    /// Recompute the connections for the current positions.
    ///
    /// Resets every particle's connection count, then walks the pairs
    /// `(i, j)` with `i < j` in index order, skipping particles that are
    /// already at the cap. Each accepted pair bumps both counts and appends
    /// one segment. Returns the number of segments written.
    ///
    /// # Panics
    ///
    /// If `particles` holds more particles than the graph was sized for and
    /// the extra segments do not fit.
    pub fn rebuild(&mut self, particles: &mut ParticleStore) -> usize {
        let params = self.params;
        let cap = params.max_connections;
        let capacity = self.lines.capacity();
        let positions = &mut self.lines.positions;
        let colors = &mut self.lines.colors;

        let particles = particles.particles_mut();
        for p in particles.iter_mut() {
            p.reset_connections();
        }

        let mut segments = 0usize;
        let n = particles.len();

        for i in 0..n {
            if particles[i].connection_count() >= cap {
                continue;
            }

            let (head, tail) = particles.split_at_mut(i + 1);
            let a = &mut head[i];

            for b in tail.iter_mut() {
                if a.connection_count() >= cap {
                    break;
                }
                if b.connection_count() >= cap {
                    continue;
                }

                let dist = a.position.distance(b.position);
                let Some(alpha) = params.alpha(dist) else {
                    continue;
                };

                assert!(
                    segments < capacity,
                    "line buffer overflow: capacity {} segments",
                    capacity
                );

                a.add_connection();
                b.add_connection();

                let v = segments * 2;
                positions[v] = a.position;
                positions[v + 1] = b.position;
                colors[v] = Vec3::splat(alpha);
                colors[v + 1] = Vec3::splat(alpha);
                segments += 1;
            }
        }

        self.lines.segment_count = segments;
        log::trace!("rebuilt proximity graph: {} segments for {} particles", segments, n);
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;

    fn store_at(points: &[Vec3]) -> ParticleStore {
        ParticleStore::from_particles(
            points
                .iter()
                .map(|&p| Particle::mesh(p, Vec3::ZERO))
                .collect(),
        )
    }

    fn params(min: Option<f32>, max: Option<f32>, cap: u32) -> ConnectionParams {
        ConnectionParams {
            min_distance: min,
            max_distance: max,
            max_connections: cap,
        }
    }

    #[test]
    fn test_segment_capacity() {
        assert_eq!(segment_capacity(0, 10), 0);
        assert_eq!(segment_capacity(1, 10), 0);
        assert_eq!(segment_capacity(4, 10), 6);
        assert_eq!(segment_capacity(100, 3), 150);
        assert_eq!(segment_capacity(5, 1), 2);
    }

    #[test]
    fn test_exact_threshold_not_connected() {
        let mut store = store_at(&[Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0)]);
        let mut graph = ProximityGraph::new(store.len(), params(Some(1.5), None, 10));
        assert_eq!(graph.rebuild(&mut store), 0);
        assert_eq!(store.particles()[0].connection_count(), 0);
    }

    #[test]
    fn test_just_inside_threshold_alpha() {
        let eps = 0.01;
        let mut store = store_at(&[Vec3::ZERO, Vec3::new(2.0 - eps, 0.0, 0.0)]);
        let mut graph = ProximityGraph::new(store.len(), params(Some(2.0), None, 10));
        assert_eq!(graph.rebuild(&mut store), 1);

        let (_, _, alpha) = graph.lines().segment(0).unwrap();
        assert!((alpha - eps / 2.0).abs() < 1e-4);
        assert!(graph.lines().valid_colors().iter().all(|&c| c == alpha));
    }

    #[test]
    fn test_coincident_points_alpha_one() {
        let mut store = store_at(&[Vec3::ONE, Vec3::ONE]);
        let mut graph = ProximityGraph::new(store.len(), params(Some(1.0), None, 10));
        graph.rebuild(&mut store);
        assert_eq!(graph.lines().segment(0).unwrap().2, 1.0);
    }

    #[test]
    fn test_max_distance_excludes_close_pairs() {
        let mut store = store_at(&[Vec3::ZERO, Vec3::new(0.1, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)]);
        let mut graph = ProximityGraph::new(store.len(), params(Some(1.7), Some(0.2), 10));
        assert_eq!(graph.rebuild(&mut store), 2);

        let (a, b, _) = graph.lines().segment(0).unwrap();
        assert_eq!((a, b), (Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)));
        let (a, b, _) = graph.lines().segment(1).unwrap();
        assert_eq!((a, b), (Vec3::new(0.1, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_no_reach_connects_everything_within_cap() {
        let mut store = store_at(&[Vec3::ZERO, Vec3::splat(100.0), Vec3::splat(-100.0)]);
        let mut graph = ProximityGraph::new(store.len(), params(None, None, 10));
        assert_eq!(graph.rebuild(&mut store), 3);
        assert!(graph.lines().valid_colors().iter().all(|&c| c == 1.0));
    }

    #[test]
    fn test_cap_first_come_first_served() {
        // Particle 0 is closest to 3, but 1 and 2 come first in index order.
        let mut store = store_at(&[
            Vec3::ZERO,
            Vec3::new(0.9, 0.0, 0.0),
            Vec3::new(0.0, 0.9, 0.0),
            Vec3::new(0.0, 0.0, 0.1),
        ]);
        let mut graph = ProximityGraph::new(store.len(), params(Some(1.0), None, 2));
        graph.rebuild(&mut store);

        let lines = graph.lines();
        let (a, b, _) = lines.segment(0).unwrap();
        assert_eq!((a, b), (Vec3::ZERO, Vec3::new(0.9, 0.0, 0.0)));
        let (a, b, _) = lines.segment(1).unwrap();
        assert_eq!((a, b), (Vec3::ZERO, Vec3::new(0.0, 0.9, 0.0)));
        assert_eq!(store.particles()[0].connection_count(), 2);

        for p in store.particles() {
            assert!(p.connection_count() <= 2);
        }
    }

    #[test]
    fn test_pairs_emitted_once_and_counts_symmetric() {
        let points: Vec<Vec3> = (0..6).map(|i| Vec3::new(i as f32 * 0.3, 0.0, 0.0)).collect();
        let mut store = store_at(&points);
        let mut graph = ProximityGraph::new(store.len(), params(Some(1.0), None, 100));
        let segments = graph.rebuild(&mut store);

        let mut seen = Vec::new();
        let mut counts = vec![0u32; points.len()];
        for s in 0..segments {
            let (a, b, _) = graph.lines().segment(s).unwrap();
            let ia = points.iter().position(|&p| p == a).unwrap();
            let ib = points.iter().position(|&p| p == b).unwrap();
            assert!(ia < ib);
            assert!(!seen.contains(&(ia, ib)));
            seen.push((ia, ib));
            counts[ia] += 1;
            counts[ib] += 1;
        }

        let recorded: Vec<u32> = store.particles().iter().map(|p| p.connection_count()).collect();
        assert_eq!(counts, recorded);
    }

    #[test]
    fn test_stale_tail_kept_between_frames() {
        let mut store = store_at(&[Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.0, 0.5, 0.0)]);
        let mut graph = ProximityGraph::new(store.len(), params(Some(1.0), None, 10));
        assert_eq!(graph.rebuild(&mut store), 3);
        let before = graph.lines().positions().to_vec();

        let mut far = store_at(&[Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), Vec3::splat(50.0)]);
        assert_eq!(graph.rebuild(&mut far), 1);

        let lines = graph.lines();
        assert_eq!(lines.valid_positions().len(), 6);
        assert_eq!(lines.draw_range(), 0..2);
        assert_eq!(&lines.positions()[6..], &before[6..]);
        assert!(lines.segment(1).is_none());
    }

    #[test]
    fn test_counts_reset_each_rebuild() {
        let mut store = store_at(&[Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)]);
        let mut graph = ProximityGraph::new(store.len(), params(Some(1.0), None, 1));
        for _ in 0..3 {
            assert_eq!(graph.rebuild(&mut store), 1);
            assert_eq!(store.particles()[1].connection_count(), 1);
        }
    }

    #[test]
    fn test_buffer_length_matches_capacity() {
        let graph = ProximityGraph::new(10, params(Some(1.0), None, 4));
        assert_eq!(graph.lines().capacity(), 20);
        assert_eq!(graph.lines().positions().len(), 20 * 6);
        assert_eq!(graph.lines().colors().len(), 20 * 6);
        assert!(graph.lines().valid_positions().is_empty());
    }

    #[test]
    #[should_panic(expected = "line buffer overflow")]
    fn test_undersized_graph_panics() {
        let mut store = store_at(&[Vec3::ZERO, Vec3::ZERO, Vec3::ZERO]);
        let mut graph = ProximityGraph::new(2, params(Some(1.0), None, 10));
        graph.rebuild(&mut store);
    }
}
