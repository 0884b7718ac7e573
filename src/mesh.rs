//! Source vertex data.
//!
//! Particles are seeded from a flat list of mesh vertices. Loading real
//! models is left to the host; [`SourceMesh`] only validates and wraps the
//! vertex array, and can generate a procedural shell for demos and
//! benchmarks.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::bounds::BoundingVolume;
use crate::error::{NetworkError, Result};

/// Flat x,y,z vertex positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMesh {
    positions: Vec<f32>,
}

impl SourceMesh {
    /// Wrap a flat position array. Its length must be a multiple of 3.
    pub fn from_flat(positions: Vec<f32>) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(NetworkError::MalformedSource {
                len: positions.len(),
            });
        }
        Ok(Self { positions })
    }

    /// Build from individual points.
    pub fn from_points(points: &[Vec3]) -> Self {
        Self {
            positions: bytemuck::cast_slice(points).to_vec(),
        }
    }

    /// Vertices of a UV ellipsoid shell.
    ///
    /// Rings run from pole to pole; every ring has `width_segments + 1`
    /// vertices, so the seam column is duplicated like a regular UV sphere.
    pub fn ellipsoid(radii: Vec3, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut positions =
            Vec::with_capacity(((width_segments + 1) * (height_segments + 1) * 3) as usize);

        for iy in 0..=height_segments {
            let theta = iy as f32 / height_segments as f32 * PI;
            for ix in 0..=width_segments {
                let phi = ix as f32 / width_segments as f32 * TAU;
                let unit = Vec3::new(-theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
                positions.extend_from_slice(&(unit * radii).to_array());
            }
        }

        Self { positions }
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Vertex `index`, if present.
    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        let base = index.checked_mul(3)?;
        let v = self.positions.get(base..base + 3)?;
        Some(Vec3::new(v[0], v[1], v[2]))
    }

    /// The flat position array.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Tight box around the unscaled vertices.
    pub fn bounds(&self) -> BoundingVolume {
        let points: &[Vec3] = bytemuck::cast_slice(&self.positions);
        match points.split_first() {
            Some((first, rest)) => {
                let (min, max) = rest
                    .iter()
                    .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
                BoundingVolume::from_min_max(min, max)
            }
            None => BoundingVolume::new(Vec3::ZERO, Vec3::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_validates_length() {
        assert!(SourceMesh::from_flat(vec![0.0; 6]).is_ok());
        assert_eq!(
            SourceMesh::from_flat(vec![0.0; 4]).unwrap_err(),
            NetworkError::MalformedSource { len: 4 }
        );
    }

    #[test]
    fn test_vertex_access() {
        let mesh = SourceMesh::from_points(&[Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]);
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.vertex(1), Some(Vec3::new(4.0, 5.0, 6.0)));
        assert_eq!(mesh.vertex(2), None);
        assert_eq!(mesh.positions().len(), 6);
    }

    #[test]
    fn test_ellipsoid_vertices_on_surface() {
        let radii = Vec3::new(2.0, 1.0, 3.0);
        let mesh = SourceMesh::ellipsoid(radii, 8, 4);
        assert_eq!(mesh.vertex_count(), 9 * 5);

        for i in 0..mesh.vertex_count() {
            let v = mesh.vertex(i).unwrap() / radii;
            assert!((v.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_bounds_cover_radii() {
        let mesh = SourceMesh::ellipsoid(Vec3::new(2.0, 1.0, 3.0), 16, 8);
        let b = mesh.bounds();
        assert!((b.half_extents.y - 1.0).abs() < 1e-4);
        assert!(b.half_extents.x <= 2.0 + 1e-4);
        assert!(b.half_extents.z <= 3.0 + 1e-4);
        assert!(b.center.length() < 0.3);
    }
}
