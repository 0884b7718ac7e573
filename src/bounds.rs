//! Axis-aligned reflection volume.

use glam::Vec3;

use crate::error::{NetworkError, Result};

/// Axis-aligned box described by its center and half extents.
///
/// Mesh-derived particles bounce off this box. It is computed once from the
/// source mesh and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Box center in world units.
    pub center: Vec3,
    /// Half of the box size on each axis.
    pub half_extents: Vec3,
}

impl BoundingVolume {
    /// Create a box from its center and half extents.
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Box spanning the given corners.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        let lo = min.min(max);
        let hi = min.max(max);
        Self::new((lo + hi) * 0.5, (hi - lo) * 0.5)
    }

    /// Cube of the given half size centered at `center`.
    pub fn cube(center: Vec3, half_size: f32) -> Self {
        Self::new(center, Vec3::splat(half_size))
    }

    /// Derive the volume from flat source positions.
    ///
    /// The source box is computed after scaling every vertex by `scale`, then
    /// its half extents are `size / divisor`. A divisor of 2 gives the exact
    /// box; larger divisors shrink it and smaller ones widen it. An empty
    /// source yields a degenerate box at the origin.
    pub fn from_positions(positions: &[f32], scale: f32, divisor: f32) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(NetworkError::MalformedSource {
                len: positions.len(),
            });
        }
        if positions.is_empty() {
            return Ok(Self::new(Vec3::ZERO, Vec3::ZERO));
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for v in positions.chunks_exact(3) {
            let p = Vec3::new(v[0], v[1], v[2]) * scale;
            min = min.min(p);
            max = max.max(p);
        }

        Ok(Self::new((min + max) * 0.5, (max - min) / divisor))
    }

    /// Lower corner.
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    /// Upper corner.
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Full size on each axis.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    /// Copy of this box grown by `margin` on every face.
    pub fn inflated(&self, margin: f32) -> Self {
        Self::new(self.center, self.half_extents + Vec3::splat(margin))
    }

    /// Strict interior test. Points on a face count as outside.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpgt(self.min()).all() && point.cmplt(self.max()).all()
    }

    /// Per-axis mask of components strictly past a face. A point on a face
    /// is still inside the closed box.
    #[inline]
    pub(crate) fn outside_mask(&self, point: Vec3) -> glam::BVec3 {
        point.cmplt(self.min()) | point.cmpgt(self.max())
    }
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self::cube(Vec3::ZERO, 1.0)
    }
}
