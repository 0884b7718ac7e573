//! # neuroweb - proximity lines over mesh-sampled particles
//!
//! Samples a point cloud from a mesh surface, jiggles every point around
//! inside the mesh's bounding box, and links points that drift close to each
//! other with fading line segments. The result looks like a network of
//! neurons firing across the shape.
//!
//! The crate is the per-frame core only. It takes flat vertex positions in,
//! and hands flat position and color buffers out. Loading models and drawing
//! the buffers belong to the host (a small `wgpu` viewer ships behind the
//! `viewer` feature).
//!
//! ## Quick Start
//!
//! ```ignore
//! use neuroweb::prelude::*;
//!
//! let mesh = SourceMesh::ellipsoid(Vec3::new(0.35, 0.28, 0.4), 32, 24);
//! let mut network = Network::new(mesh.positions(), NetworkConfig::new())?;
//!
//! loop {
//!     let frame = network.advance();
//!     upload_points(frame.particle_positions());
//!     upload_lines(frame.valid_line_positions(), frame.valid_line_colors());
//!     draw_lines(frame.draw_range());
//! }
//! ```
//!
//! ## Per-frame work
//!
//! Each call to [`Network::advance`] runs two passes in order:
//!
//! 1. [`ParticleStore::step`] adds every velocity to its position and flips
//!    velocity components of mesh particles that reached the box faces.
//! 2. [`ProximityGraph::rebuild`] tests every pair against the distance
//!    window, honouring the per-particle connection cap in index order, and
//!    writes the accepted pairs as line segments.
//!
//! The line buffers are sized once for the worst case and never cleared.
//! Consumers must draw only [`Frame::draw_range`].
//!
//! ## Configuration
//!
//! | Setting | Default | Meaning |
//! |---------|---------|---------|
//! | `sampling_coefficient` | 2 | Use every n-th source vertex |
//! | `scale_factor` | 15.0 | Scale applied to sampled vertices |
//! | `max_connections` | 10 | Lines per particle |
//! | `min_distance` | 1.2 | Pairs connect when closer than this |
//! | `max_distance` | off | Pairs connect when farther than this |
//! | `ambient` | off | Extra particles outside the mesh |

mod bounds;
pub mod config;
mod error;
pub mod graph;
pub mod mesh;
mod network;
mod particle;
mod spawn;
mod store;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use bounds::BoundingVolume;
pub use config::{AmbientBoundary, AmbientConfig, NetworkConfig};
pub use error::{NetworkError, Result};
#[cfg(feature = "viewer")]
pub use error::{GpuError, ViewerError};
pub use glam::Vec3;
pub use graph::{ConnectionParams, LineBuffer, ProximityGraph};
pub use mesh::SourceMesh;
pub use network::{Frame, Network};
pub use particle::Particle;
pub use spawn::Spawner;
pub use store::ParticleStore;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use neuroweb::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bounds::BoundingVolume;
    pub use crate::config::{AmbientBoundary, AmbientConfig, NetworkConfig};
    pub use crate::error::NetworkError;
    pub use crate::mesh::SourceMesh;
    pub use crate::network::{Frame, Network};
    pub use crate::particle::Particle;
    pub use crate::Vec3;
    #[cfg(feature = "viewer")]
    pub use crate::viewer::ViewerConfig;
}
