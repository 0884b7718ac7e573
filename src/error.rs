//! Error types for neuroweb.
//!
//! The core has a deliberately small taxonomy: source data that cannot
//! seed the requested particle set, and configuration that is rejected up
//! front. Per-frame work never fails. Overflowing the line buffers is an
//! internal invariant violation and panics instead of surfacing here.

use thiserror::Error;

/// Errors raised while building a particle network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// Source vertex data is shorter than the particle set requires.
    #[error("Source mesh has {available} vertices but {required} are required")]
    InvalidSource {
        /// Vertices needed (`mesh particles * sampling coefficient`).
        required: usize,
        /// Vertices actually supplied.
        available: usize,
    },
    /// Flat source length is not a whole number of x,y,z triples.
    #[error("Source positions length {len} is not a multiple of 3")]
    MalformedSource {
        /// Length of the flat array.
        len: usize,
    },
    /// Configuration rejected by [`NetworkConfig::validate`](crate::NetworkConfig::validate).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors that can occur during GPU initialization.
#[cfg(feature = "viewer")]
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors that can occur when running the viewer.
#[cfg(feature = "viewer")]
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Failed to create or run the event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}
