//! Error types for wavefield.
//!
//! The particle field itself never fails: malformed parameters degrade into
//! NaN positions instead of errors. Everything here belongs to the outer
//! shell (GPU setup, windowing, preset files).

use std::path::PathBuf;

/// Errors that can occur during GPU initialization.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; ensure your system supports Vulkan, Metal, DX12 or WebGPU")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors that can occur while loading or saving a parameter preset.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read preset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid preset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when running the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}
