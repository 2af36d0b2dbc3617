//! # wavefield
//!
//! An interactive 3D particle wave field.
//!
//! A rectangular grid of points is laid out on the ground plane and animated
//! on the GPU: every frame each point is displaced by a travelling sine/cosine
//! wave and pushed away from the world position under the mouse pointer.
//! Points inside the repulsion radius are tinted green.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wavefield::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     let params = WaveParams::new(100, 100, 5.0).with_wave(0.1, 5.5);
//!     WaveApp::new(params).run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### The field
//!
//! [`ParticleField`] owns the grid geometry and the live [`WaveParams`].
//! Changing the grid shape (width, height, spread) rebuilds the point cloud;
//! the wave and repulsion parameters only feed per-frame uniforms.
//!
//! ### Frames
//!
//! [`FrameDriver::tick`] snapshots the controls, applies them to the field,
//! keeps the [`Scene`] in sync and produces the [`DisplacementInputs`] for the
//! frame. [`displace`] is the CPU reference of what the vertex shader does.
//!
//! ### Controls
//!
//! Parameters are read from any [`ControlSource`] as text. Malformed text is
//! not an error: it parses to `NaN` and produces a degenerate field.
//!
//! ## Features
//!
//! | Feature | Default | |
//! |---------|---------|---|
//! | `egui`  | yes     | Side panel with one text field per parameter |

mod app;
pub mod camera;
pub mod controls;
pub mod displacement;
pub mod driver;
pub mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod params;
pub mod scene;
pub mod shader;
pub mod time;
#[cfg(feature = "egui")]
pub mod ui;

pub use app::WaveApp;
pub use bytemuck;
pub use camera::OrbitCamera;
pub use controls::{read_params, ControlSource, TextControls};
pub use displacement::{displace, displace_all, Displaced, DisplacementInputs};
pub use driver::{FrameDriver, FrameUpdate};
pub use error::{AppError, ConfigError, GpuError};
pub use field::{GridPoint, ParticleField, PointCloud};
pub use glam::{Vec2, Vec3, Vec4};
pub use params::{LiveChange, ParamKey, ParamKind, ParamsDiff, WaveParams};
pub use scene::Scene;
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use wavefield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::WaveApp;
    pub use crate::controls::{ControlSource, TextControls};
    pub use crate::driver::FrameDriver;
    pub use crate::error::AppError;
    pub use crate::field::ParticleField;
    pub use crate::params::{ParamKey, WaveParams};
    pub use crate::{Vec2, Vec3, Vec4};
    #[cfg(feature = "egui")]
    pub use egui;
}
