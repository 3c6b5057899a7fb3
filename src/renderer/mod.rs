//! WebGPU rendering module
//!
//! The scene is rebuilt each frame as a flat-colored triangle list in field
//! coordinates; `pipeline` maps it to the canvas and draws it.

pub mod hud;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use hud::HudText;
pub use pipeline::RenderState;
pub use vertex::Vertex;

/// Renderer setup errors
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to get adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("Failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("Surface reports no supported formats")]
    NoSurfaceFormat,
}
