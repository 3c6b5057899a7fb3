//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// 8-bit RGBA to linear-ish float color
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    pub const BACKGROUND: [f32; 4] = rgba(5, 5, 15, 255);
    pub const SHIP_BODY: [f32; 4] = rgba(0, 255, 200, 255);
    pub const SHIP_ENGINE: [f32; 4] = rgba(255, 0, 255, 140);
    pub const SHIP_COCKPIT: [f32; 4] = rgba(255, 255, 255, 180);
    pub const ENEMY: [f32; 4] = rgba(255, 60, 60, 255);
    pub const BULLET: [f32; 4] = rgba(255, 255, 0, 255);
    /// Particle base color; alpha comes from remaining life
    pub const PARTICLE: [f32; 4] = rgba(255, 255, 255, 255);
}
