//! WebGPU surface and draw pass for the arena
//!
//! Vertices arrive in field coordinates and are mapped to NDC on upload.

use glam::Vec2;
use wgpu::util::DeviceExt;

use super::RenderError;
use super::vertex::{Vertex, colors};

pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    /// `None` on frames with nothing to draw (menu, game over)
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    /// Backing store size in pixels
    pub size: (u32, u32),
    field_size: Vec2,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        field_size: Vec2,
    ) -> Result<Self, RenderError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("neon-defender-device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        let format = pick_surface_format(&caps.formats)?;
        log::info!("Surface format {:?} (of {:?})", format, caps.formats);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = flat_color_pipeline(&device, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer: None,
            vertex_count: 0,
            size: (width, height),
            field_size,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Replace the frame's vertex buffer; entity counts change every tick
    fn upload(&mut self, vertices: &[Vertex]) {
        let ndc = to_ndc(self.field_size, vertices);
        self.vertex_count = ndc.len() as u32;
        self.vertex_buffer = (!ndc.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("arena_vertices"),
                    contents: bytemuck::cast_slice(&ndc),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });
    }

    /// Clear to the arena background and draw `vertices` (field coordinates)
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        self.upload(vertices);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("arena_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("arena_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(background()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });

            if let Some(buffer) = &self.vertex_buffer {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Alpha-blended triangle list, no bindings
fn flat_color_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("flat_color"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat_color_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat_color"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Shapes are wound both ways
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Prefer an sRGB format, else whatever the surface offers first
fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Result<wgpu::TextureFormat, RenderError> {
    formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first())
        .copied()
        .ok_or(RenderError::NoSurfaceFormat)
}

fn background() -> wgpu::Color {
    let [r, g, b, a] = colors::BACKGROUND;
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

fn to_ndc(field_size: Vec2, vertices: &[Vertex]) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|v| {
            let (x, y) = field_to_ndc(field_size, v.position[0], v.position[1]);
            Vertex::new(x, y, v.color)
        })
        .collect()
}

/// Field coordinates (origin top-left, y down) to NDC (origin center, y up)
pub fn field_to_ndc(field_size: Vec2, x: f32, y: f32) -> (f32, f32) {
    (x / field_size.x * 2.0 - 1.0, 1.0 - y / field_size.y * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn test_field_to_ndc_corners() {
        let size = Vec2::new(900.0, 600.0);
        assert_eq!(field_to_ndc(size, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(field_to_ndc(size, 900.0, 600.0), (1.0, -1.0));
        assert_eq!(field_to_ndc(size, 450.0, 300.0), (0.0, 0.0));
    }

    #[test]
    fn test_to_ndc_keeps_color() {
        let size = Vec2::new(900.0, 600.0);
        let out = to_ndc(size, &[Vertex::new(450.0, 0.0, colors::ENEMY)]);
        assert_eq!(out, vec![Vertex::new(0.0, 1.0, colors::ENEMY)]);
        assert!(to_ndc(size, &[]).is_empty());
    }

    #[test]
    fn test_surface_format_choice() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            pick_surface_format(&formats).ok(),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
        assert_eq!(
            pick_surface_format(&[TextureFormat::Rgba8Unorm]).ok(),
            Some(TextureFormat::Rgba8Unorm)
        );
        assert!(matches!(
            pick_surface_format(&[]),
            Err(RenderError::NoSurfaceFormat)
        ));
    }

    #[test]
    fn test_background_matches_palette() {
        let c = background();
        assert_eq!(c.a, 1.0);
        assert!(c.b > c.r && c.b > c.g);
    }
}
