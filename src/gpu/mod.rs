#[cfg(feature = "egui")]
mod egui_integration;

use std::sync::Arc;

use bytemuck::Zeroable;
use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::window::Window;

#[cfg(feature = "egui")]
pub use egui_integration::{EguiFrameOutput, EguiLayer};

use crate::error::GpuError;
use crate::field::{GridPoint, PointCloud, NODE_NAME};
use crate::scene::Scene;
use crate::shader::{WaveUniforms, WAVE_SHADER};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// The uploaded copy of a point cloud.
struct PointBuffer {
    /// `None` for an empty cloud; wgpu does not bind zero-sized slices.
    buffer: Option<wgpu::Buffer>,
    count: u32,
    generation: u64,
}

impl PointBuffer {
    /// A cloud that is not drawn: empty, or too large for one buffer.
    fn skipped(cloud: &PointCloud) -> Self {
        Self {
            buffer: None,
            count: 0,
            generation: cloud.generation,
        }
    }

    fn upload(device: &wgpu::Device, cloud: &PointCloud) -> Self {
        let size = cloud.as_bytes().len() as u64;
        let max = device.limits().max_buffer_size;
        if !fits_buffer(size, max) {
            tracing::warn!(
                points = cloud.len(),
                bytes = size,
                max_buffer_size = max,
                "point cloud exceeds the GPU buffer limit, not drawing it"
            );
            return Self::skipped(cloud);
        }

        let buffer = (!cloud.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Point Buffer"),
                contents: cloud.as_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        Self {
            buffer,
            count: cloud.len() as u32,
            generation: cloud.generation,
        }
    }
}

/// A frame in flight: acquired surface texture plus its command encoder.
pub struct Frame {
    output: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    points: Option<PointBuffer>,
}

impl GpuState {
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let info = adapter.get_info();
        tracing::info!(
            adapter = %info.name,
            backend = info.backend.to_str(),
            "GPU initialized"
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = create_depth_texture(&device, &config);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wave Uniform Buffer"),
            contents: bytemuck::bytes_of(&WaveUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Wave Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Wave Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Wave Shader"),
            source: wgpu::ShaderSource::Wgsl(WAVE_SHADER.into()),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Wave Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Wave Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<GridPoint>() as wgpu::BufferAddress,
                    // One quad instance per grid point.
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3, // position
                        1 => Uint32,    // displaced
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            uniform_buffer,
            uniform_bind_group,
            depth_texture,
            points: None,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Surface size in physical pixels.
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.config.width as f32, self.config.height as f32)
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload the scene's point cloud if it is not the one on the GPU.
    ///
    /// Returns true if a new vertex buffer was created.
    pub fn sync_points(&mut self, scene: &Scene) -> bool {
        let Some(cloud) = scene.get(NODE_NAME) else {
            self.points = None;
            return false;
        };
        if self
            .points
            .as_ref()
            .is_some_and(|p| p.generation == cloud.generation)
        {
            return false;
        }

        tracing::debug!(
            points = cloud.len(),
            generation = cloud.generation,
            "uploading point buffer"
        );
        self.points = Some(PointBuffer::upload(&self.device, cloud));
        true
    }

    /// Acquire the next surface texture and start encoding.
    pub fn begin_frame(&mut self) -> Result<Frame, wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        Ok(Frame {
            output,
            view,
            encoder,
        })
    }

    /// Clear the frame and draw the point field with `uniforms`.
    pub fn draw_points(&mut self, frame: &mut Frame, uniforms: &WaveUniforms) {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));

        let mut render_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Wave Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Some(PointBuffer {
            buffer: Some(buffer),
            count,
            ..
        }) = &self.points
        {
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, buffer.slice(..));
            render_pass.draw(0..6, 0..*count);
        }
    }

    /// Submit the frame and present it.
    pub fn finish(&self, frame: Frame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.output.present();
    }
}

/// A vertex buffer of `size` bytes can be created under `max_buffer_size`.
fn fits_buffer(size: u64, max_buffer_size: u64) -> bool {
    size <= max_buffer_size
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_buffer_against_default_limit() {
        let max = wgpu::Limits::default().max_buffer_size;
        let point = std::mem::size_of::<GridPoint>() as u64;

        assert!(fits_buffer(100 * 100 * point, max));
        assert!(fits_buffer(max, max));
        assert!(!fits_buffer(max + 1, max));
        // 5000 x 5000 points is 400 MB, over the 256 MiB default.
        assert!(!fits_buffer(5000 * 5000 * point, max));
    }

    #[test]
    fn test_skipped_cloud_keeps_generation() {
        let cloud = PointCloud::new(7, 3, 3, 1.0);
        let skipped = PointBuffer::skipped(&cloud);
        assert!(skipped.buffer.is_none());
        assert_eq!(skipped.count, 0);
        assert_eq!(skipped.generation, 7);
    }
}
