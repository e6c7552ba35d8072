use crate::constants::CLEAR_COLOR;
use glam::{Mat4, Vec3};
use morph_core::{Camera, CameraPose, Lens};
use web_sys as web;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PointUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
    right_size: [f32; 4],
    up_opacity: [f32; 4],
}

/// Look and placement of one layer for the frame being drawn.
#[derive(Clone, Copy, Debug)]
pub struct LayerDraw {
    pub model: Mat4,
    pub opacity: f32,
}

/// One instanced sprite layer: a position buffer in the animator's
/// interleaved `x, y, z` layout and a per-point alpha buffer.
struct PointLayer {
    positions: wgpu::Buffer,
    alpha: wgpu::Buffer,
    count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    color: [f32; 4],
    point_size: f32,
}

impl PointLayer {
    fn new(
        device: &wgpu::Device,
        bgl: &wgpu::BindGroupLayout,
        label: &str,
        positions: &[f32],
        alpha: &[f32],
        color: [f32; 4],
        point_size: f32,
    ) -> Self {
        let count = alpha.len() as u32;
        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(positions),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let alpha = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(alpha),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<PointUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        Self {
            positions,
            alpha,
            count,
            uniforms,
            bind_group,
            color,
            point_size,
        }
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    quad_vb: wgpu::Buffer,
    main: PointLayer,
    accent: Option<PointLayer>,
    width: u32,
    height: u32,
}

/// Main layer contents at start-up.
pub struct LayerInit<'b> {
    pub positions: &'b [f32],
    pub alpha: &'b [f32],
    pub color: [f32; 4],
    pub point_size: f32,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        main: LayerInit<'_>,
        accent: Option<LayerInit<'_>>,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(morph_core::POINTS_WGSL.into()),
        });
        // Quad corners (two triangles)
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("points_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let vertex_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: interleaved point positions
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 3) as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                }],
            },
            // slot 2: per-point alpha
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<f32>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 0,
                    shader_location: 2,
                }],
            },
        ];
        let additive = wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        };
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("points_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState {
                        color: additive,
                        alpha: additive,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let main = PointLayer::new(
            &device,
            &bgl,
            "main_layer",
            main.positions,
            main.alpha,
            main.color,
            main.point_size,
        );
        let accent = accent
            .filter(|a| !a.alpha.is_empty())
            .map(|a| {
                PointLayer::new(
                    &device,
                    &bgl,
                    "accent_layer",
                    a.positions,
                    a.alpha,
                    a.color,
                    a.point_size,
                )
            });
        log::info!(
            "[gpu] ready {}x{} {:?}, {} + {} points",
            width,
            height,
            format,
            main.count,
            accent.as_ref().map_or(0, |a| a.count)
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            quad_vb,
            main,
            accent,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Upload the main layer's buffers. Callers gate this on the frame's
    /// dirty flag.
    pub fn upload_main(&self, positions: &[f32], alpha: &[f32]) {
        let n = (self.main.count as usize).min(alpha.len());
        self.queue.write_buffer(
            &self.main.positions,
            0,
            bytemuck::cast_slice(&positions[..(n * 3).min(positions.len())]),
        );
        self.queue
            .write_buffer(&self.main.alpha, 0, bytemuck::cast_slice(&alpha[..n]));
    }

    fn write_uniforms(
        &self,
        layer: &PointLayer,
        view_proj: Mat4,
        right: Vec3,
        up: Vec3,
        draw: LayerDraw,
    ) {
        let u = PointUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            model: draw.model.to_cols_array_2d(),
            color: layer.color,
            right_size: right.extend(layer.point_size).to_array(),
            up_opacity: up.extend(draw.opacity.clamp(0.0, 1.0)).to_array(),
        };
        self.queue
            .write_buffer(&layer.uniforms, 0, bytemuck::bytes_of(&u));
    }

    pub fn render(
        &mut self,
        pose: CameraPose,
        lens: Lens,
        main: LayerDraw,
        accent: Option<LayerDraw>,
    ) -> Result<(), wgpu::SurfaceError> {
        let camera = Camera::new(pose, lens, self.aspect());
        let view = camera.view_matrix();
        let view_proj = camera.projection_matrix() * view;
        // Rows of the view rotation are the camera axes in world space
        let right = view.row(0).truncate();
        let up = view.row(1).truncate();

        self.write_uniforms(&self.main, view_proj, right, up, main);
        let accent = match (&self.accent, accent) {
            (Some(layer), Some(draw)) if draw.opacity > 0.0 => {
                self.write_uniforms(layer, view_proj, right, up, draw);
                Some(layer)
            }
            _ => None,
        };

        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("points_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            for layer in std::iter::once(&self.main).chain(accent) {
                rpass.set_bind_group(0, &layer.bind_group, &[]);
                rpass.set_vertex_buffer(1, layer.positions.slice(..));
                rpass.set_vertex_buffer(2, layer.alpha.slice(..));
                rpass.draw(0..6, 0..layer.count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
