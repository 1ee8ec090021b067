//! Point-sprite renderer shared by the web and native frontends.
//!
//! Frontends own the surface and its configuration. [`PointRenderer`] owns
//! everything drawn into it: pipelines, uniforms, the billboard quad and the
//! instance buffer of particle centers.

use cloud_core::{BlendMode, Camera, FrameView, PointUniforms, RenderStyle, QUAD_CORNERS};
use wgpu::util::DeviceExt;

/// Bytes per particle center in the instance buffer.
pub const POSITION_STRIDE: u64 = (std::mem::size_of::<f32>() * 3) as u64;

/// Additive blending so overlapping particles glow.
pub const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

#[inline]
pub fn blend_state(mode: BlendMode) -> wgpu::BlendState {
    match mode {
        BlendMode::Additive => ADDITIVE,
        BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
    }
}

/// Instance buffer size for `capacity` particles, never zero.
#[inline]
pub fn instance_buffer_size(capacity: usize) -> u64 {
    POSITION_STRIDE * capacity.max(1) as u64
}

pub struct PointRenderer {
    additive_pipeline: wgpu::RenderPipeline,
    alpha_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
}

impl PointRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, capacity: usize) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(cloud_core::POINTS_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("point_uniforms"),
            size: std::mem::size_of::<PointUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("points_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let additive_pipeline = points_pipeline(
            device,
            &layout,
            &shader,
            format,
            blend_state(BlendMode::Additive),
        );
        let alpha_pipeline =
            points_pipeline(device, &layout, &shader, format, blend_state(BlendMode::Alpha));

        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_capacity = capacity.max(1);
        let instance_vb = create_instance_buffer(device, instance_capacity);

        Self {
            additive_pipeline,
            alpha_pipeline,
            uniform_buffer,
            bind_group,
            quad_vb,
            instance_vb,
            instance_capacity,
        }
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, count: usize) {
        if count > self.instance_capacity {
            log::debug!(
                "[gpu] instance buffer {} -> {}",
                self.instance_capacity,
                count
            );
            self.instance_capacity = count;
            self.instance_vb = create_instance_buffer(device, count);
        }
    }

    /// Upload one frame and draw it into `target`, clearing to `clear` first.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        camera: &Camera,
        frame: &FrameView<'_>,
        style: &RenderStyle,
        clear: wgpu::Color,
    ) {
        let count = frame.active_count.min(frame.positions.len());
        self.ensure_capacity(device, count);
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&PointUniforms::new(camera, frame, style)),
        );
        if count > 0 {
            queue.write_buffer(
                &self.instance_vb,
                0,
                bytemuck::cast_slice(&frame.positions[..count]),
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("encoder"),
        });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("points_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let pipeline = match style.blend {
                BlendMode::Additive => &self.additive_pipeline,
                BlendMode::Alpha => &self.alpha_pipeline,
            };
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..count as u32);
        }
        queue.submit(Some(encoder.finish()));
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_vb"),
        size: instance_buffer_size(capacity),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn points_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    blend: wgpu::BlendState,
) -> wgpu::RenderPipeline {
    let vertex_buffers = [
        // slot 0: billboard corners
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        },
        // slot 1: derived particle positions
        wgpu::VertexBufferLayout {
            array_stride: POSITION_STRIDE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 1,
            }],
        },
    ];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("points_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &vertex_buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additive_blend_adds_onto_destination() {
        let b = blend_state(BlendMode::Additive);
        assert_eq!(b.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(b.color.operation, wgpu::BlendOperation::Add);
    }

    #[test]
    fn alpha_mode_uses_standard_blending() {
        assert_eq!(
            blend_state(BlendMode::Alpha),
            wgpu::BlendState::ALPHA_BLENDING
        );
    }

    #[test]
    fn instance_buffer_holds_at_least_one_particle() {
        assert_eq!(instance_buffer_size(0), POSITION_STRIDE);
        assert_eq!(instance_buffer_size(5000), 5000 * 12);
    }

    #[test]
    fn instance_stride_matches_vec3() {
        assert_eq!(POSITION_STRIDE as usize, std::mem::size_of::<[f32; 3]>());
    }
}
