//! Seam between the frame update and whatever draws the points.

use glam::Vec3;

use crate::state::{model_matrix, Camera, RenderStyle};

/// Everything a renderer needs from one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub positions: &'a [Vec3],
    pub active_count: usize,
    pub yaw: f32,
    pub roll: f32,
}

/// Implemented by each frontend's GPU state.
pub trait RenderAdapter {
    type Error;

    /// Called whenever the viewport changes size.
    fn resize(&mut self, width: u32, height: u32);

    fn draw(&mut self, frame: &FrameView<'_>, style: &RenderStyle) -> Result<(), Self::Error>;
}

/// Uniform block for `POINTS_WGSL`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointUniforms {
    pub proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x = point size in world units.
    pub params: [f32; 4],
}

impl PointUniforms {
    pub fn new(camera: &Camera, frame: &FrameView<'_>, style: &RenderStyle) -> Self {
        let [r, g, b] = style.color_rgb;
        Self {
            proj: camera.projection_matrix().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            model: model_matrix(frame.yaw, frame.roll).to_cols_array_2d(),
            color: [r, g, b, 0.8],
            params: [style.point_size, 0.0, 0.0, 0.0],
        }
    }
}

/// Two triangles covering a unit billboard centered on the particle.
pub const QUAD_CORNERS: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];
