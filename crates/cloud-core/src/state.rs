//! Visual-side state types shared with the web and native frontends.
//!
//! These types avoid referencing platform-specific APIs. Frontends use them to
//! build camera matrices, pick blending, and react to UI control events.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use crate::constants::*;
use crate::error::ParseError;
use crate::pattern::PatternKind;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Fixed camera looking down -Z at the formation.
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let mut cam = Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEGREES * PI / 180.0,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        };
        cam.resize(width, height);
        cam
    }

    /// Recompute the aspect ratio after a viewport change. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Formation rotation: yaw about Y, then the idle roll about Z.
#[inline]
pub fn model_matrix(yaw: f32, roll: f32) -> Mat4 {
    Mat4::from_rotation_y(yaw) * Mat4::from_rotation_z(roll)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    #[default]
    Additive,
    Alpha,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    pub color_rgb: [f32; 3],
    pub point_size: f32,
    pub blend: BlendMode,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            color_rgb: DEFAULT_PARTICLE_COLOR,
            point_size: DEFAULT_POINT_SIZE,
            blend: BlendMode::Additive,
        }
    }
}

/// Discrete events from the UI controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiEvent {
    SelectPattern(PatternKind),
    SelectColor([f32; 3]),
}

/// Parse `#rrggbb` (leading `#` optional) into linear `[0, 1]` components.
pub fn parse_hex_color(s: &str) -> Result<[f32; 3], ParseError> {
    let hex = s.trim().trim_start_matches('#');
    let invalid = || ParseError::InvalidColor(s.to_string());
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let mut rgb = [0.0_f32; 3];
    for (i, c) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        *c = byte as f32 / 255.0;
    }
    Ok(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#00ffff"), Ok([0.0, 1.0, 1.0]));
        assert_eq!(parse_hex_color("FF0000"), Ok([1.0, 0.0, 0.0]));
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
    }

    #[test]
    fn resize_ignores_zero_height() {
        let mut cam = Camera::for_viewport(800, 400);
        assert_eq!(cam.aspect, 2.0);
        cam.resize(800, 0);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn model_matrix_identity_at_rest() {
        assert_eq!(model_matrix(0.0, 0.0), Mat4::IDENTITY);
    }
}
