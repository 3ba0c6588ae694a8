//! Orthographic camera over the torus domain

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec4};

/// Camera uniform for GPU
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Side length of a particle square in domain units
    pub particle_size: f32,
    pub _padding: [f32; 3],
}

/// Fits the whole domain into the window, letterboxed so squares stay square.
///
/// Domain `y` grows downward, matching window coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Camera2d {
    pub domain: Vec2,
    pub aspect: f32,
    pub particle_size: f32,
}

impl Camera2d {
    pub fn new(domain: Vec2, width: u32, height: u32) -> Self {
        Self {
            domain,
            aspect: aspect_ratio(width, height),
            particle_size: 3.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Visible region in domain units as `(min, max)` corners
    pub fn visible_rect(&self) -> (Vec2, Vec2) {
        let domain_aspect = self.domain.x / self.domain.y;
        let size = if self.aspect > domain_aspect {
            Vec2::new(self.domain.y * self.aspect, self.domain.y)
        } else {
            Vec2::new(self.domain.x, self.domain.x / self.aspect)
        };
        let min = (self.domain - size) * 0.5;
        (min, min + size)
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let (min, max) = self.visible_rect();
        Mat4::orthographic_rh(min.x, max.x, max.y, min.y, -1.0, 1.0)
    }

    /// Clip-space position of a domain point
    pub fn project(&self, point: Vec2) -> Vec2 {
        let clip = self.build_view_projection_matrix() * Vec4::new(point.x, point.y, 0.0, 1.0);
        Vec2::new(clip.x, clip.y) / clip.w
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.build_view_projection_matrix().to_cols_array_2d(),
            particle_size: self.particle_size,
            _padding: [0.0; 3],
        }
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
