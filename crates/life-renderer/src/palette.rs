//! Per-kind colors from the Catppuccin Mocha flavor

use bytemuck::{Pod, Zeroable};
use catppuccin::{Color, PALETTE};
use life_physics::{ParticleKind, KIND_COUNT};

/// Kind colors for the fragment stage, indexed by `Particle::kind`
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PaletteUniform {
    pub colors: [[f32; 4]; KIND_COUNT],
}

/// sRGB channel (0-255) to linear light
fn srgb_to_linear(c: u8) -> f32 {
    let x = f32::from(c) / 255.0;
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear RGBA of a palette color, ready for an sRGB surface
pub fn linear_rgba(color: &Color) -> [f32; 4] {
    let rgb = color.rgb;
    [
        srgb_to_linear(rgb.r),
        srgb_to_linear(rgb.g),
        srgb_to_linear(rgb.b),
        1.0,
    ]
}

/// Alpha is red, Beta green, Gamma blue
pub fn kind_color(kind: ParticleKind) -> [f32; 4] {
    let colors = &PALETTE.mocha.colors;
    match kind {
        ParticleKind::Alpha => linear_rgba(&colors.red),
        ParticleKind::Beta => linear_rgba(&colors.green),
        ParticleKind::Gamma => linear_rgba(&colors.blue),
    }
}

/// Clear color behind the particles
pub fn background() -> wgpu::Color {
    let [r, g, b, a] = linear_rgba(&PALETTE.mocha.colors.base);
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: f64::from(a),
    }
}

impl PaletteUniform {
    pub fn mocha() -> Self {
        Self {
            colors: ParticleKind::ALL.map(kind_color),
        }
    }
}
