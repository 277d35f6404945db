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

/// Unpack 0xRRGGBB into an opaque RGBA color
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for scenery and car details
pub mod colors {
    use super::rgb;

    pub const GRASS: [f32; 4] = rgb(0x16a34a); // Green-600
    pub const ROAD: [f32; 4] = rgb(0x4b5563); // Gray-600
    pub const MARKING: [f32; 4] = rgb(0xf3f4f6); // Gray-100
    pub const BORDER: [f32; 4] = rgb(0xffffff);
    pub const WINDOW: [f32; 4] = rgb(0x1f2937);
    pub const HEADLIGHT: [f32; 4] = rgb(0xfcd34d);
    pub const TAILLIGHT: [f32; 4] = rgb(0xef4444);
    pub const HEART_SHINE: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_unpack() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb(0x00ff00), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(rgb(0x0000ff), [0.0, 0.0, 1.0, 1.0]);
    }
}
