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
    use crate::sim::ItemKind;

    pub const BACKGROUND: [f32; 4] = [0.06, 0.07, 0.09, 1.0];
    pub const RAIL: [f32; 4] = [0.35, 0.37, 0.42, 1.0];
    pub const BELT: [f32; 4] = [0.18, 0.19, 0.22, 1.0];
    pub const BELT_EDGE: [f32; 4] = [0.45, 0.47, 0.5, 1.0];
    pub const ROLLER: [f32; 4] = [0.3, 0.31, 0.34, 1.0];
    pub const TUBE: [f32; 4] = [0.55, 0.58, 0.62, 1.0];
    pub const LIFTER: [f32; 4] = [0.95, 0.65, 0.15, 1.0];
    pub const PAD_OFF: [f32; 4] = [0.25, 0.25, 0.28, 1.0];
    pub const PAD_ON: [f32; 4] = [0.3, 0.9, 1.0, 1.0];
    pub const OVERLAY_ENDED: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
    pub const OVERLAY_PAUSED: [f32; 4] = [0.0, 0.0, 0.0, 0.35];

    /// Fill color for an item kind
    pub fn kind(kind: ItemKind) -> [f32; 4] {
        match kind {
            ItemKind::Bottle => [0.3, 0.75, 0.35, 1.0],
            ItemKind::CircuitBoard => [0.15, 0.55, 0.3, 1.0],
            ItemKind::Glass => [0.55, 0.8, 0.95, 1.0],
            ItemKind::Box => [0.7, 0.5, 0.3, 1.0],
        }
    }

    /// Same hue, dimmed for the target bin background
    pub fn bin(kind: ItemKind) -> [f32; 4] {
        let [r, g, b, _] = self::kind(kind);
        [r * 0.35, g * 0.35, b * 0.35, 1.0]
    }
}
