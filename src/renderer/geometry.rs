//! Rounded tile tessellation.
//!
//! An item is covered by a 3×3 grid of tiles whose inner grid lines sit one
//! corner radius in from each edge:
//!
//! ```text
//!  0 ── 1 ────────── 2 ── 3
//!  │ c  │    edge    │ c  │
//!  4 ── 5 ────────── 6 ── 7
//!  │edge│   center   │edge│
//!  8 ── 9 ────────── 10 ─ 11
//!  │ c  │    edge    │ c  │
//!  12 ─ 13 ───────── 14 ─ 15
//! ```
//!
//! The fragment shader resolves the rounded outline with an SDF, so the corner
//! tiles are the only ones where coverage is partial. Vertex and index counts
//! never change, which lets a retile overwrite the existing storage.

use bytemuck::Zeroable;

use crate::layout::Size;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TileVertex {
    /// Position in item-local logical pixels
    pub position: [f32; 2],
    /// Position normalized to 0..1 over the item
    pub uv: [f32; 2],
}

impl TileVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TileVertex>() as wgpu::BufferAddress,
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
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

const GRID: usize = 4;
pub const TILE_VERTEX_COUNT: usize = GRID * GRID;
pub const TILE_INDEX_COUNT: usize = (GRID - 1) * (GRID - 1) * 6;

/// CPU-side vertex/index data for one item, cached against the size it was
/// built for.
#[derive(Debug, Clone)]
pub struct GeometryBuffer {
    vertices: Vec<TileVertex>,
    indices: Vec<u16>,
    size: Size,
    radius: f32,
    /// Bumped on every retile so GPU copies know when to re-upload
    revision: u64,
}

impl GeometryBuffer {
    pub fn tiled(size: Size, radius: f32) -> Self {
        let mut buffer = Self {
            vertices: vec![TileVertex::zeroed(); TILE_VERTEX_COUNT],
            indices: tile_indices(),
            size,
            radius,
            revision: 0,
        };
        buffer.fill_vertices();
        buffer
    }

    /// Rebuild vertex positions in place for a new size or radius.
    /// Returns false (and leaves the buffer untouched) when nothing changed.
    pub fn retile(&mut self, size: Size, radius: f32) -> bool {
        if self.size == size && self.radius == radius {
            return false;
        }
        self.size = size;
        self.radius = radius;
        self.fill_vertices();
        self.revision += 1;
        true
    }

    pub fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Corner radius after clamping to half of the smaller dimension
    pub fn effective_radius(&self) -> f32 {
        clamp_radius(self.size, self.radius)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn fill_vertices(&mut self) {
        let width = self.size.width.max(0.0);
        let height = self.size.height.max(0.0);
        let r = clamp_radius(self.size, self.radius);
        let xs = [0.0, r, width - r, width];
        let ys = [0.0, r, height - r, height];

        for (row, y) in ys.iter().enumerate() {
            for (col, x) in xs.iter().enumerate() {
                self.vertices[row * GRID + col] = TileVertex {
                    position: [*x, *y],
                    uv: [normalize(*x, width), normalize(*y, height)],
                };
            }
        }
    }
}

fn clamp_radius(size: Size, radius: f32) -> f32 {
    let max_radius = (size.width.min(size.height) / 2.0).max(0.0);
    radius.max(0.0).min(max_radius)
}

fn normalize(value: f32, extent: f32) -> f32 {
    if extent > 0.0 {
        value / extent
    } else {
        0.0
    }
}

fn tile_indices() -> Vec<u16> {
    let mut indices = Vec::with_capacity(TILE_INDEX_COUNT);
    for row in 0..GRID - 1 {
        for col in 0..GRID - 1 {
            let top_left = (row * GRID + col) as u16;
            let top_right = top_left + 1;
            let bottom_left = top_left + GRID as u16;
            let bottom_right = bottom_left + 1;
            indices.extend_from_slice(&[
                top_left,
                top_right,
                bottom_left,
                top_right,
                bottom_right,
                bottom_left,
            ]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_counts() {
        let geometry = GeometryBuffer::tiled(Size::new(100.0, 40.0), 8.0);
        assert_eq!(geometry.vertices().len(), TILE_VERTEX_COUNT);
        assert_eq!(geometry.indices().len(), TILE_INDEX_COUNT);
        assert!(geometry
            .indices()
            .iter()
            .all(|&i| (i as usize) < TILE_VERTEX_COUNT));
    }

    #[test]
    fn test_grid_lines_follow_radius() {
        let geometry = GeometryBuffer::tiled(Size::new(100.0, 40.0), 8.0);
        let v = geometry.vertices();
        assert_eq!(v[0].position, [0.0, 0.0]);
        assert_eq!(v[5].position, [8.0, 8.0]);
        assert_eq!(v[10].position, [92.0, 32.0]);
        assert_eq!(v[15].position, [100.0, 40.0]);
        assert_eq!(v[15].uv, [1.0, 1.0]);
    }

    #[test]
    fn test_radius_is_clamped() {
        let geometry = GeometryBuffer::tiled(Size::new(20.0, 10.0), 50.0);
        assert_eq!(geometry.effective_radius(), 5.0);
        assert_eq!(geometry.vertices()[6].position, [15.0, 5.0]);
    }

    #[test]
    fn test_retile_same_size_is_noop() {
        let mut geometry = GeometryBuffer::tiled(Size::new(50.0, 50.0), 4.0);
        assert!(!geometry.retile(Size::new(50.0, 50.0), 4.0));
        assert_eq!(geometry.revision(), 0);
    }

    #[test]
    fn test_retile_reuses_storage() {
        let mut geometry = GeometryBuffer::tiled(Size::new(50.0, 50.0), 4.0);
        let before = geometry.vertices().as_ptr();
        assert!(geometry.retile(Size::new(80.0, 30.0), 4.0));
        assert_eq!(geometry.vertices().as_ptr(), before);
        assert_eq!(geometry.revision(), 1);
        assert_eq!(geometry.vertices()[15].position, [80.0, 30.0]);
    }

    #[test]
    fn test_empty_size_produces_degenerate_tiles() {
        let geometry = GeometryBuffer::tiled(Size::zero(), 4.0);
        assert!(geometry
            .vertices()
            .iter()
            .all(|v| v.position == [0.0, 0.0] && v.uv == [0.0, 0.0]));
    }
}
