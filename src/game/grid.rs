//! Cube lattice: cells, surface membership and world-space anchors.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::direction::{Axis, Direction, FaceNormal};
use super::error::ConfigError;

/// A lattice point of the N x N x N cube
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy, dz) = direction.delta();
        self.moved_by(dx, dy, dz)
    }

    pub fn coord(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn with_coord(mut self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
        self
    }
}

/// Coordinate range `0..=max` shared by all three axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeBounds {
    max: i32,
}

impl LatticeBounds {
    pub fn new(size: i32) -> Self {
        Self { max: size - 1 }
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Check if a cell lies inside the lattice
    pub fn contains(&self, cell: GridCell) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| (0..=self.max).contains(&cell.coord(axis)))
    }

    /// Check if a cell lies on the outer shell of the lattice
    pub fn is_surface(&self, cell: GridCell) -> bool {
        self.contains(cell)
            && Axis::ALL.iter().any(|&axis| {
                let c = cell.coord(axis);
                c == 0 || c == self.max
            })
    }

    /// Bounds the cell lies beyond, as the outward direction of each one
    pub fn exceeded(&self, cell: GridCell) -> impl Iterator<Item = Direction> + '_ {
        Axis::ALL.into_iter().filter_map(move |axis| {
            let c = cell.coord(axis);
            if c > self.max {
                Some(Direction::along(axis, true))
            } else if c < 0 {
                Some(Direction::along(axis, false))
            } else {
                None
            }
        })
    }
}

/// The logical cube lattice.
///
/// Everything derived from the grid size and spacing is computed once here and
/// never recomputed per tick.
#[derive(Debug, Clone)]
pub struct CubeGrid {
    size: i32,
    bounds: LatticeBounds,
    spacing: f32,
    half_extent: f32,
    surface: Vec<GridCell>,
}

impl CubeGrid {
    /// Create a grid of `size` cells per edge, spaced `unit_size + gap` apart
    pub fn new(size: usize, unit_size: f32, gap: f32) -> Result<Self, ConfigError> {
        if size < 2 {
            return Err(ConfigError::GridTooSmall(size));
        }
        let size = i32::try_from(size).map_err(|_| ConfigError::GridTooLarge(size))?;
        let spacing = unit_size + gap;
        let half_extent = (size - 1) as f32 * spacing / 2.0;

        let bounds = LatticeBounds::new(size);
        let mut surface = Vec::new();
        for x in 0..size {
            for y in 0..size {
                for z in 0..size {
                    let cell = GridCell::new(x, y, z);
                    if bounds.is_surface(cell) {
                        surface.push(cell);
                    }
                }
            }
        }

        Ok(Self {
            size,
            bounds,
            spacing,
            half_extent,
            surface,
        })
    }

    /// Cells per edge (N)
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Largest valid coordinate (N - 1)
    pub fn max_coord(&self) -> i32 {
        self.bounds.max()
    }

    pub fn bounds(&self) -> LatticeBounds {
        self.bounds
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        self.bounds.contains(cell)
    }

    pub fn is_surface(&self, cell: GridCell) -> bool {
        self.bounds.is_surface(cell)
    }

    /// All surface cells, ordered by x, then y, then z
    pub fn surface_cells(&self) -> &[GridCell] {
        &self.surface
    }

    pub fn surface_count(&self) -> usize {
        self.surface.len()
    }

    /// World-space anchor of a cell, with the whole lattice centered on the origin
    pub fn anchor(&self, cell: GridCell) -> Vec3 {
        Vec3::new(cell.x as f32, cell.y as f32, cell.z as f32) * self.spacing
            - Vec3::splat(self.half_extent)
    }

    /// Check if a cell lies on the plane of the face with the given normal
    pub fn is_on_face(&self, cell: GridCell, normal: FaceNormal) -> bool {
        self.contains(cell) && cell.coord(normal.axis()) == self.face_coord(normal)
    }

    /// Coordinate along the normal's axis shared by every cell of that face
    pub fn face_coord(&self, normal: FaceNormal) -> i32 {
        if normal.is_positive() {
            self.max_coord()
        } else {
            0
        }
    }

    /// Canonical face of a surface cell.
    ///
    /// Edge and corner cells belong to several faces; the first match in the
    /// order +Z, -Z, +X, -X, +Y, -Y wins. Only used for placement and display,
    /// never to override the normal a snake arrived with.
    pub fn surface_normal(&self, cell: GridCell) -> Option<FaceNormal> {
        const PRIORITY: [Direction; 6] = [
            Direction::PosZ,
            Direction::NegZ,
            Direction::PosX,
            Direction::NegX,
            Direction::PosY,
            Direction::NegY,
        ];
        PRIORITY
            .into_iter()
            .find(|&normal| self.is_on_face(cell, normal))
    }

    /// Cell of the face with `normal` at screen column `col` and row `row`,
    /// counted from the top-left corner when viewed from outside the cube.
    pub fn face_cell(&self, normal: FaceNormal, col: i32, row: i32) -> GridCell {
        let (right, up) = normal.view_axes();
        let max = self.max_coord();
        let along_right = if right.is_positive() { col } else { max - col };
        let along_up = if up.is_positive() { max - row } else { row };

        GridCell::new(0, 0, 0)
            .with_coord(normal.axis(), self.face_coord(normal))
            .with_coord(right.axis(), along_right)
            .with_coord(up.axis(), along_up)
    }
}
