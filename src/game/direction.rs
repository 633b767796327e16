use serde::{Deserialize, Serialize};

/// One of the three lattice axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// Axis-aligned unit vector in lattice space.
///
/// Used both for movement headings and for face normals: a face of the cube
/// is identified by the outward direction it points in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

/// Outward normal of a cube face. Same value space as [`Direction`].
pub type FaceNormal = Direction;

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    /// Unit vector along `axis`, pointing toward the high end when `positive`
    pub fn along(axis: Axis, positive: bool) -> Direction {
        match (axis, positive) {
            (Axis::X, true) => Direction::PosX,
            (Axis::X, false) => Direction::NegX,
            (Axis::Y, true) => Direction::PosY,
            (Axis::Y, false) => Direction::NegY,
            (Axis::Z, true) => Direction::PosZ,
            (Axis::Z, false) => Direction::NegZ,
        }
    }

    /// Position of this direction in [`Direction::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Direction::PosX => 0,
            Direction::NegX => 1,
            Direction::PosY => 2,
            Direction::NegY => 3,
            Direction::PosZ => 4,
            Direction::NegZ => 5,
        }
    }

    /// Returns the direction pointing the other way along the same axis
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosY => Direction::NegY,
            Direction::NegY => Direction::PosY,
            Direction::PosZ => Direction::NegZ,
            Direction::NegZ => Direction::PosZ,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns true if both directions lie on the same axis
    pub fn is_parallel(&self, other: Direction) -> bool {
        self.axis() == other.axis()
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::PosX | Direction::NegX => Axis::X,
            Direction::PosY | Direction::NegY => Axis::Y,
            Direction::PosZ | Direction::NegZ => Axis::Z,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Direction::PosX | Direction::PosY | Direction::PosZ)
    }

    /// Returns the delta (dx, dy, dz) for moving in this direction
    pub fn delta(&self) -> (i32, i32, i32) {
        match self {
            Direction::PosX => (1, 0, 0),
            Direction::NegX => (-1, 0, 0),
            Direction::PosY => (0, 1, 0),
            Direction::NegY => (0, -1, 0),
            Direction::PosZ => (0, 0, 1),
            Direction::NegZ => (0, 0, -1),
        }
    }

    /// The four directions that run along a face with this normal
    pub fn tangents(&self) -> [Direction; 4] {
        match self.axis() {
            Axis::X => [
                Direction::PosY,
                Direction::NegY,
                Direction::PosZ,
                Direction::NegZ,
            ],
            Axis::Y => [
                Direction::PosX,
                Direction::NegX,
                Direction::PosZ,
                Direction::NegZ,
            ],
            Axis::Z => [
                Direction::PosX,
                Direction::NegX,
                Direction::PosY,
                Direction::NegY,
            ],
        }
    }

    /// Screen axes `(right, up)` used when looking at the face with this
    /// normal from outside the cube.
    ///
    /// Side faces keep world +Y as up. The top and bottom faces are oriented
    /// so that walking off the front face keeps the same on-screen heading.
    pub fn view_axes(&self) -> (Direction, Direction) {
        match self {
            Direction::PosZ => (Direction::PosX, Direction::PosY),
            Direction::NegZ => (Direction::NegX, Direction::PosY),
            Direction::PosX => (Direction::NegZ, Direction::PosY),
            Direction::NegX => (Direction::PosZ, Direction::PosY),
            Direction::PosY => (Direction::PosX, Direction::NegZ),
            Direction::NegY => (Direction::PosX, Direction::PosZ),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::PosX => "+X",
            Direction::NegX => "-X",
            Direction::PosY => "+Y",
            Direction::NegY => "-Y",
            Direction::PosZ => "+Z",
            Direction::NegZ => "-Z",
        }
    }
}
