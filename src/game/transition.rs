//! Movement across the cube surface, including wrapping over edges.
//!
//! Leaving a face is resolved through [`WRAP_TABLE`], one entry per
//! (face normal, exit edge) pair. Every entry follows the same shape:
//!
//! - the new normal is the exit direction (the face we step onto),
//! - the new heading is the old normal reversed (we keep walking "forward",
//!   which on the new face means back toward the far side of the cube),
//! - the exceeded coordinate is clamped back onto its bound and the old
//!   normal's coordinate moves one cell inward (1 or N-2), so the landing
//!   cell sits on the new face and the next step does not wrap again.

use tracing::debug;

use super::direction::{Axis, Direction, FaceNormal};
use super::grid::{CubeGrid, GridCell, LatticeBounds};

/// End of an axis a remapped coordinate is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

/// Coordinate rewrite applied to the out-of-bounds candidate cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remap {
    /// Axis that left the lattice; set to 0 (`Min`) or N-1 (`Max`)
    pub clamp: (Axis, Bound),
    /// Axis of the old normal; set to 1 (`Min`) or N-2 (`Max`)
    pub inset: (Axis, Bound),
}

impl Remap {
    fn apply(&self, candidate: GridCell, max: i32) -> GridCell {
        let (clamp_axis, clamp_bound) = self.clamp;
        let (inset_axis, inset_bound) = self.inset;
        let clamped = match clamp_bound {
            Bound::Min => 0,
            Bound::Max => max,
        };
        let inset = match inset_bound {
            Bound::Min => 1,
            Bound::Max => max - 1,
        };
        candidate
            .with_coord(clamp_axis, clamped)
            .with_coord(inset_axis, inset)
    }
}

/// One row of the wrap table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapRule {
    pub normal: FaceNormal,
    pub exit: Direction,
    pub new_normal: FaceNormal,
    pub new_direction: Direction,
    pub remap: Remap,
}

const fn rule(
    normal: FaceNormal,
    exit: Direction,
    new_normal: FaceNormal,
    new_direction: Direction,
    clamp: (Axis, Bound),
    inset: (Axis, Bound),
) -> WrapRule {
    WrapRule {
        normal,
        exit,
        new_normal,
        new_direction,
        remap: Remap { clamp, inset },
    }
}

use Axis::{X, Y, Z};
use Bound::{Max, Min};
use Direction::{NegX, NegY, NegZ, PosX, PosY, PosZ};

/// Every way to walk off a face: 6 faces x 4 edges.
#[rustfmt::skip]
pub const WRAP_TABLE: [WrapRule; 24] = [
    // +X face (x = N-1)
    rule(PosX, PosY, PosY, NegX, (Y, Max), (X, Max)),
    rule(PosX, NegY, NegY, NegX, (Y, Min), (X, Max)),
    rule(PosX, PosZ, PosZ, NegX, (Z, Max), (X, Max)),
    rule(PosX, NegZ, NegZ, NegX, (Z, Min), (X, Max)),
    // -X face (x = 0)
    rule(NegX, PosY, PosY, PosX, (Y, Max), (X, Min)),
    rule(NegX, NegY, NegY, PosX, (Y, Min), (X, Min)),
    rule(NegX, PosZ, PosZ, PosX, (Z, Max), (X, Min)),
    rule(NegX, NegZ, NegZ, PosX, (Z, Min), (X, Min)),
    // +Y face (y = N-1)
    rule(PosY, PosX, PosX, NegY, (X, Max), (Y, Max)),
    rule(PosY, NegX, NegX, NegY, (X, Min), (Y, Max)),
    rule(PosY, PosZ, PosZ, NegY, (Z, Max), (Y, Max)),
    rule(PosY, NegZ, NegZ, NegY, (Z, Min), (Y, Max)),
    // -Y face (y = 0)
    rule(NegY, PosX, PosX, PosY, (X, Max), (Y, Min)),
    rule(NegY, NegX, NegX, PosY, (X, Min), (Y, Min)),
    rule(NegY, PosZ, PosZ, PosY, (Z, Max), (Y, Min)),
    rule(NegY, NegZ, NegZ, PosY, (Z, Min), (Y, Min)),
    // +Z face (z = N-1)
    rule(PosZ, PosX, PosX, NegZ, (X, Max), (Z, Max)),
    rule(PosZ, NegX, NegX, NegZ, (X, Min), (Z, Max)),
    rule(PosZ, PosY, PosY, NegZ, (Y, Max), (Z, Max)),
    rule(PosZ, NegY, NegY, NegZ, (Y, Min), (Z, Max)),
    // -Z face (z = 0)
    rule(NegZ, PosX, PosX, PosZ, (X, Max), (Z, Min)),
    rule(NegZ, NegX, NegX, PosZ, (X, Min), (Z, Min)),
    rule(NegZ, PosY, PosY, PosZ, (Y, Max), (Z, Min)),
    rule(NegZ, NegY, NegY, PosZ, (Y, Min), (Z, Min)),
];

/// Where the head ends up after a successful move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub cell: GridCell,
    pub direction: Direction,
    pub normal: FaceNormal,
    /// Whether the move crossed onto another face through the wrap table
    pub wrapped: bool,
}

/// Result of asking to move one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The move was rejected; cell, heading and normal stay as they were
    Stall,
    Advance(Landing),
}

impl Transition {
    pub fn landing(&self) -> Option<Landing> {
        match self {
            Transition::Stall => None,
            Transition::Advance(landing) => Some(*landing),
        }
    }

    pub fn is_wrap(&self) -> bool {
        matches!(self, Transition::Advance(landing) if landing.wrapped)
    }
}

/// Stateless movement rules for one grid size
#[derive(Debug, Clone)]
pub struct FaceTransitions {
    bounds: LatticeBounds,
    rules: [[Option<WrapRule>; 6]; 6],
}

impl FaceTransitions {
    pub fn new(grid: &CubeGrid) -> Self {
        let mut rules = [[None; 6]; 6];
        for entry in WRAP_TABLE {
            rules[entry.normal.index()][entry.exit.index()] = Some(entry);
        }
        Self {
            bounds: grid.bounds(),
            rules,
        }
    }

    /// Wrap table entry for leaving the face `normal` across its `exit` edge
    pub fn rule(&self, normal: FaceNormal, exit: Direction) -> Option<&WrapRule> {
        self.rules[normal.index()][exit.index()].as_ref()
    }

    /// Move one cell from `cell` on face `normal` toward `direction`.
    ///
    /// Never validates `direction` against the normal or the previous heading;
    /// callers filter requests before they get here. A step into the interior,
    /// or off the lattice along the normal's own axis, stalls.
    ///
    /// # Panics
    ///
    /// Panics if the candidate leaves the lattice on more than one axis, which
    /// only happens when `cell` itself was outside the lattice.
    pub fn advance(&self, cell: GridCell, normal: FaceNormal, direction: Direction) -> Transition {
        let candidate = cell.moved_in_direction(direction);

        let mut exceeded = self.bounds.exceeded(candidate);
        let exit = exceeded.next();
        assert!(
            exceeded.next().is_none(),
            "single step from {cell:?} toward {direction:?} left the lattice on several axes"
        );

        let Some(exit) = exit else {
            if !self.bounds.is_surface(candidate) {
                return Transition::Stall;
            }
            return Transition::Advance(Landing {
                cell: candidate,
                direction,
                normal,
                wrapped: false,
            });
        };

        let Some(rule) = self.rule(normal, exit) else {
            return Transition::Stall;
        };

        let landed = rule.remap.apply(candidate, self.bounds.max());
        debug!(
            from = ?cell,
            to = ?landed,
            old_normal = ?normal,
            new_normal = ?rule.new_normal,
            "wrapped onto adjacent face"
        );

        Transition::Advance(Landing {
            cell: landed,
            direction: rule.new_direction,
            normal: rule.new_normal,
            wrapped: true,
        })
    }
}
