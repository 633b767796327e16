use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::direction::{Axis, Direction};
use super::error::PlacementError;
use super::grid::{CubeGrid, GridCell};
use super::state::FoodCell;

/// Picks free surface cells for food by rejection sampling
#[derive(Debug, Clone)]
pub struct FoodPlacer {
    rng: StdRng,
    size: i32,
    max_attempts: u32,
}

impl FoodPlacer {
    /// Create a placer; a fixed `seed` makes placements reproducible
    pub fn new(grid: &CubeGrid, max_attempts: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            size: grid.size(),
            max_attempts,
        }
    }

    /// Random surface cell: a face is chosen uniformly, then the two
    /// coordinates that run along it.
    pub fn sample(&mut self) -> GridCell {
        let normal = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        let face = if normal.is_positive() { self.size - 1 } else { 0 };

        Axis::ALL
            .into_iter()
            .fold(GridCell::default(), |cell, axis| {
                let value = if axis == normal.axis() {
                    face
                } else {
                    self.rng.gen_range(0..self.size)
                };
                cell.with_coord(axis, value)
            })
    }

    /// Spawn food at a random free surface cell.
    ///
    /// Gives up after the attempt budget; the caller is expected to try again
    /// on a later tick.
    pub fn place(
        &mut self,
        occupied: impl Fn(GridCell) -> bool,
    ) -> Result<FoodCell, PlacementError> {
        for _ in 0..self.max_attempts {
            let cell = self.sample();
            if !occupied(cell) {
                return Ok(FoodCell { cell });
            }
        }
        Err(PlacementError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
