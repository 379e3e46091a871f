// Fixed-step ray march. Each sample floors to a cell; the reported distance
// overshoots the wall face by less than one step.

use crate::grid::{EMPTY, Grid, TileCode, cell_of};

pub const DEFAULT_STEP: f32 = 0.1;
pub const MIN_STEP: f32 = 1e-3;

/// What stopped a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    /// A wall tile inside the grid.
    Tile(TileCode),
    /// The march left the grid before meeting a wall.
    Boundary,
    /// Nothing within the search radius.
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub angle: f32,
    pub distance: f32, // raw euclidean, never fisheye-corrected
    pub kind: HitKind,
    pub end: [f32; 2], // where the march stopped
}

#[derive(Debug, Clone, Copy)]
pub struct RayCaster {
    step: f32,
}

impl RayCaster {
    /// Non-positive or non-finite steps fall back to [`DEFAULT_STEP`]; tiny ones are raised to [`MIN_STEP`].
    pub fn new(step: f32) -> Self {
        let step = if step > 0.0 && step.is_finite() {
            step.max(MIN_STEP)
        } else {
            DEFAULT_STEP
        };
        Self { step }
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Search radius for `grid`: its larger dimension.
    #[inline]
    pub fn max_distance(grid: &Grid) -> f32 {
        grid.width().max(grid.height()) as f32
    }

    pub fn cast(&self, grid: &Grid, origin: [f32; 2], angle: f32) -> RayHit {
        let max_distance = Self::max_distance(grid);
        let (dx, dy) = (angle.cos(), angle.sin());
        // hard cap so the march ends even if float rounding never reaches max_distance
        let max_steps = (max_distance / self.step).ceil() as u64 + 1;

        let mut n: u64 = 0;
        loop {
            n += 1;
            // multiply, don't accumulate, so long rays don't drift
            let distance = n as f32 * self.step;
            let end = [origin[0] + dx * distance, origin[1] + dy * distance];

            let tile = cell_of(end[0], end[1]).and_then(|(cx, cy)| grid.tile_at(cx, cy).ok());
            let kind = match tile {
                None => Some(HitKind::Boundary),
                Some(code) if code != EMPTY => Some(HitKind::Tile(code)),
                Some(_) if distance >= max_distance || n >= max_steps => Some(HitKind::Open),
                Some(_) => None,
            };

            if let Some(kind) = kind {
                return RayHit {
                    angle,
                    distance,
                    kind,
                    end,
                };
            }
        }
    }
}

impl Default for RayCaster {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn hits_border_along_each_axis() {
        let grid = Grid::bordered(10, 10, 1).unwrap();
        let caster = RayCaster::default();
        for angle in [0.0, FRAC_PI_2, PI, -FRAC_PI_2] {
            let hit = caster.cast(&grid, [5.0, 5.0], angle);
            assert_eq!(hit.kind, HitKind::Tile(1), "angle {angle}");
            // every border face is 4 cells from the center
            assert!(
                (hit.distance - 4.0).abs() <= caster.step() + 1e-4,
                "angle {angle}: {}",
                hit.distance
            );
        }
    }

    #[test]
    fn reports_tile_code_hit() {
        let grid = Grid::from_rows(&[
            [1u8, 1, 1, 1, 1],
            [1, 0, 0, 2, 1],
            [1, 1, 1, 1, 1],
        ])
        .unwrap();
        let hit = RayCaster::default().cast(&grid, [1.5, 1.5], 0.0);
        assert_eq!(hit.kind, HitKind::Tile(2));
        assert_relative_eq!(hit.distance, 1.5, epsilon = 0.11);
        assert_eq!(cell_of(hit.end[0], hit.end[1]), Some((3, 1)));
    }

    #[test]
    fn leaving_grid_is_boundary_hit() {
        let grid = Grid::from_rows(&[[0u8; 4]; 4]).unwrap();
        let hit = RayCaster::default().cast(&grid, [2.0, 2.0], PI);
        assert_eq!(hit.kind, HitKind::Boundary);
        // x = 2 - d floors to -1 once d > 2
        assert!(hit.distance > 2.0 && hit.distance <= 2.1 + 1e-4);
    }

    #[test]
    fn diagonal_in_open_room_runs_out() {
        // the diagonal of a 10x10 room is longer than the 10 cell search radius
        let grid = Grid::from_rows(&[[0u8; 10]; 10]).unwrap();
        let caster = RayCaster::new(0.5);
        let hit = caster.cast(&grid, [0.5, 0.5], PI / 4.0);
        assert_eq!(hit.kind, HitKind::Open);
        assert_relative_eq!(hit.distance, 10.0);
        assert_relative_eq!(hit.end[0], 0.5 + 10.0 * (PI / 4.0).cos(), epsilon = 1e-4);
    }

    #[test]
    fn step_is_sanitized() {
        assert_eq!(RayCaster::new(0.0).step(), DEFAULT_STEP);
        assert_eq!(RayCaster::new(-1.0).step(), DEFAULT_STEP);
        assert_eq!(RayCaster::new(f32::NAN).step(), DEFAULT_STEP);
        assert_eq!(RayCaster::new(1e-12).step(), MIN_STEP);
    }

    #[test]
    fn tiny_step_still_terminates() {
        let grid = Grid::from_rows(&[[0u8; 4]; 4]).unwrap();
        let hit = RayCaster::new(1e-12).cast(&grid, [0.5, 0.5], PI / 4.0);
        assert_eq!(hit.kind, HitKind::Open);
        assert!(hit.distance <= 4.0 + MIN_STEP + 1e-3);
    }

    #[test]
    fn nan_origin_is_boundary() {
        let grid = Grid::bordered(10, 10, 1).unwrap();
        let hit = RayCaster::default().cast(&grid, [f32::NAN, 5.0], 0.0);
        assert_eq!(hit.kind, HitKind::Boundary);
        let hit = RayCaster::default().cast(&grid, [5.0, 5.0], f32::NAN);
        assert_eq!(hit.kind, HitKind::Boundary);
    }
}
