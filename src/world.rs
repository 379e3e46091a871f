use crate::caster::HitKind;
use crate::error::Result;
use crate::grid::Grid;
use crate::palette::{Color, TilePalette};

/// A grid together with a palette known to cover every wall code in it.
#[derive(Debug, Clone)]
pub struct World {
    grid: Grid,
    palette: TilePalette,
    boundary_color: Color, // ray left the grid
    open_color: Color,     // search radius ran out
}

impl World {
    pub fn new(
        grid: Grid,
        palette: TilePalette,
        boundary_color: Color,
        open_color: Color,
    ) -> Result<Self> {
        palette.check_covers(&grid)?;
        Ok(Self {
            grid,
            palette,
            boundary_color,
            open_color,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Fill color for a slice. `None` only for an empty tile, which the
    /// caster never reports as a hit.
    #[inline]
    pub fn hit_color(&self, kind: HitKind) -> Option<Color> {
        match kind {
            HitKind::Tile(code) => self.palette.get(code),
            HitKind::Boundary => Some(self.boundary_color),
            HitKind::Open => Some(self.open_color),
        }
    }

    #[inline]
    pub fn tile_color(&self, x: usize, y: usize) -> Option<Color> {
        self.grid
            .tile_at(x as i64, y as i64)
            .ok()
            .and_then(|code| self.palette.get(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn refuses_uncovered_grid() {
        let grid = Grid::bordered(4, 4, 7).unwrap();
        let err = World::new(grid, TilePalette::default(), Color::GRAY, Color::GRAY).unwrap_err();
        assert!(matches!(err, Error::MissingTileColor { code: 7 }));
    }

    #[test]
    fn hit_kinds_have_distinct_colors() {
        let grid = Grid::from_rows(&[[1u8, 2], [0, 0]]).unwrap();
        let world = World::new(grid, TilePalette::default(), Color::WHITE, Color::BLACK).unwrap();
        assert_eq!(world.hit_color(HitKind::Tile(2)), Some(Color::BLUE));
        assert_eq!(world.hit_color(HitKind::Boundary), Some(Color::WHITE));
        assert_eq!(world.hit_color(HitKind::Open), Some(Color::BLACK));
        assert_eq!(world.tile_color(0, 0), Some(Color::GRAY));
        assert_eq!(world.tile_color(0, 1), None);
    }
}
