// Tile codes: 0 is floor, >= 1 is a wall. Cell (x, y) covers [x, x+1) x [y, y+1).

use crate::error::{Error, Result};

pub type TileCode = u8;

pub const EMPTY: TileCode = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileCode>, // row-major
}

impl Grid {
    /// Builds a grid from rows. All rows must have the same, non-zero length.
    pub fn from_rows<R: AsRef<[TileCode]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if height == 0 || width == 0 {
            return Err(Error::EmptyGrid);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != width {
                return Err(Error::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            tiles.extend_from_slice(cells);
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// A `width` x `height` room of empty floor enclosed by a one tile border of `wall`.
    pub fn bordered(width: usize, height: usize, wall: TileCode) -> Result<Self> {
        let rows: Vec<Vec<TileCode>> = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        let edge = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
                        if edge { wall } else { EMPTY }
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(&rows)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn tile_at(&self, x: i64, y: i64) -> Result<TileCode> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.tiles[y as usize * self.width + x as usize])
    }

    /// Tile under a continuous point, `None` outside the grid or for NaN/inf.
    #[inline]
    pub fn tile_at_point(&self, x: f32, y: f32) -> Option<TileCode> {
        let (cx, cy) = cell_of(x, y)?;
        self.tile_at(cx, cy).ok()
    }

    /// Movement policy: anything outside the grid or on a wall tile blocks.
    #[inline]
    pub fn blocks(&self, x: f32, y: f32) -> bool {
        self.tile_at_point(x, y).is_none_or(|code| code != EMPTY)
    }

    /// Distinct tile codes in ascending order.
    pub fn codes(&self) -> Vec<TileCode> {
        let mut seen = [false; 256];
        for &code in &self.tiles {
            seen[code as usize] = true;
        }
        (0..=255u8).filter(|&c| seen[c as usize]).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileCode]> {
        self.tiles.chunks_exact(self.width)
    }
}

/// Cell containing a continuous point. `None` for non-finite input, which
/// would otherwise cast to cell 0.
#[inline]
pub fn cell_of(x: f32, y: f32) -> Option<(i64, i64)> {
    if !(x.is_finite() && y.is_finite()) {
        return None;
    }
    Some((x.floor() as i64, y.floor() as i64))
}
