use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::grid::{EMPTY, Grid, TileCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(190, 190, 190);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0x00RRGGBB`, the pixel layout softbuffer expects.
    #[inline]
    pub const fn to_pixel(self) -> u32 {
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor {
            value: s.to_string(),
        };

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel =
                |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Color::BLACK),
            "white" => Ok(Color::WHITE),
            "gray" | "grey" => Ok(Color::GRAY),
            "red" => Ok(Color::RED),
            "green" => Ok(Color::GREEN),
            "blue" => Ok(Color::BLUE),
            "yellow" => Ok(Color::YELLOW),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Wall colors indexed by tile code. Code 0 has no color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePalette {
    colors: BTreeMap<TileCode, Color>,
}

impl TilePalette {
    pub fn new(colors: BTreeMap<TileCode, Color>) -> Result<Self> {
        if colors.contains_key(&EMPTY) {
            return Err(Error::ColorForEmptyTile);
        }
        Ok(Self { colors })
    }

    /// Parses string keys as they come out of a TOML table.
    pub fn from_named(entries: &BTreeMap<String, Color>) -> Result<Self> {
        let colors = entries
            .iter()
            .map(|(key, color)| {
                key.trim()
                    .parse::<TileCode>()
                    .map(|code| (code, *color))
                    .map_err(|_| Error::InvalidTileCode { key: key.clone() })
            })
            .collect::<Result<BTreeMap<_, _>>>()?;
        Self::new(colors)
    }

    /// `None` for the empty tile and for codes without an entry.
    #[inline]
    pub fn get(&self, code: TileCode) -> Option<Color> {
        self.colors.get(&code).copied()
    }

    /// Fails on the first wall code in `grid` with no color.
    pub fn check_covers(&self, grid: &Grid) -> Result<()> {
        match grid
            .codes()
            .into_iter()
            .find(|&code| code != EMPTY && !self.colors.contains_key(&code))
        {
            Some(code) => Err(Error::MissingTileColor { code }),
            None => Ok(()),
        }
    }
}

impl Default for TilePalette {
    fn default() -> Self {
        Self {
            colors: BTreeMap::from([(1, Color::GRAY), (2, Color::BLUE)]),
        }
    }
}
