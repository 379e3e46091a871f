// TOML configuration. Every field has a default; an empty document gives the
// stock 10x10 room. See configs/gallery.toml for a full example.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::caster::{DEFAULT_STEP, MIN_STEP};
use crate::error::{Error, Result};
use crate::grid::{Grid, TileCode};
use crate::minimap::MinimapStyle;
use crate::palette::{Color, TilePalette};

const MAX_MARKER_RADIUS: f32 = 64.0;
const MAX_VIEW_LINE: f32 = 4096.0;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub window: WindowSection,
    pub player: PlayerSection,
    pub caster: CasterSection,
    pub palette: PaletteSection,
    pub minimap: MinimapStyle,
    pub map: MapSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: "Ray Casted 3D Walls".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSection {
    pub speed: f32,
    pub turn_speed_deg: f32,
    pub fov_deg: f32,
    pub ray_count: usize,
    pub spawn: Option<[f32; 2]>,
    pub angle_deg: f32,
}

impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            speed: 0.1,
            turn_speed_deg: 1.0,
            fov_deg: 60.0,
            ray_count: 120,
            spawn: None,
            angle_deg: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CasterSection {
    pub step: f32,
}

impl Default for CasterSection {
    fn default() -> Self {
        Self { step: DEFAULT_STEP }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaletteSection {
    pub background: Color,
    pub boundary: Color,
    pub open: Color,
    /// Keyed by tile code. TOML keys are strings, so they are parsed on build.
    pub tiles: BTreeMap<String, Color>,
}

impl Default for PaletteSection {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xfe, 0xd6, 0xd3),
            boundary: Color::GRAY,
            open: Color::GRAY,
            tiles: BTreeMap::from([
                ("1".to_string(), Color::GRAY),
                ("2".to_string(), Color::BLUE),
            ]),
        }
    }
}

impl PaletteSection {
    pub fn tile_palette(&self) -> Result<TilePalette> {
        TilePalette::from_named(&self.tiles)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapSection {
    pub rows: Vec<Vec<TileCode>>,
}

impl Default for MapSection {
    fn default() -> Self {
        let rows = (0..10)
            .map(|y| {
                (0..10)
                    .map(|x| u8::from(x == 0 || y == 0 || x == 9 || y == 9))
                    .collect()
            })
            .collect();
        Self { rows }
    }
}

impl MapSection {
    pub fn grid(&self) -> Result<Grid> {
        Grid::from_rows(&self.rows)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.check_settings()?;
        Ok(config)
    }

    /// Range checks on scalar settings. Map and palette consistency is
    /// checked when the session is built.
    pub fn check_settings(&self) -> Result<()> {
        let p = &self.player;
        if !(p.speed > 0.0 && p.speed.is_finite()) {
            return Err(Error::invalid_setting("player.speed", "must be positive"));
        }
        if p.spawn.is_some_and(|[x, y]| !(x.is_finite() && y.is_finite())) {
            return Err(Error::invalid_setting("player.spawn", "must be finite"));
        }
        if !p.angle_deg.is_finite() {
            return Err(Error::invalid_setting("player.angle_deg", "must be finite"));
        }
        if !p.turn_speed_deg.is_finite() {
            return Err(Error::invalid_setting("player.turn_speed_deg", "must be finite"));
        }
        if !(p.fov_deg > 0.0 && p.fov_deg < 180.0) {
            return Err(Error::invalid_setting(
                "player.fov_deg",
                format!("{} is outside (0, 180)", p.fov_deg),
            ));
        }
        if p.ray_count == 0 {
            return Err(Error::invalid_setting("player.ray_count", "must be at least 1"));
        }
        if !(MIN_STEP..=1.0).contains(&self.caster.step) {
            return Err(Error::invalid_setting(
                "caster.step",
                format!("{} is outside [{MIN_STEP}, 1]", self.caster.step),
            ));
        }

        let m = &self.minimap;
        if !(m.scale > 0.0 && m.scale <= 1.0) {
            return Err(Error::invalid_setting("minimap.scale", "must be in (0, 1]"));
        }
        // rasterizer cost grows with both
        if !(0.0..=MAX_MARKER_RADIUS).contains(&m.player_radius) {
            return Err(Error::invalid_setting(
                "minimap.player_radius",
                format!("must be in [0, {MAX_MARKER_RADIUS}]"),
            ));
        }
        if !(0.0..=MAX_VIEW_LINE).contains(&m.view_line_length) {
            return Err(Error::invalid_setting(
                "minimap.view_line_length",
                format!("must be in [0, {MAX_VIEW_LINE}]"),
            ));
        }
        Ok(())
    }
}
