use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("grid has no tiles")]
    EmptyGrid,

    #[error("grid row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("tile code {code} is used by the map but has no palette color")]
    MissingTileColor { code: u8 },

    #[error("tile code 0 is the empty tile and cannot carry a color")]
    ColorForEmptyTile,

    #[error("invalid tile code key: {key:?}")]
    InvalidTileCode { key: String },

    #[error("invalid color: {value:?}")]
    InvalidColor { value: String },

    #[error("invalid setting {name}: {message}")]
    InvalidSetting { name: &'static str, message: String },

    #[error("spawn point ({x}, {y}) is not an empty tile")]
    SpawnBlocked { x: f32, y: f32 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    #[must_use]
    pub fn invalid_setting(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name,
            message: message.into(),
        }
    }
}
