// First-person ray casting over a 2D tile grid, with a top-down minimap.

pub mod caster;
pub mod config;
pub mod error;
pub mod frame;
pub mod grid;
pub mod minimap;
pub mod palette;
pub mod player;
pub mod projection;
pub mod renderer;
pub mod session;
pub mod world;

pub use caster::{HitKind, RayCaster, RayHit};
pub use config::Config;
pub use error::{Error, Result};
pub use frame::{Frame, compose_frame};
pub use grid::{Grid, TileCode};
pub use palette::{Color, TilePalette};
pub use player::Player;
pub use projection::{Rect, RenderSlice, Viewport};
pub use session::{Move, Session};
pub use world::World;
