use crate::caster::RayHit;
use crate::palette::Color;
use crate::player::Player;
use crate::world::World;

/// Smallest corrected distance used for projection.
pub const MIN_DISTANCE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSlice {
    pub column: usize,
    pub corrected_distance: f32,
    pub height: u32, // pixels, capped at the viewport height
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Distance onto the view plane. Zero (or less) is clamped to [`MIN_DISTANCE`].
#[inline]
pub fn correct_distance(distance: f32, ray_angle: f32, view_angle: f32) -> f32 {
    let corrected = distance * (ray_angle - view_angle).cos();
    if corrected <= 0.0 { MIN_DISTANCE } else { corrected }
}

/// `min(H, round(H / d))`.
#[inline]
pub fn wall_height(viewport_height: u32, corrected_distance: f32) -> u32 {
    let h = viewport_height as f32;
    let projected = (h / corrected_distance).round();
    if projected >= h { viewport_height } else { projected as u32 }
}

pub fn project_slice(
    column: usize,
    hit: &RayHit,
    player: &Player,
    world: &World,
    viewport: Viewport,
) -> RenderSlice {
    let corrected_distance = correct_distance(hit.distance, hit.angle, player.yaw);
    let height = wall_height(viewport.height, corrected_distance);

    let column_width = viewport.width as f32 / player.ray_count as f32;
    let (h, wall) = (viewport.height as f32, height as f32);
    let rect = Rect {
        x0: column as f32 * column_width,
        y0: 0.5 * (h - wall),
        x1: (column + 1) as f32 * column_width,
        y1: 0.5 * (h + wall),
    };

    RenderSlice {
        column,
        corrected_distance,
        height,
        rect,
        // World construction guarantees every wall tile has a color
        color: world.hit_color(hit.kind).unwrap_or(Color::BLACK),
    }
}
