use serde::Deserialize;

use crate::caster::RayHit;
use crate::palette::Color;
use crate::player::Player;
use crate::projection::{Rect, Viewport};
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCmd {
    Rect {
        rect: Rect,
        fill: Option<Color>,
        outline: Option<Color>,
    },
    Circle {
        center: [f32; 2],
        radius: f32,
        fill: Color,
        outline: Option<Color>,
    },
    Line {
        from: [f32; 2],
        to: [f32; 2],
        color: Color,
        width: u32,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MinimapStyle {
    /// Fraction of the window taken by the minimap on each axis.
    pub scale: f32,
    pub background: Color,
    pub outline: Color,
    pub player: Color,
    pub view_line: Color,
    pub ray: Color,
    pub player_radius: f32,
    pub view_line_length: f32,
}

impl Default for MinimapStyle {
    fn default() -> Self {
        Self {
            scale: 0.25,
            background: Color::rgb(0x9d, 0x8a, 0x88),
            outline: Color::BLACK,
            player: Color::RED,
            view_line: Color::BLUE,
            ray: Color::YELLOW,
            player_radius: 5.0,
            view_line_length: 50.0,
        }
    }
}

impl MinimapStyle {
    /// Minimap area for a window, anchored at the top-left corner.
    pub fn viewport(&self, window: Viewport) -> Viewport {
        Viewport::new(
            (window.width as f32 * self.scale) as u32,
            (window.height as f32 * self.scale) as u32,
        )
    }
}

/// Draw list, back to front: background, tiles, player marker, rays, facing line.
pub fn draw(
    world: &World,
    player: &Player,
    hits: &[RayHit],
    style: &MinimapStyle,
    viewport: Viewport,
) -> Vec<DrawCmd> {
    let grid = world.grid();
    let tile_w = viewport.width as f32 / grid.width() as f32;
    let tile_h = viewport.height as f32 / grid.height() as f32;
    let scale = |p: [f32; 2]| [p[0] * tile_w, p[1] * tile_h];

    let mut cmds = Vec::with_capacity(1 + grid.width() * grid.height() + hits.len() + 2);

    cmds.push(DrawCmd::Rect {
        rect: Rect {
            x0: 0.0,
            y0: 0.0,
            x1: viewport.width as f32,
            y1: viewport.height as f32,
        },
        fill: Some(style.background),
        outline: None,
    });

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let (x0, y0) = (x as f32 * tile_w, y as f32 * tile_h);
            cmds.push(DrawCmd::Rect {
                rect: Rect {
                    x0,
                    y0,
                    x1: x0 + tile_w,
                    y1: y0 + tile_h,
                },
                fill: world.tile_color(x, y),
                outline: Some(style.outline),
            });
        }
    }

    let center = scale(player.pos);
    cmds.push(DrawCmd::Circle {
        center,
        radius: style.player_radius,
        fill: style.player,
        outline: Some(style.outline),
    });

    // rays use the raw hit point, not the corrected distance
    cmds.extend(hits.iter().map(|hit| DrawCmd::Line {
        from: center,
        to: scale(hit.end),
        color: style.ray,
        width: 1,
    }));

    let [fx, fy] = player.forward();
    cmds.push(DrawCmd::Line {
        from: center,
        to: [
            center[0] + fx * style.view_line_length,
            center[1] + fy * style.view_line_length,
        ],
        color: style.view_line,
        width: 2,
    });

    cmds
}
