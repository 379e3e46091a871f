use log::debug;

use crate::caster::{RayCaster, RayHit};
use crate::minimap::{self, DrawCmd, MinimapStyle};
use crate::player::Player;
use crate::projection::{RenderSlice, Viewport, project_slice};
use crate::world::World;

/// Everything the shell needs to draw one frame.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub viewport: Viewport,
    pub slices: Vec<RenderSlice>, // one per ray, left to right
    pub minimap: Vec<DrawCmd>,    // window top-left origin
}

/// Casts every ray once, then projects the 3D view and the minimap from the same hits.
pub fn compose_frame(
    world: &World,
    player: &Player,
    caster: &RayCaster,
    style: &MinimapStyle,
    viewport: Viewport,
) -> Frame {
    let hits: Vec<RayHit> = (0..player.ray_count)
        .map(|i| caster.cast(world.grid(), player.pos, player.ray_angle(i)))
        .collect();

    let slices = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| project_slice(i, hit, player, world, viewport))
        .collect();

    let minimap = minimap::draw(world, player, &hits, style, style.viewport(viewport));

    debug!(
        "frame {}x{}: {} rays from ({:.2}, {:.2}) yaw {:.3}",
        viewport.width,
        viewport.height,
        hits.len(),
        player.pos[0],
        player.pos[1],
        player.yaw
    );

    Frame {
        viewport,
        slices,
        minimap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::palette::{Color, TilePalette};

    #[test]
    fn one_slice_per_ray_tiling_the_width() {
        let world = World::new(
            Grid::bordered(10, 10, 1).unwrap(),
            TilePalette::default(),
            Color::GRAY,
            Color::GRAY,
        )
        .unwrap();
        let player = Player {
            pos: [5.0, 5.0],
            ..Player::default()
        };
        let frame = compose_frame(
            &world,
            &player,
            &RayCaster::default(),
            &MinimapStyle::default(),
            Viewport::new(1200, 600),
        );

        assert_eq!(frame.slices.len(), 120);
        for (i, slice) in frame.slices.iter().enumerate() {
            assert_eq!(slice.column, i);
            assert_eq!(slice.rect.x0, i as f32 * 10.0);
            assert!(slice.height <= 600);
        }
        // background + tiles + rays + marker + facing line
        assert_eq!(frame.minimap.len(), 1 + 100 + 120 + 2);
    }
}
