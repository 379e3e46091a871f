use log::info;

use crate::caster::RayCaster;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::frame::{Frame, compose_frame};
use crate::minimap::MinimapStyle;
use crate::palette::Color;
use crate::player::Player;
use crate::projection::Viewport;
use crate::world::World;

/// Discrete movement requests from the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
}

/// The one world and the one player, plus the settings needed to draw them.
#[derive(Debug, Clone)]
pub struct Session {
    pub world: World,
    pub player: Player,
    pub caster: RayCaster,
    pub minimap: MinimapStyle,
    pub background: Color,
}

impl Session {
    pub fn from_config(config: &Config) -> Result<Self> {
        config.check_settings()?;

        let grid = config.map.grid()?;
        let palette = config.palette.tile_palette()?;
        let world = World::new(grid, palette, config.palette.boundary, config.palette.open)?;

        let grid = world.grid();
        let [x, y] = config
            .player
            .spawn
            .unwrap_or([grid.width() as f32 / 2.0, grid.height() as f32 / 2.0]);
        if grid.blocks(x, y) {
            return Err(Error::SpawnBlocked { x, y });
        }

        let p = &config.player;
        let player = Player {
            pos: [x, y],
            yaw: p.angle_deg.to_radians(),
            speed: p.speed,
            turn_speed: p.turn_speed_deg.to_radians(),
            fov: p.fov_deg.to_radians(),
            ray_count: p.ray_count,
        };

        info!(
            "session: {}x{} grid, spawn ({x:.2}, {y:.2}), {} rays over {:.1} deg",
            grid.width(),
            grid.height(),
            p.ray_count,
            p.fov_deg
        );

        Ok(Self {
            world,
            player,
            caster: RayCaster::new(config.caster.step),
            minimap: config.minimap.clone(),
            background: config.palette.background,
        })
    }

    /// Returns whether the pose changed. A blocked move is not an error.
    pub fn apply_move(&mut self, m: Move) -> bool {
        let grid = self.world.grid();
        match m {
            Move::Forward => self.player.move_forward(grid),
            Move::Backward => self.player.move_backward(grid),
            Move::StrafeLeft => self.player.strafe_left(grid),
            Move::StrafeRight => self.player.strafe_right(grid),
        }
    }

    pub fn rotate(&mut self, delta_px: f32) {
        self.player.rotate(delta_px);
    }

    pub fn frame(&self, viewport: Viewport) -> Frame {
        compose_frame(
            &self.world,
            &self.player,
            &self.caster,
            &self.minimap,
            viewport,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_spawns_in_center() {
        let session = Session::from_config(&Config::default()).unwrap();
        assert_eq!(session.player.pos, [5.0, 5.0]);
        assert_eq!(session.player.ray_count, 120);
    }

    #[test]
    fn spawn_in_wall_is_refused() {
        let mut config = Config::default();
        config.player.spawn = Some([0.5, 0.5]);
        assert!(matches!(
            Session::from_config(&config),
            Err(Error::SpawnBlocked { .. })
        ));
    }

    #[test]
    fn nan_spawn_is_refused() {
        let mut config = Config::default();
        config.map.rows = vec![vec![0; 3]; 3];
        config.player.spawn = Some([f32::NAN, f32::NAN]);
        assert!(Session::from_config(&config).is_err());
    }

    #[test]
    fn uncolored_tile_is_refused() {
        let mut config = Config::default();
        config.map.rows[3][3] = 9;
        assert!(matches!(
            Session::from_config(&config),
            Err(Error::MissingTileColor { code: 9 })
        ));
    }

    #[test]
    fn moves_dispatch_to_player() {
        let mut session = Session::from_config(&Config::default()).unwrap();
        assert!(session.apply_move(Move::Backward));
        assert!(session.player.pos[0] < 5.0);
        session.rotate(90.0);
        assert!(session.apply_move(Move::Forward));
        assert!(session.player.pos[1] > 5.0);
    }
}
