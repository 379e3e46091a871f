use std::f32::consts::FRAC_PI_2;

use log::trace;

use crate::grid::Grid;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: [f32; 2],   // (x, y) in grid cells, +y points down the map
    pub yaw: f32,        // radians, not normalized
    pub speed: f32,      // cells per move event
    pub turn_speed: f32, // radians per pixel of pointer motion
    pub fov: f32,        // radians
    pub ray_count: usize,
}

impl Player {
    pub fn forward(&self) -> [f32; 2] {
        [self.yaw.cos(), self.yaw.sin()]
    }

    pub fn move_forward(&mut self, grid: &Grid) -> bool {
        self.step_along(self.yaw, 1.0, grid)
    }

    pub fn move_backward(&mut self, grid: &Grid) -> bool {
        self.step_along(self.yaw, -1.0, grid)
    }

    pub fn strafe_left(&mut self, grid: &Grid) -> bool {
        self.step_along(self.yaw - FRAC_PI_2, 1.0, grid)
    }

    pub fn strafe_right(&mut self, grid: &Grid) -> bool {
        self.step_along(self.yaw + FRAC_PI_2, 1.0, grid)
    }

    #[inline]
    pub fn rotate(&mut self, delta_px: f32) {
        self.yaw += delta_px * self.turn_speed;
    }

    /// Angle of ray `i`, sweeping left to right across the field of view.
    #[inline]
    pub fn ray_angle(&self, i: usize) -> f32 {
        self.yaw - 0.5 * self.fov + i as f32 * (self.fov / self.ray_count as f32)
    }

    // A blocked move leaves the pose untouched and returns false.
    fn step_along(&mut self, angle: f32, sign: f32, grid: &Grid) -> bool {
        let x = self.pos[0] + sign * angle.cos() * self.speed;
        let y = self.pos[1] + sign * angle.sin() * self.speed;
        if grid.blocks(x, y) {
            trace!("move to ({x:.3}, {y:.3}) blocked");
            return false;
        }
        self.pos = [x, y];
        true
    }
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: [0.0, 0.0],
            yaw: 0.0,
            speed: 0.1,
            turn_speed: 1f32.to_radians(),
            fov: 60f32.to_radians(),
            ray_count: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    fn room() -> Grid {
        Grid::bordered(10, 10, 1).unwrap()
    }

    fn centered() -> Player {
        Player {
            pos: [5.0, 5.0],
            ..Player::default()
        }
    }

    #[test]
    fn strafe_is_perpendicular_to_facing() {
        let grid = room();
        let mut p = centered();
        assert!(p.strafe_right(&grid));
        // facing +x, right is +y on a y-down map
        assert_relative_eq!(p.pos[0], 5.0, epsilon = 1e-6);
        assert_relative_eq!(p.pos[1], 5.1, epsilon = 1e-6);
        assert!(p.strafe_left(&grid));
        assert!(p.strafe_left(&grid));
        assert_relative_eq!(p.pos[1], 4.9, epsilon = 1e-5);
    }

    #[test]
    fn forward_then_backward_returns() {
        let grid = room();
        let mut p = centered();
        p.yaw = 0.7;
        assert!(p.move_forward(&grid));
        assert!(p.move_backward(&grid));
        assert_relative_eq!(p.pos[0], 5.0, epsilon = 1e-5);
        assert_relative_eq!(p.pos[1], 5.0, epsilon = 1e-5);
    }

    #[test]
    fn wall_stops_forward_motion() {
        let grid = room();
        let mut p = centered();
        let mut accepted = 0;
        for _ in 0..100 {
            if p.move_forward(&grid) {
                accepted += 1;
            }
        }
        // 5.0 -> ~8.9 in steps of 0.1, the border starts at x = 9
        assert!((39..=40).contains(&accepted), "accepted {accepted}");
        assert!(p.pos[0] < 9.0);
        assert!(p.pos[0] > 8.8);

        let before = p.pos;
        assert!(!p.move_forward(&grid));
        assert_eq!(p.pos, before);
    }

    #[test]
    fn leaving_grid_is_a_collision() {
        // open grid, no border walls
        let grid = Grid::from_rows(&[[0u8; 3]; 3]).unwrap();
        let mut p = Player {
            pos: [0.05, 1.5],
            yaw: PI,
            ..Player::default()
        };
        assert!(!p.move_forward(&grid));
        assert_eq!(p.pos, [0.05, 1.5]);
    }

    #[test]
    fn nan_heading_never_moves() {
        let grid = Grid::from_rows(&[[0u8; 3]; 3]).unwrap();
        let mut p = Player {
            pos: [0.5, 0.5],
            yaw: f32::NAN,
            ..Player::default()
        };
        assert!(!p.move_forward(&grid));
        assert!(!p.strafe_right(&grid));
        assert_eq!(p.pos, [0.5, 0.5]);
    }

    #[test]
    fn rotation_is_unbounded_and_reversible() {
        let mut p = centered();
        p.rotate(1000.0);
        assert!(p.yaw > 2.0 * PI);
        p.rotate(-1000.0);
        assert_relative_eq!(p.yaw, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn ray_angles_span_fov() {
        let p = centered();
        assert_relative_eq!(p.ray_angle(0), -p.fov / 2.0);
        assert_relative_eq!(p.ray_angle(60), 0.0, epsilon = 1e-6);
        let step = p.fov / 120.0;
        assert_relative_eq!(p.ray_angle(119), p.fov / 2.0 - step, epsilon = 1e-6);
    }
}
