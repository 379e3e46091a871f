use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::frame::Frame;
use crate::minimap::DrawCmd;
use crate::palette::Color;
use crate::projection::{Rect, RenderSlice};

/// Writes `frame` into a `width * height` buffer of `0x00RRGGBB` pixels.
pub fn render_frame(buf: &mut [u32], width: usize, height: usize, frame: &Frame, background: Color) {
    if width == 0 || height == 0 {
        return;
    }
    debug_assert!(buf.len() >= width * height);

    draw_view(buf, width, height, &frame.slices, background);

    let mut canvas = Canvas {
        buf,
        width,
        height,
    };
    for cmd in &frame.minimap {
        canvas.draw(cmd);
    }
}

// 3D view, rows in parallel
fn draw_view(buf: &mut [u32], width: usize, height: usize, slices: &[RenderSlice], bg: Color) {
    let bg = bg.to_pixel();
    let spans: Vec<(i64, i64, i64, i64, u32)> = slices
        .iter()
        .map(|s| {
            let (x0, y0, x1, y1) = pixel_bounds(&s.rect);
            (x0, y0, x1, y1, s.color.to_pixel())
        })
        .collect();

    buf[..width * height]
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            row.fill(bg);
            let y = y as i64;
            for &(x0, y0, x1, y1, color) in &spans {
                if y < y0 || y >= y1 {
                    continue;
                }
                let x0 = x0.clamp(0, width as i64) as usize;
                let x1 = x1.clamp(0, width as i64) as usize;
                row[x0..x1.max(x0)].fill(color);
            }
        });
}

#[inline]
fn pixel_bounds(r: &Rect) -> (i64, i64, i64, i64) {
    (
        r.x0.round() as i64,
        r.y0.round() as i64,
        r.x1.round() as i64,
        r.y1.round() as i64,
    )
}

struct Canvas<'a> {
    buf: &'a mut [u32],
    width: usize,
    height: usize,
}

impl Canvas<'_> {
    fn draw(&mut self, cmd: &DrawCmd) {
        match *cmd {
            DrawCmd::Rect {
                rect,
                fill,
                outline,
            } => {
                let (x0, y0, x1, y1) = pixel_bounds(&rect);
                if let Some(fill) = fill {
                    self.fill_rect(x0, y0, x1, y1, fill.to_pixel());
                }
                if let Some(outline) = outline {
                    let c = outline.to_pixel();
                    self.fill_rect(x0, y0, x1, y0 + 1, c);
                    self.fill_rect(x0, y1 - 1, x1, y1, c);
                    self.fill_rect(x0, y0, x0 + 1, y1, c);
                    self.fill_rect(x1 - 1, y0, x1, y1, c);
                }
            }
            DrawCmd::Circle {
                center,
                radius,
                fill,
                outline,
            } => self.circle(center, radius, fill.to_pixel(), outline.map(Color::to_pixel)),
            DrawCmd::Line {
                from,
                to,
                color,
                width,
            } => self.line(from, to, color.to_pixel(), width),
        }
    }

    #[inline]
    fn put(&mut self, x: i64, y: i64, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: u32) {
        let x0 = x0.clamp(0, self.width as i64) as usize;
        let x1 = x1.clamp(0, self.width as i64) as usize;
        let y0 = y0.clamp(0, self.height as i64) as usize;
        let y1 = y1.clamp(0, self.height as i64) as usize;
        if x0 >= x1 {
            return;
        }
        for y in y0..y1 {
            let row = y * self.width;
            self.buf[row + x0..row + x1].fill(color);
        }
    }

    fn circle(&mut self, center: [f32; 2], radius: f32, fill: u32, outline: Option<u32>) {
        let r = radius.max(0.0);
        let (cx, cy) = (center[0], center[1]);
        let (x0, x1) = ((cx - r).floor() as i64, (cx + r).ceil() as i64);
        let (y0, y1) = ((cy - r).floor() as i64, (cy + r).ceil() as i64);
        let inner = (r - 1.0).max(0.0);

        for y in y0..=y1 {
            for x in x0..=x1 {
                // sample at the pixel center
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d2 = dx * dx + dy * dy;
                if d2 > r * r {
                    continue;
                }
                let color = match outline {
                    Some(o) if d2 > inner * inner => o,
                    _ => fill,
                };
                self.put(x, y, color);
            }
        }
    }

    // Bresenham; wider lines stamp a square brush at each step
    fn line(&mut self, from: [f32; 2], to: [f32; 2], color: u32, width: u32) {
        let (mut x, mut y) = (from[0].floor() as i64, from[1].floor() as i64);
        let (end_x, end_y) = (to[0].floor() as i64, to[1].floor() as i64);

        let dx = (end_x - x).abs();
        let dy = -(end_y - y).abs();
        let sx = if end_x > x { 1 } else { -1 };
        let sy = if end_y > y { 1 } else { -1 };
        let mut err = dx + dy;

        let lo = -((width.max(1) as i64 - 1) / 2);
        let hi = lo + width.max(1) as i64;

        loop {
            for oy in lo..hi {
                for ox in lo..hi {
                    self.put(x + ox, y + oy, color);
                }
            }
            if x == end_x && y == end_y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
