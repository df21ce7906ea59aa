// Window + software drawing.
// Visual effects provided here:
// 1) A window that shows the framebuffer we paint every frame.
// 2) Positioned image blits (with alpha) onto that framebuffer.

use crate::error::{Error, Result};
use crate::types::{FrameBuffer, Pixmap, Point};
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

/// Anything that accepts "draw this image with its top-left at `at`".
/// The glow compositor only ever talks to this.
pub trait Surface {
    fn draw_pixmap(&mut self, at: Point, pixmap: &Pixmap);
}

impl Surface for FrameBuffer {
    /// Straight-alpha source-over, clipped to the frame.
    /// Visual: half-transparent pixels tint what's underneath; drawing the same
    /// image twice makes it more opaque.
    fn draw_pixmap(&mut self, at: Point, pixmap: &Pixmap) {
        let (pw, ph) = (pixmap.width() as i32, pixmap.height() as i32);

        // Only visit the part of the pixmap that lands inside the frame
        let x0 = (-at.x).max(0);
        let y0 = (-at.y).max(0);
        let x1 = pw.min(self.width as i32 - at.x);
        let y1 = ph.min(self.height as i32 - at.y);

        for py in y0..y1 {
            let row = (at.y + py) as usize * self.width;
            for px in x0..x1 {
                let src = pixmap.get_pixel(px as u32, py as u32);
                let a = src[3] as u32;
                if a == 0 {
                    continue;
                }
                let idx = row + (at.x + px) as usize;
                self.pixels[idx] = blend_over(self.pixels[idx], [src[0], src[1], src[2]], a);
            }
        }
    }
}

/// Mix `rgb` over an opaque 0x00RRGGBB pixel with coverage `a` (0..=255).
#[inline]
fn blend_over(dst: u32, rgb: [u8; 3], a: u32) -> u32 {
    if a == 255 {
        return ((rgb[0] as u32) << 16) | ((rgb[1] as u32) << 8) | rgb[2] as u32;
    }
    let inv = 255 - a;
    let mix = |s: u8, d: u32| (s as u32 * a + d * inv + 127) / 255;

    let r = mix(rgb[0], (dst >> 16) & 0xFF);
    let g = mix(rgb[1], (dst >> 8) & 0xFF);
    let b = mix(rgb[2], dst & 0xFF);
    (r << 16) | (g << 8) | b
}

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window of the given size.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize, target_fps: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(target_fps);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<()> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, `None` while the cursor is outside.
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Point::new(x as i32, y as i32))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }
}

/// Remembers every blit (position + size) instead of drawing it.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub blits: Vec<(Point, u32, u32)>,
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn draw_pixmap(&mut self, at: Point, pixmap: &Pixmap) {
        self.blits.push((at, pixmap.width(), pixmap.height()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn opaque_pixels_replace_destination() {
        let mut fb = FrameBuffer::new(4, 4, 0x00_11_22_33);
        let img = Pixmap::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        fb.draw_pixmap(Point::new(1, 1), &img);

        assert_eq!(fb.pixels[0], 0x00_11_22_33);
        assert_eq!(fb.pixels[1 * 4 + 1], 0x00_FF_00_00);
        assert_eq!(fb.pixels[2 * 4 + 2], 0x00_FF_00_00);
        assert_eq!(fb.pixels[3 * 4 + 3], 0x00_11_22_33);
    }

    #[test]
    fn transparent_pixels_leave_destination_alone() {
        let mut fb = FrameBuffer::new(2, 2, 0x00_AB_CD_EF);
        fb.draw_pixmap(Point::new(0, 0), &Pixmap::new(2, 2));
        assert!(fb.pixels.iter().all(|&p| p == 0x00_AB_CD_EF));
    }

    #[test]
    fn repeated_translucent_draws_build_up() {
        let mut fb = FrameBuffer::new(1, 1, 0);
        let img = Pixmap::from_pixel(1, 1, Rgba([200, 0, 0, 128]));

        fb.draw_pixmap(Point::new(0, 0), &img);
        let once = (fb.pixels[0] >> 16) & 0xFF;
        fb.draw_pixmap(Point::new(0, 0), &img);
        let twice = (fb.pixels[0] >> 16) & 0xFF;

        assert_eq!(once, 100);
        assert!(twice > once && twice < 200, "{once} -> {twice}");
    }

    #[test]
    fn blits_are_clipped_on_every_side() {
        let mut fb = FrameBuffer::new(3, 3, 0);
        let img = Pixmap::from_pixel(10, 10, Rgba([0, 0, 255, 255]));
        fb.draw_pixmap(Point::new(-4, -4), &img);
        assert!(fb.pixels.iter().all(|&p| p == 0x00_00_00_FF));

        let mut fb = FrameBuffer::new(3, 3, 0);
        fb.draw_pixmap(Point::new(2, 2), &img);
        assert_eq!(fb.pixels[8], 0x00_00_00_FF);
        assert_eq!(fb.pixels[7], 0);

        let mut fb = FrameBuffer::new(3, 3, 0);
        fb.draw_pixmap(Point::new(50, -50), &img);
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }
}
