// Glow compositor: a tinted, blurred halo painted underneath the image.
// Visual expectation: the button looks lit, with soft colored light spilling
// up to `extent_px` pixels around it.

use crate::draw::Surface;
use crate::effects::{Blur, Colorize, apply_effect_to_pixmap};
use crate::error::{Error, Result};
use crate::types::{Color, Pixmap, Point, Rect, is_empty};

/// Fixed for the lifetime of one `GlowEffect`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlowParameters {
    pub extent_px: u32,      // halo growth on each side
    pub blur_radius_px: u32,
    pub repeat_count: u32,   // halo/source pairs drawn per render (>= 1)
}

impl Default for GlowParameters {
    fn default() -> Self {
        Self { extent_px: 100, blur_radius_px: 15, repeat_count: 5 }
    }
}

#[derive(Clone, Debug)]
pub struct GlowEffect {
    color: Color,
    params: GlowParameters,
}

impl GlowEffect {
    pub fn new(color: Color, params: GlowParameters) -> Result<Self> {
        if params.repeat_count == 0 {
            return Err(Error::InvalidArgument("glow repeat count must be at least 1".into()));
        }
        if params.extent_px > i32::MAX as u32 / 2 {
            return Err(Error::InvalidArgument(format!(
                "glow extent {} is out of range",
                params.extent_px
            )));
        }
        Ok(Self { color, params })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Area touched when drawing something that covers `source`:
    /// the same rect grown by the extent on all four sides.
    pub fn bounding_rect_for(&self, source: Rect) -> Result<Rect> {
        if source.width < 0 || source.height < 0 {
            return Err(Error::InvalidArgument(format!(
                "negative source size {}x{}",
                source.width, source.height
            )));
        }
        // extent <= i32::MAX / 2 (checked in `new`), so 2 * e can't overflow
        let e = self.params.extent_px as i32;
        let grown = (|| {
            Some(Rect::new(
                source.x.checked_sub(e)?,
                source.y.checked_sub(e)?,
                source.width.checked_add(2 * e)?,
                source.height.checked_add(2 * e)?,
            ))
        })();
        grown.ok_or_else(|| {
            Error::InvalidArgument(format!("glow area for {source:?} is out of range"))
        })
    }

    /// Build the halo for `source`: colorize at zero extent, then blur while
    /// growing the canvas by the extent. Fresh buffers every call.
    pub fn halo(&self, source: &Pixmap) -> Pixmap {
        let colorize = Colorize::new(self.color);
        let tinted = apply_effect_to_pixmap(source, Some(&colorize), 0);

        let blur = Blur::new(self.params.blur_radius_px);
        apply_effect_to_pixmap(&tinted, Some(&blur), self.params.extent_px)
    }

    /// Draw `[halo, source]` `repeat_count` times.
    /// The halo sits at `offset - (extent, extent)` so it lines up with the source.
    /// An empty source draws nothing.
    pub fn render<S: Surface + ?Sized>(&self, source: &Pixmap, offset: Point, surface: &mut S) {
        if is_empty(source) {
            return;
        }

        let halo = self.halo(source);
        let e = self.params.extent_px as i32;
        let halo_at = offset - Point::new(e, e);

        log::trace!(
            "glow {} at ({}, {}): halo {}x{}",
            self.color.name(),
            offset.x,
            offset.y,
            halo.width(),
            halo.height()
        );

        for _ in 0..self.params.repeat_count {
            surface.draw_pixmap(halo_at, &halo);
            surface.draw_pixmap(offset, source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RecordingSurface;
    use image::Rgba;

    fn red_glow() -> GlowEffect {
        GlowEffect::new(Color::rgb(255, 0, 0), GlowParameters::default()).unwrap()
    }

    #[test]
    fn bounding_rect_grows_by_extent() {
        let glow = red_glow();
        for &(x, y, w, h) in &[(0, 0, 0, 0), (10, 20, 30, 40), (-5, 7, 102, 102), (3, 3, 1, 0)] {
            let out = glow.bounding_rect_for(Rect::new(x, y, w, h)).unwrap();
            assert_eq!(out, Rect::new(x - 100, y - 100, w + 200, h + 200));
        }
    }

    #[test]
    fn bounding_rect_rejects_negative_size() {
        let glow = red_glow();
        assert!(matches!(
            glow.bounding_rect_for(Rect::new(0, 0, -1, 5)),
            Err(Error::InvalidArgument(_))
        ));
        assert!(glow.bounding_rect_for(Rect::new(0, 0, 5, -1)).is_err());
    }

    #[test]
    fn bounding_rect_out_of_range_is_an_error_not_a_panic() {
        let glow = red_glow();
        assert!(matches!(
            glow.bounding_rect_for(Rect::new(0, 0, i32::MAX - 50, 10)),
            Err(Error::InvalidArgument(_))
        ));
        assert!(glow.bounding_rect_for(Rect::new(0, 0, 10, i32::MAX - 50)).is_err());
        assert!(glow.bounding_rect_for(Rect::new(i32::MIN, 0, 10, 10)).is_err());
        assert!(glow.bounding_rect_for(Rect::new(0, i32::MIN + 99, 10, 10)).is_err());

        // Right at the edge still fits
        let edge = glow.bounding_rect_for(Rect::new(i32::MIN + 100, 0, i32::MAX - 200, 0)).unwrap();
        assert_eq!(edge, Rect::new(i32::MIN, -100, i32::MAX, 200));
    }

    #[test]
    fn zero_repeat_count_is_rejected() {
        let params = GlowParameters { repeat_count: 0, ..GlowParameters::default() };
        assert!(matches!(
            GlowEffect::new(Color::rgb(0, 0, 255), params),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn empty_source_draws_nothing() {
        let mut surface = RecordingSurface::default();
        red_glow().render(&Pixmap::new(0, 0), Point::new(10, 10), &mut surface);
        assert!(surface.blits.is_empty());
    }

    #[test]
    fn white_square_gets_five_halo_and_five_source_blits() {
        let source = Pixmap::from_pixel(50, 50, Rgba([255, 255, 255, 255]));
        let offset = Point::new(120, 130);
        let mut surface = RecordingSurface::default();

        red_glow().render(&source, offset, &mut surface);

        assert_eq!(surface.blits.len(), 10);
        for (i, &(at, w, h)) in surface.blits.iter().enumerate() {
            if i % 2 == 0 {
                assert_eq!(at, Point::new(20, 30));
                assert_eq!((w, h), (250, 250));
            } else {
                assert_eq!(at, offset);
                assert_eq!((w, h), (50, 50));
            }
        }
    }

    #[test]
    fn repeat_count_is_tunable() {
        let params = GlowParameters { extent_px: 4, blur_radius_px: 2, repeat_count: 2 };
        let glow = GlowEffect::new(Color::rgb(0, 255, 0), params).unwrap();
        let mut surface = RecordingSurface::default();
        glow.render(&Pixmap::from_pixel(3, 3, Rgba([0, 0, 0, 255])), Point::new(0, 0), &mut surface);

        let halos: Vec<_> = surface.blits.iter().step_by(2).collect();
        assert_eq!(surface.blits.len(), 4);
        assert!(halos.iter().all(|&&(at, w, h)| at == Point::new(-4, -4) && (w, h) == (11, 11)));
    }

    #[test]
    fn render_leaves_source_untouched() {
        let source = Pixmap::from_pixel(8, 8, Rgba([10, 200, 30, 255]));
        let before = source.clone();
        let mut fb = crate::types::FrameBuffer::new(64, 64, 0);
        red_glow().render(&source, Point::new(28, 28), &mut fb);
        assert_eq!(source, before);
    }

    #[test]
    fn halo_of_dark_source_is_tinted_and_lights_the_surroundings() {
        let params = GlowParameters { extent_px: 20, blur_radius_px: 6, repeat_count: 5 };
        let glow = GlowEffect::new(Color::rgb(0, 0, 255), params).unwrap();
        let source = Pixmap::from_pixel(10, 10, Rgba([0, 0, 0, 255]));

        let halo = glow.halo(&source);
        assert_eq!(halo.dimensions(), (50, 50));
        let mid = halo.get_pixel(25, 25);
        assert_eq!((mid[0], mid[1], mid[2]), (0, 0, 255));

        let mut fb = crate::types::FrameBuffer::new(60, 60, 0);
        glow.render(&source, Point::new(25, 25), &mut fb);
        // Just left of the source: blue light from the halo
        let beside = fb.pixels[30 * 60 + 23];
        assert!(beside & 0xFF > 0 && beside >> 8 == 0, "{beside:#08x}");
        // On the source: the (black) source drawn last wins
        assert_eq!(fb.pixels[30 * 60 + 30], 0);
    }
}
