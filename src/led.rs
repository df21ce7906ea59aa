// Round LED-style push button, drawn entirely in software.
// Visual expectation: a glossy colored disc with a thin black rim. Switched
// on, it turns into a bright radial "bulb" and gets a glow around it.
// Pressing it thickens the rim; letting go switches it off.

use crate::draw::Surface;
use crate::error::Result;
use crate::glow::{GlowEffect, GlowParameters};
use crate::types::{Color, Pixmap, Point};

const BORDER: u32 = 1;
const PRESSED_BORDER: u32 = 3;
// The clip ellipse is the widget rect grown by this much on each side
const MASK_GROW: f32 = 2.0;

/// Which background the disc gets. Coordinates are in widget units (0..1).
enum Fill {
    /// Vertical gradient: `from` at y0, `to` at y1.
    Linear { y0: f32, y1: f32, from: Color, to: Color },
    /// Radial gradient starting at the focal point.
    Radial { focal: (f32, f32), radius: f32, from: Color, to: Color },
}

impl Fill {
    fn sample(&self, u: f32, v: f32) -> Color {
        match *self {
            Fill::Linear { y0, y1, from, to } => from.lerp(&to, (v - y0) / (y1 - y0)),
            Fill::Radial { focal, radius, from, to } => {
                let d = ((u - focal.0).powi(2) + (v - focal.1).powi(2)).sqrt();
                from.lerp(&to, d / radius)
            }
        }
    }
}

pub struct ColorLedButton {
    color: Color,
    diameter: u32,     // content box, without the rim
    is_lit: bool,
    pressed: bool,
    lit_glow: GlowEffect,
    glow: Option<GlowEffect>, // attached only while lit
}

impl ColorLedButton {
    /// An unlit button. Fails only when `glow` can't make a valid effect.
    pub fn new(color: Color, diameter: u32, glow: GlowParameters) -> Result<Self> {
        Ok(Self {
            color,
            diameter,
            is_lit: false,
            pressed: false,
            lit_glow: GlowEffect::new(color, glow)?,
            glow: None,
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_lit(&self) -> bool {
        self.is_lit
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn glow(&self) -> Option<&GlowEffect> {
        self.glow.as_ref()
    }

    /// Widget edge length in pixels (content + rim on both sides).
    pub fn size(&self) -> u32 {
        self.diameter + 2 * BORDER
    }

    /// Light it up: glow attached, radial look.
    pub fn set_on(&mut self) {
        self.glow = Some(self.lit_glow.clone());
        self.is_lit = true;
        log::debug!("LED {} on", self.color.name());
    }

    pub fn set_off(&mut self) {
        self.glow = None;
        self.is_lit = false;
        log::debug!("LED {} off", self.color.name());
    }

    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Mouse let go: unpress and switch off (only if it was actually pressed).
    pub fn release(&mut self) {
        if !self.pressed {
            return;
        }
        self.pressed = false;
        self.set_off();
    }

    /// Is `local` (relative to the widget's top-left) on the disc?
    pub fn hit(&self, local: Point) -> bool {
        let c = self.size() as f32 / 2.0;
        let dx = local.x as f32 + 0.5 - c;
        let dy = local.y as f32 + 0.5 - c;
        dx * dx + dy * dy <= c * c
    }

    fn fill(&self) -> Fill {
        let (lighter, darker) = (self.color.lighter(), self.color.darker());
        match (self.is_lit, self.pressed) {
            (false, false) => Fill::Linear { y0: -0.5, y1: 1.3, from: lighter, to: darker },
            (false, true) => Fill::Linear { y0: 0.0, y1: 3.0, from: darker, to: lighter },
            (true, false) => Fill::Radial { focal: (0.5, 0.5), radius: 0.8, from: lighter, to: self.color },
            (true, true) => Fill::Radial { focal: (0.55, 0.55), radius: 0.82, from: lighter, to: self.color },
        }
    }

    /// Rasterize the current look into a fresh `size() x size()` pixmap.
    /// Visual: transparent corners, antialiased round edge, black rim.
    pub fn render_pixmap(&self) -> Pixmap {
        let size = self.size();
        let s = size as f32;
        let c = s / 2.0;
        let radius = c;
        let clip = c + MASK_GROW;
        let rim = (if self.pressed { PRESSED_BORDER } else { BORDER }) as f32;
        let fill = self.fill();

        Pixmap::from_fn(size, size, |x, y| {
            let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
            let d = ((fx - c).powi(2) + (fy - c).powi(2)).sqrt();

            // Coverage falls off over one pixel at the disc edge
            let coverage = (radius - d + 0.5).clamp(0.0, 1.0).min((clip - d).clamp(0.0, 1.0));
            if coverage <= 0.0 {
                return Color::TRANSPARENT.to_rgba();
            }

            let mut px = if d > radius - rim {
                Color::BLACK
            } else {
                fill.sample(fx / s, fy / s)
            };
            px.a = (px.a as f32 * coverage).round() as u8;
            px.to_rgba()
        })
    }

    /// Draw the button with its top-left at `origin`, through the glow when lit.
    pub fn paint<S: Surface + ?Sized>(&self, origin: Point, surface: &mut S) {
        let pixmap = self.render_pixmap();
        match &self.glow {
            Some(glow) => glow.render(&pixmap, origin, surface),
            None => surface.draw_pixmap(origin, &pixmap),
        }
    }
}
