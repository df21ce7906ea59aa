// Core types shared by the window, the LED buttons and the glow compositor.

use image::RgbaImage;

/// What the window shows: one opaque pixel per entry.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self { width, height, pixels: vec![fill; width * height] }
    }

    /// Paint every pixel with `color` (start of a new frame).
    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }
}

/// An image with straight (non-premultiplied) alpha.
/// Zero width or zero height means "nothing to draw yet".
pub type Pixmap = RgbaImage;

#[inline]
pub fn is_empty(pixmap: &Pixmap) -> bool {
    pixmap.width() == 0 || pixmap.height() == 0
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

/// Axis-aligned rectangle in window pixels. Width/height are signed so bad
/// geometry can be detected instead of wrapping around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn contains(&self, p: Point) -> bool {
        // i64 so huge rects near i32::MAX don't wrap
        let (px, py) = (p.x as i64, p.y as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        px >= x && py >= y && px < x + self.width as i64 && py < y + self.height as i64
    }
}

/// 8-bit RGBA color. Used as the glow tint and for the LED gradients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb`, alpha ignored.
    pub fn name(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Brighter by 50%: HSV value * 1.5; once value saturates the overflow
    /// is taken out of the saturation instead (so pure red turns pinkish).
    pub fn lighter(&self) -> Color {
        let (h, mut s, v) = self.to_hsv();
        let mut v = v * 1.5;
        if v > 255.0 {
            s = (s - (v - 255.0)).max(0.0);
            v = 255.0;
        }
        Color::from_hsv(h, s, v, self.a)
    }

    /// Half the HSV value.
    pub fn darker(&self) -> Color {
        let (h, s, v) = self.to_hsv();
        Color::from_hsv(h, s, v / 2.0, self.a)
    }

    /// Packed 0x00RRGGBB (what the framebuffer stores).
    pub fn to_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn to_rgba(&self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }

    /// Linear mix between `self` (t = 0) and `other` (t = 1), per channel.
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    // hue in degrees [0,360), saturation and value in [0,255]
    fn to_hsv(&self) -> (f32, f32, f32) {
        let (r, g, b) = (self.r as f32, self.g as f32, self.b as f32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max == 0.0 { 0.0 } else { delta / max * 255.0 };
        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        (h, s, max)
    }

    fn from_hsv(h: f32, s: f32, v: f32, a: u8) -> Color {
        let s = s / 255.0;
        let c = v * s;
        let hp = (h / 60.0).rem_euclid(6.0);
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;
        let to8 = |f: f32| (f + m).round().clamp(0.0, 255.0) as u8;
        Color { r: to8(r1), g: to8(g1), b: to8(b1), a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_lowercase_hex() {
        assert_eq!(Color::rgb(255, 255, 0).name(), "#ffff00");
        assert_eq!(Color::rgb(1, 2, 171).name(), "#0102ab");
    }

    #[test]
    fn darker_halves_value() {
        assert_eq!(Color::rgb(255, 0, 0).darker(), Color::rgb(128, 0, 0));
        assert_eq!(Color::rgb(0, 0, 0).darker(), Color::BLACK);
    }

    #[test]
    fn lighter_of_saturated_color_desaturates() {
        let c = Color::rgb(255, 0, 0).lighter();
        assert_eq!(c.r, 255);
        assert!(c.g > 100 && c.g < 140, "g = {}", c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    fn lighter_of_dim_color_raises_value() {
        let c = Color::rgb(0, 100, 0).lighter();
        assert_eq!(c, Color::rgb(0, 150, 0));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains(Point::new(10, 10)));
        assert!(r.contains(Point::new(14, 14)));
        assert!(!r.contains(Point::new(15, 10)));
    }

    #[test]
    fn rect_contains_near_the_i32_limits() {
        let r = Rect::new(i32::MAX - 10, 0, i32::MAX, 5);
        assert!(r.contains(Point::new(i32::MAX, 2)));
        assert!(!r.contains(Point::new(i32::MAX - 11, 2)));
        assert!(!Rect::new(0, 0, 0, 0).contains(Point::new(0, 0)));
    }

    #[test]
    fn point_sub_saturates() {
        assert_eq!(Point::new(5, 7) - Point::new(2, 10), Point::new(3, -3));
        assert_eq!(Point::new(i32::MIN, 0) - Point::new(1, 0), Point::new(i32::MIN, 0));
        assert_eq!(Point::new(i32::MAX, 0) - Point::new(-1, 0), Point::new(i32::MAX, 0));
    }
}
