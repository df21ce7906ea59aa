// Pixmap effects used to build the glow halo.
// Visual expectation: `Colorize` turns a button into a tinted silhouette,
// `Blur` smears it into a soft cloud that spills into the transparent margin.

use crate::types::{Color, Pixmap, is_empty};
use image::imageops;

/// Something that rewrites a canvas in place.
pub trait PixmapEffect {
    fn apply(&self, canvas: &mut Pixmap);
}

/// Paint `source` into a fresh transparent canvas grown by `extent` on every
/// side, then run `effect` over the whole canvas.
///
/// Empty source -> empty image. No effect -> the source as-is.
pub fn apply_effect_to_pixmap(
    source: &Pixmap,
    effect: Option<&dyn PixmapEffect>,
    extent: u32,
) -> Pixmap {
    if is_empty(source) {
        return Pixmap::new(0, 0);
    }
    let Some(effect) = effect else {
        return source.clone();
    };

    // Pixmap::new is zero-filled, i.e. fully transparent.
    let mut canvas = Pixmap::new(source.width() + 2 * extent, source.height() + 2 * extent);
    imageops::replace(&mut canvas, source, extent as i64, extent as i64);
    effect.apply(&mut canvas);
    canvas
}

/* ------------------------------- Colorize ------------------------------- */

/// Grayscale the pixel, then screen it with the tint; alpha is kept.
/// Visual: whites stay white, darks take on the tint color.
pub struct Colorize {
    pub color: Color,
    pub strength: f32, // 0 = untouched, 1 = fully colorized
}

impl Colorize {
    pub fn new(color: Color) -> Self {
        Self { color, strength: 1.0 }
    }
}

impl PixmapEffect for Colorize {
    fn apply(&self, canvas: &mut Pixmap) {
        let tint = [self.color.r as u32, self.color.g as u32, self.color.b as u32];
        let s = self.strength.clamp(0.0, 1.0);

        for px in canvas.pixels_mut() {
            if px[3] == 0 {
                continue;
            }
            let gray = (px[0] as u32 * 11 + px[1] as u32 * 16 + px[2] as u32 * 5) / 32;
            for c in 0..3 {
                let screened = 255 - (255 - gray) * (255 - tint[c]) / 255;
                let mixed = px[c] as f32 * (1.0 - s) + screened as f32 * s;
                px[c] = mixed.round() as u8;
            }
        }
    }
}

/* --------------------------------- Blur --------------------------------- */

/// Gaussian-looking blur: three box blurs in a row (sigma = radius / 2).
/// Pixels outside the canvas count as transparent, so the blur fades out
/// toward the margin instead of smearing the border color.
pub struct Blur {
    pub radius: u32,
}

impl Blur {
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }
}

impl PixmapEffect for Blur {
    fn apply(&self, canvas: &mut Pixmap) {
        if self.radius == 0 || is_empty(canvas) {
            return;
        }
        let w = canvas.width() as usize;
        let h = canvas.height() as usize;

        // Work premultiplied so transparent pixels don't darken the edges.
        let mut buf: Vec<[u32; 4]> = canvas
            .pixels()
            .map(|p| {
                let a = p[3] as u32;
                [
                    (p[0] as u32 * a + 127) / 255,
                    (p[1] as u32 * a + 127) / 255,
                    (p[2] as u32 * a + 127) / 255,
                    a,
                ]
            })
            .collect();
        let mut tmp = vec![[0u32; 4]; w * h];

        for r in box_radii_for_gauss(self.radius as f32 / 2.0, 3) {
            box_blur_premul(&buf, &mut tmp, w, h, r, true);
            box_blur_premul(&tmp, &mut buf, w, h, r, false);
        }

        for (px, v) in canvas.pixels_mut().zip(buf.iter()) {
            let a = v[3].min(255);
            if a == 0 {
                *px = image::Rgba([0, 0, 0, 0]);
                continue;
            }
            let un = |c: u32| ((c * 255 + a / 2) / a).min(255) as u8;
            *px = image::Rgba([un(v[0]), un(v[1]), un(v[2]), a as u8]);
        }
    }
}

/// Radii of `passes` box filters whose combination approximates a Gaussian
/// of standard deviation `sigma`.
fn box_radii_for_gauss(sigma: f32, passes: usize) -> Vec<usize> {
    let n = passes as f32;
    let w_ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i32;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;
    let (wlf, m_num) = (wl as f32, 12.0 * sigma * sigma);
    let m_ideal = (m_num - n * wlf * wlf - 4.0 * n * wlf - 3.0 * n) / (-4.0 * wlf - 4.0);
    let m = m_ideal.round().max(0.0) as usize;

    (0..passes)
        .map(|i| if i < m { wl } else { wu })
        .map(|width| ((width - 1) / 2) as usize)
        .collect()
}

/// One sliding-window pass (horizontal or vertical) over premultiplied RGBA.
/// Out-of-range samples are zero, the window size stays 2r+1 everywhere.
fn box_blur_premul(
    src: &[[u32; 4]],
    dst: &mut [[u32; 4]],
    w: usize,
    h: usize,
    r: usize,
    horizontal: bool,
) {
    let (lines, len) = if horizontal { (h, w) } else { (w, h) };
    let idx = |line: usize, i: usize| if horizontal { line * w + i } else { i * w + line };
    let win = (2 * r + 1) as u32;

    if r == 0 {
        dst.copy_from_slice(src);
        return;
    }

    for line in 0..lines {
        // Prime the window [0..r] (left part is outside -> zero)
        let mut sum = [0u32; 4];
        for i in 0..r.min(len) {
            let p = src[idx(line, i)];
            for c in 0..4 {
                sum[c] += p[c];
            }
        }

        // Slide: add the sample entering at i+r, drop the one leaving at i-r-1
        for i in 0..len {
            if i + r < len {
                let p = src[idx(line, i + r)];
                for c in 0..4 {
                    sum[c] += p[c];
                }
            }
            if i > r {
                let p = src[idx(line, i - r - 1)];
                for c in 0..4 {
                    sum[c] -= p[c];
                }
            }
            let out = &mut dst[idx(line, i)];
            for c in 0..4 {
                out[c] = (sum[c] + win / 2) / win;
            }
        }
    }
}
