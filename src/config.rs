// Knobs for the window, the LED panel and the glow.
// Visual: change these and the window/buttons/glow change size or look.

use crate::glow::GlowParameters;
use crate::types::Color;

#[derive(Clone, Debug)]
pub struct Config {
    pub title: String,
    pub width: usize,        // framebuffer / window size in pixels
    pub height: usize,
    pub target_fps: usize,   // minifb sleeps to hold this rate
    pub background: Color,   // window fill behind the panel
    pub led_diameter: u32,   // LED content box; the rim adds 1px per side
    pub panel_margin: i32,
    pub panel_spacing: i32,
    pub glow: GlowParameters,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: String::from("Speed Test"),
            width: 640,
            height: 260,
            target_fps: 60,
            background: Color::rgb(0xEF, 0xEF, 0xEF),
            led_diameter: 100,
            panel_margin: 11,
            panel_spacing: 6,
            glow: GlowParameters::default(),
        }
    }
}
