// Four LEDs in a row (red, green, blue, yellow), all lit at start.
// Visual: the buttons sit centered in the window, each wrapped in its glow.
// Click one and it goes dark as soon as you let go.

use crate::config::Config;
use crate::draw::Surface;
use crate::error::Result;
use crate::led::ColorLedButton;
use crate::types::{Color, Point, Rect};

pub const LED_COLORS: [Color; 4] = [
    Color::rgb(255, 0, 0),
    Color::rgb(0, 255, 0),
    Color::rgb(0, 0, 255),
    Color::rgb(255, 255, 0),
];

pub struct ButtonPanel {
    buttons: Vec<ColorLedButton>,
    origins: Vec<Point>, // top-left of each button, same order as `buttons`
    mouse_was_down: bool,
}

impl ButtonPanel {
    /// Build the four buttons, switch them on and lay them out inside `area`.
    pub fn new(area: Rect, config: &Config) -> Result<Self> {
        let mut buttons = Vec::with_capacity(LED_COLORS.len());
        for color in LED_COLORS {
            let mut button = ColorLedButton::new(color, config.led_diameter, config.glow)?;
            button.set_on();
            buttons.push(button);
        }
        let origins = layout_row(area, &buttons, config.panel_margin, config.panel_spacing);

        Ok(Self { buttons, origins, mouse_was_down: false })
    }

    pub fn buttons(&self) -> &[ColorLedButton] {
        &self.buttons
    }

    pub fn button_rect(&self, index: usize) -> Option<Rect> {
        let origin = *self.origins.get(index)?;
        let size = self.buttons[index].size() as i32;
        Some(Rect::new(origin.x, origin.y, size, size))
    }

    /// Everything a button can touch when painted: its box, or its box grown
    /// by the glow extent while lit.
    pub fn paint_rect(&self, index: usize) -> Result<Option<Rect>> {
        let Some(rect) = self.button_rect(index) else {
            return Ok(None);
        };
        match self.buttons[index].glow() {
            Some(glow) => glow.bounding_rect_for(rect).map(Some),
            None => Ok(Some(rect)),
        }
    }

    /// Index of the button whose disc is under `p`.
    pub fn button_at(&self, p: Point) -> Option<usize> {
        (0..self.buttons.len()).find(|&i| {
            self.button_rect(i)
                .is_some_and(|r| r.contains(p) && self.buttons[i].hit(p - r.top_left()))
        })
    }

    /// Press whatever button is under `p`. Returns true if one was hit.
    pub fn press_at(&mut self, p: Point) -> bool {
        match self.button_at(p) {
            Some(i) => {
                self.buttons[i].press();
                log::debug!("pressed {}", self.buttons[i].color().name());
                true
            }
            None => false,
        }
    }

    /// Mouse let go: every pressed button is released (and switches off).
    pub fn release(&mut self) {
        for button in self.buttons.iter_mut().filter(|b| b.is_pressed()) {
            button.release();
        }
    }

    /// Feed this frame's mouse state; press on the down edge, release on the up edge.
    pub fn handle_mouse(&mut self, pos: Option<Point>, down: bool) {
        match (self.mouse_was_down, down) {
            (false, true) => {
                if let Some(p) = pos {
                    self.press_at(p);
                }
            }
            (true, false) => self.release(),
            _ => {}
        }
        self.mouse_was_down = down;
    }

    /// Draw every button (and its glow) left to right.
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (button, &origin) in self.buttons.iter().zip(&self.origins) {
            button.paint(origin, surface);
        }
    }
}

/// Horizontal box layout: buttons side by side with `spacing` between them,
/// centered in `area` but never closer than `margin` to its edges.
fn layout_row(area: Rect, buttons: &[ColorLedButton], margin: i32, spacing: i32) -> Vec<Point> {
    let sizes: Vec<i32> = buttons.iter().map(|b| b.size() as i32).collect();
    let content_w: i32 = sizes.iter().sum::<i32>() + spacing * (sizes.len() as i32 - 1).max(0);
    let tallest = sizes.iter().copied().max().unwrap_or(0);

    let mut x = area.x + ((area.width - content_w) / 2).max(margin);
    let y = area.y + ((area.height - tallest) / 2).max(margin);

    sizes
        .iter()
        .map(|&size| {
            let origin = Point::new(x, y + (tallest - size) / 2);
            x += size + spacing;
            origin
        })
        .collect()
}
