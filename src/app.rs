// Application context + the one main window.
// Visual expectation: `run()` keeps the window on screen, repainting the LED
// panel every frame, until you close it or hit ESC.

use crate::config::Config;
use crate::draw::Drawer;
use crate::error::{Error, Result};
use crate::panel::ButtonPanel;
use crate::types::{FrameBuffer, Rect};
use std::ffi::OsString;
use std::time::{Duration, Instant};

/// Owns the config and the "keep running" flag. Created once in `main` and
/// handed to the window instead of living in a global.
pub struct Application {
    config: Config,
    running: bool,
}

impl Application {
    /// `args` as from `std::env::args_os()`: program name first, then nothing.
    /// Only the count matters, so arguments that aren't UTF-8 are fine.
    pub fn new<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::with_config(args, Config::default())
    }

    pub fn with_config<I>(args: I, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let extra = args.into_iter().skip(1).count();
        if extra > 0 {
            return Err(Error::InvalidArgument(format!(
                "invalid number of arguments ({extra}), expected 0"
            )));
        }
        Ok(Self { config, running: false })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Event/redraw loop. Returns the exit code (0 on a normal close).
    pub fn run(&mut self, window: &mut MainWindow) -> Result<i32> {
        self.running = true;
        log::info!("entering main loop");

        let mut last_stats = Instant::now();
        let mut frames: u32 = 0;

        while self.is_running() {
            if !window.drawer.is_open() || window.drawer.esc_pressed() {
                self.shutdown();
                break;
            }

            window.frame()?;

            // Frame statistics once per second
            frames += 1;
            let now = Instant::now();
            if now.duration_since(last_stats) >= Duration::from_secs(1) {
                let secs = now.duration_since(last_stats).as_secs_f32();
                log::debug!("FPS: {:.1}", frames as f32 / secs);
                frames = 0;
                last_stats = now;
            }
        }

        log::info!("main loop finished");
        Ok(0)
    }

    /// Ask the loop to stop after the current frame.
    pub fn shutdown(&mut self) {
        self.running = false;
    }
}

pub struct MainWindow {
    drawer: Drawer,
    screen: FrameBuffer, // reused every frame
    background: u32,
    panel: ButtonPanel,
}

impl MainWindow {
    /// Open the window and build the LED panel as its only content.
    pub fn new(app: &Application) -> Result<Self> {
        let config = app.config();
        let drawer = Drawer::new(&config.title, config.width, config.height, config.target_fps)?;
        let area = Rect::new(0, 0, config.width as i32, config.height as i32);
        let panel = ButtonPanel::new(area, config)?;
        log::info!("window {}x{} \"{}\"", config.width, config.height, config.title);
        for (i, button) in panel.buttons().iter().enumerate() {
            if let Some(rect) = panel.paint_rect(i)? {
                log::debug!(
                    "LED {} lit={} glow={:?} paints {:?}",
                    button.color().name(),
                    button.is_lit(),
                    button.glow().map(|g| g.color().name()),
                    rect
                );
            }
        }

        Ok(Self {
            drawer,
            screen: FrameBuffer::new(config.width, config.height, config.background.to_u32()),
            background: config.background.to_u32(),
            panel,
        })
    }

    /// One frame: input -> paint -> present.
    fn frame(&mut self) -> Result<()> {
        let mouse = self.drawer.mouse_pos();
        let down = self.drawer.left_mouse_down();
        self.panel.handle_mouse(mouse, down);

        self.screen.clear(self.background);
        self.panel.paint(&mut self.screen);
        self.drawer.present(&self.screen)
    }
}
