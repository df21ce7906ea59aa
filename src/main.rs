// What you SEE:
// • A window with four round LED buttons (red, green, blue, yellow), all lit
//   and glowing.
// • Click a button: its rim thickens; let go and it goes dark (glow removed).
// • ESC or closing the window quits.
// • Any command-line argument: error on stderr, exit code 1, no window.

mod app;
mod config;
mod draw;
mod effects;
mod error;
mod glow;
mod led;
mod panel;
mod types;

use app::{Application, MainWindow};
use error::{Error, Result};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // A bad argument count fails before any window exists
    let result = Application::new(std::env::args_os()).and_then(run);

    let (message, code) = exit_status(result);
    if let Some(message) = message {
        eprintln!("{message}");
    }
    ExitCode::from(code)
}

fn run(mut app: Application) -> Result<i32> {
    let mut window = MainWindow::new(&app)?;
    app.run(&mut window)
}

/// What to print on stderr (if anything) and the process exit code.
fn exit_status(result: Result<i32>) -> (Option<String>, u8) {
    match result {
        Ok(code) => (None, code.clamp(0, 255) as u8),
        // Already carries the "ERROR: ..." prefix
        Err(e @ Error::InvalidArgument(_)) => (Some(e.to_string()), 1),
        Err(e) => (Some(format!("Error: {e}")), 1),
    }
}
