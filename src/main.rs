//! Terminal demo (default binary).
//!
//! Drives a compositor at a fixed tick into a `TerminalDisplay`, so the tile
//! legend is previewed as half-block pixels. `q` or `Esc` quits.
//!
//! Geometry comes from `SUBTILE_*` environment variables; logs go to
//! `subtile.log` in `SUBTILE_LOG_DIR` (default: current directory).

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use subtile::engine::{Compositor, CompositorConfig};
use subtile::logging;
use subtile::scene::DemoScene;
use subtile::term::TerminalDisplay;
use subtile::types::TICK_MS;

fn main() -> Result<()> {
    let log_dir = std::env::var("SUBTILE_LOG_DIR").unwrap_or_else(|_| ".".to_owned());
    let _guard = logging::init_file(log_dir, "subtile.log");

    let config = CompositorConfig::from_env();
    let mut display = TerminalDisplay::new(config.tile_size);
    display.enter()?;

    let result = run(config, &mut display);

    // Always try to restore terminal state.
    let _ = display.exit();
    if let Err(err) = &result {
        tracing::error!("demo failed: {err:#}");
    }
    result
}

fn run(config: CompositorConfig, display: &mut TerminalDisplay) -> Result<()> {
    let mut compositor = Compositor::new(config, display)?;
    let mut scene = DemoScene::new(&mut compositor, display)?;

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut caption = String::with_capacity(64);

    loop {
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL);
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) || ctrl_c {
                        tracing::info!(frames = compositor.frame_count(), "quit");
                        return Ok(());
                    }
                }
                Event::Resize(..) => display.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() < tick {
            continue;
        }
        last_tick = Instant::now();

        compositor.begin_frame();
        scene.update(&mut compositor);
        let stats = compositor.end_frame(display)?;

        caption.clear();
        let _ = write!(
            caption,
            "frame {}  tiles {:>3}  q: quit",
            compositor.frame_count(),
            stats.tiles_regenerated
        );
        display.set_caption(&caption);
    }
}
