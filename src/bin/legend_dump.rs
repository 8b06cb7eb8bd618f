//! Headless frame dump.
//!
//! Runs the demo scene for `frames` ticks (default 60) and writes the publish
//! stream as JSON lines on stdout. Logs go to stderr.
//!
//! ```bash
//! legend-dump 120 --changed-only > frames.jsonl
//! ```

use std::io::{self, BufWriter};

use anyhow::{bail, Context, Result};

use subtile::adapter::StreamDisplay;
use subtile::engine::{Compositor, CompositorConfig};
use subtile::logging;
use subtile::scene::DemoScene;

const DEFAULT_FRAMES: u64 = 60;

fn main() -> Result<()> {
    let _guard = logging::init_stderr();

    let mut frames = DEFAULT_FRAMES;
    let mut changed_only = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--changed-only" => changed_only = true,
            "-h" | "--help" => {
                eprintln!("usage: legend-dump [frames] [--changed-only]");
                return Ok(());
            }
            s if s.starts_with('-') => bail!("unknown option {s}"),
            s => frames = s.parse().with_context(|| format!("invalid frame count {s:?}"))?,
        }
    }

    let config = CompositorConfig::from_env();
    let stdout = io::stdout();
    let mut display = StreamDisplay::new(BufWriter::new(stdout.lock())).changed_only(changed_only);

    let mut compositor = Compositor::new(config, &mut display)?;
    let mut scene = DemoScene::new(&mut compositor, &mut display)?;

    let mut regenerated = 0usize;
    for _ in 0..frames {
        compositor.begin_frame();
        scene.update(&mut compositor);
        regenerated += compositor.end_frame(&mut display)?.tiles_regenerated;
    }

    let messages = display.seq();
    tracing::info!(frames, regenerated, messages, "dump complete");
    Ok(())
}
