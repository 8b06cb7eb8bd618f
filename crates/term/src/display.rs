//! TerminalDisplay: a [`HostDisplay`] that shows the published tiles in the
//! terminal it runs in.

use std::io::{self, Write};

use crate::engine::{DisplayError, HostDisplay, LegendEntry};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::preview::TilePreview;
use crate::renderer::TerminalRenderer;

pub struct TerminalDisplay<W: Write = io::Stdout> {
    preview: TilePreview,
    fb: FrameBuffer,
    renderer: TerminalRenderer<W>,
    background: Rgb,
    caption: String,
}

impl TerminalDisplay<io::Stdout> {
    pub fn new(tile_size: u32) -> Self {
        Self::with_renderer(tile_size, TerminalRenderer::new())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn with_renderer(tile_size: u32, renderer: TerminalRenderer<W>) -> Self {
        Self {
            preview: TilePreview::new(tile_size),
            fb: FrameBuffer::new(0, 0),
            renderer,
            background: Rgb::new(24, 24, 32),
            caption: String::new(),
        }
    }

    pub fn set_background(&mut self, background: Rgb) {
        self.background = background;
    }

    /// One line of text shown under the image from the next publish on.
    pub fn set_caption(&mut self, caption: &str) {
        self.caption.clear();
        self.caption.push_str(caption);
    }

    pub fn preview(&self) -> &TilePreview {
        &self.preview
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    pub fn enter(&mut self) -> anyhow::Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> anyhow::Result<()> {
        self.renderer.exit()
    }

    /// Redraw everything on the next publish (e.g. after a terminal resize).
    pub fn invalidate(&mut self) {
        self.renderer.invalidate();
    }

    fn compose(&mut self) {
        let (w, h) = self.preview.cell_size();
        self.fb.resize(w, h.saturating_add(1));
        self.fb.clear(Cell::default());
        self.preview.render_into(&mut self.fb, self.background);
        self.fb.put_str(0, h, &self.caption, CellStyle::default());
    }
}

impl<W: Write> HostDisplay for TerminalDisplay<W> {
    fn set_map(&mut self, map: &str) -> Result<(), DisplayError> {
        self.preview.set_map(map);
        self.renderer.invalidate();
        Ok(())
    }

    fn set_legend(&mut self, legend: &[LegendEntry]) -> Result<(), DisplayError> {
        self.preview.apply_legend(legend)?;
        self.compose();
        self.renderer.draw_swap(&mut self.fb).map_err(into_display_error)
    }
}

fn into_display_error(err: anyhow::Error) -> DisplayError {
    match err.downcast::<io::Error>() {
        Ok(io) => DisplayError::Io(io),
        Err(other) => DisplayError::Io(io::Error::other(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TileKey;
    use crate::types::Glyph;

    fn display() -> TerminalDisplay<Vec<u8>> {
        TerminalDisplay::with_renderer(2, TerminalRenderer::with_writer(Vec::new()))
    }

    #[test]
    fn legend_before_map_fails() {
        let mut d = display();
        assert!(matches!(d.set_legend(&[]), Err(DisplayError::MapNotSet)));
    }

    #[test]
    fn publish_decodes_and_flushes() {
        let mut d = display();
        d.set_map("ab").unwrap();
        d.set_caption("hello");
        let legend = [LegendEntry {
            key: TileKey::new('b'),
            bitmap: "44\n44".to_owned(),
        }];
        d.set_legend(&legend).unwrap();

        assert_eq!(d.preview().pixel(3, 1), Glyph::Green);
        let written = String::from_utf8_lossy(d.renderer().writer()).into_owned();
        assert!(written.contains("hello"));
        assert!(written.contains(crate::preview::HALF_BLOCK));
    }

    #[test]
    fn unchanged_publish_writes_nothing_new() {
        let mut d = display();
        d.set_map("a").unwrap();
        let legend = [LegendEntry {
            key: TileKey::new('a'),
            bitmap: "33\n33".to_owned(),
        }];
        d.set_legend(&legend).unwrap();
        let before = d.renderer().writer().len();
        d.set_legend(&legend).unwrap();
        assert_eq!(d.renderer().writer().len(), before);
    }
}
