//! End-to-end compositor behavior against a recording display.

use subtile::core::{BlitMode, ConstructionError, Drawer, Surface};
use subtile::engine::{
    share, Compositor, CompositorConfig, EngineError, KeyEncoder, LegendEntry, RecordingDisplay,
    TileKey,
};
use subtile::types::{Glyph, TileCoord};

fn compositor(grid_w: u32, grid_h: u32) -> (Compositor, RecordingDisplay) {
    let mut display = RecordingDisplay::new();
    let c = Compositor::new(CompositorConfig::with_grid(grid_w, grid_h), &mut display).unwrap();
    (c, display)
}

fn blank() -> String {
    vec![".".repeat(16); 16].join("\n")
}

fn frame(c: &mut Compositor, display: &mut RecordingDisplay) -> usize {
    c.begin_frame();
    c.end_frame(display).unwrap().tiles_regenerated
}

#[test]
fn scenario_a_single_full_tile() {
    let (mut c, mut display) = compositor(2, 2);
    let s = share(Surface::new(16, 16).unwrap());
    s.borrow_mut().draw_rect(0, 0, 16, 16, Glyph::Green);
    c.add_surface(&s, 0, 0);
    frame(&mut c, &mut display);

    let expected = vec!["4".repeat(16); 16].join("\n");
    assert_eq!(c.bitmap(TileCoord::new(0, 0)), Some(expected.as_str()));
    for (tx, ty) in [(1, 0), (0, 1), (1, 1)] {
        assert_eq!(c.bitmap(TileCoord::new(tx, ty)), Some(blank().as_str()));
    }

    let published = display.last().unwrap();
    assert_eq!(published.len(), 4);
    assert_eq!(published[0].bitmap, expected);
}

#[test]
fn scenario_b_later_surface_wins() {
    let (mut c, mut display) = compositor(2, 2);
    let a = share(Surface::new(12, 12).unwrap());
    let b = share(Surface::new(12, 12).unwrap());
    a.borrow_mut().draw_rect(0, 0, 12, 12, Glyph::Blue);
    b.borrow_mut().draw_rect(0, 0, 12, 12, Glyph::White);
    c.add_surface(&a, 2, 2);
    c.add_surface(&b, 8, 8);
    frame(&mut c, &mut display);

    assert_eq!(c.buffer().get(10, 10), Glyph::White);
    assert_eq!(c.buffer().get(13, 13), Glyph::White);
    assert_eq!(c.buffer().get(3, 3), Glyph::Blue);
    assert_eq!(c.buffer().get(7, 12), Glyph::Blue);
    assert_eq!(c.buffer().get(19, 19), Glyph::White);
    assert_eq!(c.buffer().get(20, 20), Glyph::Transparent);
}

#[test]
fn re_adding_brings_surface_to_front() {
    let (mut c, mut display) = compositor(2, 2);
    let a = share(Surface::new(4, 4).unwrap());
    let b = share(Surface::new(4, 4).unwrap());
    a.borrow_mut().draw_rect(0, 0, 4, 4, Glyph::Blue);
    b.borrow_mut().draw_rect(0, 0, 4, 4, Glyph::White);
    c.add_surface(&a, 0, 0);
    c.add_surface(&b, 0, 0);
    c.add_surface(&a, 0, 0);
    frame(&mut c, &mut display);
    assert_eq!(c.surface_count(), 2);
    assert_eq!(c.buffer().get(1, 1), Glyph::Blue);
}

#[test]
fn only_overlapped_tiles_are_regenerated() {
    let (mut c, mut display) = compositor(4, 4);
    let s = share(Surface::new(4, 4).unwrap());
    c.add_surface(&s, 20, 36);
    frame(&mut c, &mut display);
    let before: Vec<LegendEntry> = display.last().unwrap().to_vec();

    c.begin_frame();
    s.borrow_mut().draw_pixel(1, 1, Glyph::Red);
    let stats = c.end_frame(&mut display).unwrap();
    assert_eq!(stats.tiles_regenerated, 1);
    assert_eq!(stats.blitted, 1);

    let after = display.last().unwrap();
    let touched = TileCoord::new(1, 2).index(4);
    for (i, (old, new)) in before.iter().zip(after).enumerate() {
        assert_eq!(old.key, new.key);
        if i == touched {
            assert_ne!(old.bitmap, new.bitmap);
        } else {
            assert_eq!(old.bitmap, new.bitmap, "tile {i} changed");
        }
    }
    assert_eq!(c.bitmap(TileCoord::new(1, 2)).unwrap().lines().nth(5).unwrap(), ".....3..........");
}

#[test]
fn straddling_surface_dirties_every_overlapped_tile() {
    let (mut c, mut display) = compositor(4, 4);
    let s = share(Surface::new(4, 4).unwrap());
    c.add_surface(&s, 14, 14);
    c.begin_frame();
    let stats = c.end_frame(&mut display).unwrap();
    assert_eq!(stats.tiles_regenerated, 4);
}

#[test]
fn dirty_set_is_cleared_by_begin_frame() {
    let (mut c, mut display) = compositor(2, 2);
    c.begin_frame();
    c.mark_dirty(TileCoord::new(1, 1));
    assert!(c.is_dirty(TileCoord::new(1, 1)));
    c.end_frame(&mut display).unwrap();
    c.begin_frame();
    assert!(!c.is_dirty(TileCoord::new(1, 1)));
}

#[test]
fn transformed_surface_uses_slow_path_and_bounding_box() {
    let (mut c, mut display) = compositor(4, 4);
    let s = share(Surface::new(8, 8).unwrap());
    s.borrow_mut().draw_rect(0, 0, 8, 8, Glyph::Pink);
    c.add_surface(&s, 16, 16);
    s.borrow_mut().scale(2.0, 2.0);

    c.begin_frame();
    let stats = c.end_frame(&mut display).unwrap();
    assert_eq!(stats.transformed, 1);
    assert_eq!(stats.blitted, 0);
    // [16, 33) in both axes: tiles 1 and 2.
    assert_eq!(stats.tiles_regenerated, 4);

    // Forward mapping only: scaled cells land on every other pixel.
    assert_eq!(c.buffer().get(16, 16), Glyph::Pink);
    assert_eq!(c.buffer().get(30, 30), Glyph::Pink);
    assert_eq!(c.buffer().get(17, 16), Glyph::Transparent);
}

#[test]
fn surfaces_partly_off_screen_are_clipped() {
    let (mut c, mut display) = compositor(2, 2);
    let s = share(Surface::new(8, 8).unwrap());
    s.borrow_mut().draw_rect(0, 0, 8, 8, Glyph::Yellow);
    c.add_surface(&s, -4, 28);
    c.begin_frame();
    let stats = c.end_frame(&mut display).unwrap();
    assert_eq!(stats.tiles_regenerated, 1);
    assert_eq!(c.buffer().get(0, 31), Glyph::Yellow);
    assert_eq!(c.buffer().get(4, 31), Glyph::Transparent);
}

#[test]
fn odd_width_surface_is_composited_whole() {
    let (mut c, mut display) = compositor(2, 2);
    let s = share(Surface::new(5, 2).unwrap());
    s.borrow_mut().draw_rect(0, 0, 5, 2, Glyph::Red);
    c.add_surface(&s, 4, 4);
    frame(&mut c, &mut display);

    let tile = c.bitmap(TileCoord::new(0, 0)).unwrap();
    let rows: Vec<&str> = tile.lines().collect();
    assert_eq!(&rows[4][4..10], "33333.");
    assert_eq!(&rows[5][4..10], "33333.");
    assert_eq!(&rows[6][4..10], "......");
}

#[test]
fn huge_scale_is_clipped_without_overflow() {
    let (mut c, mut display) = compositor(2, 2);
    let s = share(Surface::new(4, 4).unwrap());
    s.borrow_mut().draw_pixel(0, 0, Glyph::Red);
    s.borrow_mut().draw_pixel(3, 3, Glyph::Blue);
    c.add_surface(&s, 0, 0);
    s.borrow_mut().scale(1e300, 1e300);

    c.begin_frame();
    let stats = c.end_frame(&mut display).unwrap();
    assert_eq!(stats.transformed, 1);
    assert_eq!(stats.tiles_regenerated, 4);
    assert_eq!(c.buffer().get(0, 0), Glyph::Red);
    assert!(c.buffer().cells().all(|(_, _, g)| g != Glyph::Blue));
}

#[test]
fn exact_blit_mode_is_configurable() {
    let mut display = RecordingDisplay::new();
    let config = CompositorConfig {
        blit_mode: BlitMode::Exact,
        ..CompositorConfig::with_grid(2, 1)
    };
    let mut c = Compositor::new(config, &mut display).unwrap();
    let s = share(Surface::new(4, 1).unwrap());
    for x in 0..4 {
        s.borrow_mut().draw_pixel(x, 0, Glyph::from_nibble(x as u8 + 1));
    }
    c.add_surface(&s, 3, 0);
    frame(&mut c, &mut display);
    for x in 0..4 {
        assert_eq!(c.buffer().get(x + 3, 0), Glyph::from_nibble(x as u8 + 1));
    }
}

#[test]
fn tile_map_lists_keys_row_by_row() {
    let (c, display) = compositor(3, 2);
    assert_eq!(c.tile_map(), "/01\n234");
    assert_eq!(display.map.as_deref(), Some("/01\n234"));
}

#[test]
fn key_budget_is_enforced() {
    let mut display = RecordingDisplay::new();
    let config = CompositorConfig {
        key_budget: 5,
        ..CompositorConfig::with_grid(3, 2)
    };
    match Compositor::new(config, &mut display) {
        Err(EngineError::Construction(ConstructionError::KeyBudgetExceeded { needed, budget })) => {
            assert_eq!((needed, budget), (6, 5));
        }
        other => panic!("expected budget error, got {other:?}"),
    }
    assert!(display.map.is_none());
}

#[test]
fn zero_tile_size_is_rejected() {
    let mut display = RecordingDisplay::new();
    let config = CompositorConfig {
        tile_size: 0,
        ..CompositorConfig::default()
    };
    assert!(matches!(
        Compositor::new(config, &mut display),
        Err(EngineError::Construction(ConstructionError::InvalidTileSize(0)))
    ));
}

struct Letters;

impl KeyEncoder for Letters {
    fn budget(&self) -> usize {
        26
    }

    fn key(&self, index: usize) -> Option<TileKey> {
        (index < 26).then(|| TileKey::new((b'a' + index as u8) as char))
    }
}

#[test]
fn custom_key_encoder_names_tiles() {
    let mut display = RecordingDisplay::new();
    let c = Compositor::with_encoder(CompositorConfig::with_grid(2, 2), &Letters, &mut display)
        .unwrap();
    assert_eq!(c.tile_map(), "ab\ncd");
    let keys: String = c.legend().iter().map(|e| e.key.as_char()).collect();
    assert_eq!(keys, "abcd");
}

#[test]
fn config_loads_from_json_with_defaults() {
    let config: CompositorConfig =
        serde_json::from_str(r#"{"grid_width":3,"blit_mode":"exact"}"#).unwrap();
    assert_eq!(config.grid_width, 3);
    assert_eq!(config.grid_height, 8);
    assert_eq!(config.blit_mode, BlitMode::Exact);

    let mut display = RecordingDisplay::new();
    let c = Compositor::new(config, &mut display).unwrap();
    assert_eq!(c.legend().len(), 24);
}
