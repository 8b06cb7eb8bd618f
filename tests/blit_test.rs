//! Fast-path blit behavior.

use subtile::core::{blit, blit_with, BlitMode, Drawer, PixelBuffer};
use subtile::types::Glyph;

fn opaque(w: u32, h: u32) -> PixelBuffer {
    let mut b = PixelBuffer::new(w, h).unwrap();
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            b.set(x, y, Glyph::from_nibble((x * 3 + y) as u8 % 15 + 1));
        }
    }
    b
}

#[test]
fn blit_at_origin_reproduces_source() {
    for (m, n) in [(4, 4), (6, 3), (16, 16), (10, 7), (5, 3), (7, 1)] {
        let src = opaque(m, n);
        let mut dst = PixelBuffer::new(16, 16).unwrap();
        blit(&src, &mut dst, m as i32, n as i32, 0, 0);
        for y in 0..n as i32 {
            for x in 0..m as i32 {
                assert_eq!(dst.get(x, y), src.get(x, y), "{m}x{n} at ({x},{y})");
            }
        }
    }
}

#[test]
fn negative_offset_clips_leading_columns() {
    let src = opaque(8, 4);
    let mut dst = PixelBuffer::new(16, 4).unwrap();
    blit(&src, &mut dst, 8, 4, -2, 0);
    for y in 0..4 {
        for x in 0..6 {
            assert_eq!(dst.get(x, y), src.get(x + 2, y));
        }
        assert_eq!(dst.get(6, y), Glyph::Transparent);
    }
}

#[test]
fn negative_offset_clips_leading_rows() {
    let src = opaque(4, 4);
    let mut dst = PixelBuffer::new(4, 4).unwrap();
    blit(&src, &mut dst, 4, 4, 0, -3);
    for x in 0..4 {
        assert_eq!(dst.get(x, 0), src.get(x, 3));
        assert_eq!(dst.get(x, 1), Glyph::Transparent);
    }
}

#[test]
fn blit_never_writes_outside_destination() {
    let src = opaque(8, 8);
    for (x, y) in [(-7, -7), (5, 5), (7, 0), (0, 7), (-3, 6)] {
        let mut dst = PixelBuffer::new(8, 8).unwrap();
        dst.draw_rect(0, 0, 8, 8, Glyph::Black);
        let before = dst.clone();
        blit(&src, &mut dst, 8, 8, x, y);
        for (cx, cy, g) in dst.cells() {
            let inside = cx >= x && cy >= y && cx < x + 8 && cy < y + 8;
            if !inside {
                assert_eq!(g, before.get(cx, cy));
            }
        }
    }
}

#[test]
fn odd_offset_drops_one_cell_in_aligned_mode_only() {
    let src = opaque(6, 2);

    let mut aligned = PixelBuffer::new(8, 2).unwrap();
    blit(&src, &mut aligned, 6, 2, 1, 0);
    assert_eq!(aligned.get(1, 0), src.get(1, 0));
    assert_eq!(aligned.get(6, 0), Glyph::Transparent);

    let mut exact = PixelBuffer::new(8, 2).unwrap();
    blit_with(&src, &mut exact, 6, 2, 1, 0, BlitMode::Exact);
    for y in 0..2 {
        for x in 0..6 {
            assert_eq!(exact.get(x + 1, y), src.get(x, y));
        }
    }
}

#[test]
fn transparent_source_cells_overwrite() {
    let src = PixelBuffer::new(4, 1).unwrap();
    let mut dst = PixelBuffer::new(4, 1).unwrap();
    dst.draw_rect(0, 0, 4, 1, Glyph::Red);
    blit(&src, &mut dst, 4, 1, 0, 0);
    assert!(dst.cells().all(|(_, _, g)| g.is_transparent()));
}
