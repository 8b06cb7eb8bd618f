//! Byte-aligned bulk copy between pixel buffers.
//!
//! Used for untransformed surfaces. Two pixels share a byte, so a row can be
//! copied with a plain byte-range copy only when source and destination start
//! on the same nibble. When the start columns differ in parity the row is
//! handled per [`BlitMode`]; rows of odd-width buffers whose columns agree
//! but whose packed cells do not are copied cell by cell.

use crate::buffer::PixelBuffer;

/// How rows with mismatched nibble parity are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlitMode {
    /// Skip the first source cell of the row so both sides line up on a byte.
    /// The row lands one source column to the left and loses that cell.
    #[default]
    Aligned,
    /// Copy the row cell by cell. Nothing is lost.
    Exact,
}

/// [`blit_with`] in [`BlitMode::Aligned`].
pub fn blit(src: &PixelBuffer, dst: &mut PixelBuffer, copy_w: i32, copy_h: i32, x: i32, y: i32) {
    blit_with(src, dst, copy_w, copy_h, x, y, BlitMode::Aligned);
}

/// Copy a `copy_w × copy_h` region from the top-left of `src` to `(x, y)` in
/// `dst`.
///
/// Negative `x`/`y` shrink the region and advance the source read offset.
/// The region is clipped to both buffers; nothing outside `dst` is written.
/// Transparent source cells are copied like any other.
pub fn blit_with(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    copy_w: i32,
    copy_h: i32,
    x: i32,
    y: i32,
    mode: BlitMode,
) {
    let (mut copy_w, mut copy_h) = (i64::from(copy_w), i64::from(copy_h));
    let (mut x, mut y) = (i64::from(x), i64::from(y));
    let (mut sx, mut sy) = (0i64, 0i64);

    if x < 0 {
        sx = -x;
        copy_w += x;
        x = 0;
    }
    if y < 0 {
        sy = -y;
        copy_h += y;
        y = 0;
    }
    copy_w = copy_w
        .min(i64::from(dst.width()) - x)
        .min(i64::from(src.width()) - sx);
    copy_h = copy_h
        .min(i64::from(dst.height()) - y)
        .min(i64::from(src.height()) - sy);
    if copy_w <= 0 || copy_h <= 0 {
        return;
    }

    let width = copy_w as usize;
    for row in 0..copy_h {
        let mut d = dst.index(x as i32, (y + row) as i32);
        let mut s = src.index(sx as i32, (sy + row) as i32);
        let mut remaining = width;

        if (x ^ sx) & 1 == 1 {
            match mode {
                BlitMode::Aligned => {
                    s += 1;
                    remaining -= 1;
                    if remaining == 0 {
                        continue;
                    }
                }
                BlitMode::Exact => {
                    copy_cells(src, dst, s, d, remaining);
                    continue;
                }
            }
        }

        // Odd-width buffers: columns agree but the packed cells do not.
        if (d ^ s) & 1 == 1 {
            copy_cells(src, dst, s, d, remaining);
            continue;
        }

        // Prologue: destination starts on a low nibble.
        if d & 1 == 1 {
            copy_cells(src, dst, s, d, 1);
            d += 1;
            s += 1;
            remaining -= 1;
        }

        let full = remaining >> 1;
        if full > 0 {
            let db = d >> 1;
            let sb = s >> 1;
            dst.store_mut().bytes_mut()[db..db + full]
                .copy_from_slice(&src.store().bytes()[sb..sb + full]);
        }

        // Epilogue: one trailing cell in a high nibble.
        if remaining & 1 == 1 {
            let last = remaining - 1;
            copy_cells(src, dst, s + last, d + last, 1);
        }
    }
}

#[inline(always)]
fn copy_cells(src: &PixelBuffer, dst: &mut PixelBuffer, s: usize, d: usize, n: usize) {
    let from = src.store();
    let to = dst.store_mut();
    for i in 0..n {
        to.set(d + i, from.get(s + i));
    }
}
