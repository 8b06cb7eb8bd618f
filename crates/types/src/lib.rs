//! Glyphs, palette and tile coordinates.
//!
//! A glyph is one pixel as the host display sees it: a 4-bit value with a
//! display character and, unless transparent, a palette color. Pixel storage,
//! the compositor and every display backend agree on these definitions, so
//! this crate has no dependencies of its own.
//!
//! # Glyph Alphabet
//!
//! The host display only understands a fixed alphabet of 16 characters. One of
//! them (`.`) is transparent; the other 15 are palette colors. Every glyph fits
//! in a nibble, which is how pixel storage packs two pixels per byte.
//!
//! | Char | Nibble | Glyph |
//! |------|--------|-------|
//! | `.` | 0x0 | Transparent |
//! | `1` | 0x1 | Gray |
//! | `2` | 0x2 | White |
//! | `3` | 0x3 | Red |
//! | `4` | 0x4 | Green |
//! | `5` | 0x5 | Blue |
//! | `6` | 0x6 | Yellow |
//! | `7` | 0x7 | SkyBlue |
//! | `8` | 0x8 | Pink |
//! | `9` | 0x9 | Orange |
//! | `L` | 0xA | DarkGray |
//! | `C` | 0xB | Brown |
//! | `D` | 0xC | DarkGreen |
//! | `F` | 0xD | Olive |
//! | `H` | 0xE | Purple |
//! | `0` | 0xF | Black |
//!
//! # Display Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TILE_SIZE` | 16 | Tile edge in pixels |
//! | `DEFAULT_GRID_WIDTH` | 10 | Tiles per screen row |
//! | `DEFAULT_GRID_HEIGHT` | 8 | Tiles per screen column |
//! | `DEFAULT_KEY_BUDGET` | 80 | Printable keys from `/` to `~` |
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use subtile_types::{Glyph, TileCoord};
//!
//! let g = Glyph::from_char('L').unwrap();
//! assert_eq!(g, Glyph::DarkGray);
//! assert_eq!(g.nibble(), 0xA);
//!
//! // Out-of-range values are masked, never rejected.
//! assert_eq!(Glyph::from_nibble(0x1A), Glyph::DarkGray);
//!
//! let t = TileCoord::new(3, 1);
//! assert_eq!(t.index(10), 13);
//! ```

/// Tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// Screen width in tiles.
pub const DEFAULT_GRID_WIDTH: u32 = 10;

/// Screen height in tiles.
pub const DEFAULT_GRID_HEIGHT: u32 = 8;

/// First tile key character (`/`, ASCII 47).
pub const DEFAULT_FIRST_KEY: char = '/';

/// Number of printable tile keys from `/` through `~`.
pub const DEFAULT_KEY_BUDGET: usize = 80;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Number of glyphs in the alphabet (transparent + 15 colors).
pub const GLYPH_COUNT: usize = 16;

/// One 4-bit pixel value.
///
/// The discriminant is the nibble stored in packed pixel memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Glyph {
    #[default]
    Transparent = 0x0,
    Gray = 0x1,
    White = 0x2,
    Red = 0x3,
    Green = 0x4,
    Blue = 0x5,
    Yellow = 0x6,
    SkyBlue = 0x7,
    Pink = 0x8,
    Orange = 0x9,
    DarkGray = 0xA,
    Brown = 0xB,
    DarkGreen = 0xC,
    Olive = 0xD,
    Purple = 0xE,
    Black = 0xF,
}

/// Glyphs indexed by nibble value.
const BY_NIBBLE: [Glyph; GLYPH_COUNT] = [
    Glyph::Transparent,
    Glyph::Gray,
    Glyph::White,
    Glyph::Red,
    Glyph::Green,
    Glyph::Blue,
    Glyph::Yellow,
    Glyph::SkyBlue,
    Glyph::Pink,
    Glyph::Orange,
    Glyph::DarkGray,
    Glyph::Brown,
    Glyph::DarkGreen,
    Glyph::Olive,
    Glyph::Purple,
    Glyph::Black,
];

/// Display characters indexed by nibble value.
const CHARS: [char; GLYPH_COUNT] = [
    '.', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'L', 'C', 'D', 'F', 'H', '0',
];

impl Glyph {
    /// Every glyph, in nibble order.
    pub const ALL: [Glyph; GLYPH_COUNT] = BY_NIBBLE;

    /// Build a glyph from a raw value, keeping only the low 4 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use subtile_types::Glyph;
    ///
    /// assert_eq!(Glyph::from_nibble(0x4), Glyph::Green);
    /// assert_eq!(Glyph::from_nibble(0xF4), Glyph::Green);
    /// ```
    #[inline(always)]
    pub const fn from_nibble(value: u8) -> Self {
        BY_NIBBLE[(value & 0xF) as usize]
    }

    /// The 4-bit storage value.
    #[inline(always)]
    pub const fn nibble(self) -> u8 {
        self as u8
    }

    /// Parse a display character.
    ///
    /// # Examples
    ///
    /// ```
    /// use subtile_types::Glyph;
    ///
    /// assert_eq!(Glyph::from_char('.'), Some(Glyph::Transparent));
    /// assert_eq!(Glyph::from_char('0'), Some(Glyph::Black));
    /// assert_eq!(Glyph::from_char('x'), None);
    /// ```
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Glyph::Transparent),
            '1' => Some(Glyph::Gray),
            '2' => Some(Glyph::White),
            '3' => Some(Glyph::Red),
            '4' => Some(Glyph::Green),
            '5' => Some(Glyph::Blue),
            '6' => Some(Glyph::Yellow),
            '7' => Some(Glyph::SkyBlue),
            '8' => Some(Glyph::Pink),
            '9' => Some(Glyph::Orange),
            'L' => Some(Glyph::DarkGray),
            'C' => Some(Glyph::Brown),
            'D' => Some(Glyph::DarkGreen),
            'F' => Some(Glyph::Olive),
            'H' => Some(Glyph::Purple),
            '0' => Some(Glyph::Black),
            _ => None,
        }
    }

    /// The display character for this glyph.
    #[inline(always)]
    pub const fn as_char(self) -> char {
        CHARS[self as usize]
    }

    #[inline(always)]
    pub const fn is_transparent(self) -> bool {
        matches!(self, Glyph::Transparent)
    }

    /// Normalized RGB (0.0..=1.0) for this glyph, `None` when transparent.
    pub fn rgb(self) -> Option<[f32; 3]> {
        PALETTE
            .iter()
            .find(|(g, _)| *g == self)
            .map(|(_, rgb)| *rgb)
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The 15 opaque palette colors, normalized RGB.
///
/// Order matters: sprite quantization resolves ties in favour of the earlier
/// entry.
pub const PALETTE: [(Glyph, [f32; 3]); 15] = [
    (Glyph::Black, [0.0, 0.0, 0.0]),
    (Glyph::DarkGray, [0.282, 0.314, 0.337]),
    (Glyph::Gray, [0.569, 0.592, 0.608]),
    (Glyph::White, [0.973, 0.976, 0.980]),
    (Glyph::Red, [0.922, 0.286, 0.392]),
    (Glyph::Brown, [0.545, 0.251, 0.184]),
    (Glyph::SkyBlue, [0.102, 0.694, 0.976]),
    (Glyph::Blue, [0.071, 0.078, 0.878]),
    (Glyph::Yellow, [0.996, 0.906, 0.059]),
    (Glyph::Olive, [0.580, 0.549, 0.200]),
    (Glyph::Green, [0.176, 0.878, 0.243]),
    (Glyph::DarkGreen, [0.110, 0.584, 0.059]),
    (Glyph::Pink, [0.957, 0.424, 0.733]),
    (Glyph::Purple, [0.667, 0.227, 0.773]),
    (Glyph::Orange, [0.957, 0.439, 0.090]),
];

/// Tile coordinate on the display grid (in tiles, not pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub tx: i32,
    pub ty: i32,
}

impl TileCoord {
    pub const fn new(tx: i32, ty: i32) -> Self {
        Self { tx, ty }
    }

    /// Row-major legend index for a grid `grid_width` tiles wide.
    ///
    /// Only meaningful for in-range coordinates; callers check bounds first.
    #[inline(always)]
    pub fn index(self, grid_width: u32) -> usize {
        (self.ty as usize) * (grid_width as usize) + (self.tx as usize)
    }

    /// Inverse of [`TileCoord::index`].
    #[inline(always)]
    pub fn from_index(index: usize, grid_width: u32) -> Self {
        let w = grid_width as usize;
        Self {
            tx: (index % w) as i32,
            ty: (index / w) as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_char_mapping_is_a_bijection() {
        let mut seen = std::collections::HashSet::new();
        for g in Glyph::ALL {
            let ch = g.as_char();
            assert!(seen.insert(ch), "duplicate char {ch}");
            assert_eq!(Glyph::from_char(ch), Some(g));
        }
        assert_eq!(seen.len(), GLYPH_COUNT);
    }

    #[test]
    fn nibble_values_follow_storage_table() {
        assert_eq!(Glyph::Transparent.nibble(), 0x0);
        assert_eq!(Glyph::Orange.nibble(), 0x9);
        assert_eq!(Glyph::DarkGray.nibble(), 0xA);
        assert_eq!(Glyph::Purple.nibble(), 0xE);
        assert_eq!(Glyph::Black.nibble(), 0xF);
        for v in 0u8..16 {
            assert_eq!(Glyph::from_nibble(v).nibble(), v);
        }
    }

    #[test]
    fn palette_covers_every_opaque_glyph_once() {
        for g in Glyph::ALL {
            let count = PALETTE.iter().filter(|(p, _)| *p == g).count();
            if g.is_transparent() {
                assert_eq!(count, 0);
                assert_eq!(g.rgb(), None);
            } else {
                assert_eq!(count, 1, "{g:?}");
            }
        }
    }

    #[test]
    fn default_key_budget_spans_printable_range() {
        let last = (DEFAULT_FIRST_KEY as u32) + DEFAULT_KEY_BUDGET as u32 - 1;
        assert_eq!(char::from_u32(last), Some('~'));
        assert_eq!(
            (DEFAULT_GRID_WIDTH * DEFAULT_GRID_HEIGHT) as usize,
            DEFAULT_KEY_BUDGET
        );
    }

    #[test]
    fn tile_index_round_trips() {
        let t = TileCoord::new(7, 3);
        assert_eq!(TileCoord::from_index(t.index(10), 10), t);
    }
}
