//! Six-bit unit ↔ RGB mapping.
//!
//! A unit `00rrggbb` spreads one two-bit field per channel. Each field
//! picks one of four evenly spaced levels so the channels survive mild
//! lossy handling; reading a pixel snaps every channel back to the
//! nearest level.

/// Channel intensities for field values 0..=3.
pub const LEVELS: [u8; 4] = [0, 85, 170, 255];

/// A 24-bit pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    pub fn r(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn b(self) -> u8 {
        self.0[2]
    }
}

/// Color for a unit. Bits above the low six are ignored.
pub fn to_color(unit: u8) -> Rgb {
    Rgb([
        LEVELS[usize::from((unit >> 4) & 0b11)],
        LEVELS[usize::from((unit >> 2) & 0b11)],
        LEVELS[usize::from(unit & 0b11)],
    ])
}

/// Unit for a color, snapping each channel to the nearest level.
pub fn from_color(color: Rgb) -> u8 {
    (nearest_level(color.r()) << 4) | (nearest_level(color.g()) << 2) | nearest_level(color.b())
}

fn nearest_level(channel: u8) -> u8 {
    // levels are 85 apart, so the midpoints sit at 42.5 + 85k
    ((u16::from(channel) + 42) / 85) as u8
}
