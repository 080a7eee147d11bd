use crate::color::{to_color, Rgb};
use crate::error::{EncodeError, Result};

const CHANNELS: usize = 3;

/// Row-major grid of 24-bit RGB pixels, initially black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelCanvas {
    /// Create a black canvas.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        let offset = self.offset(x, y)?;
        let mut rgb = [0u8; CHANNELS];
        rgb.copy_from_slice(&self.pixels[offset..offset + CHANNELS]);
        Some(Rgb(rgb))
    }

    /// Overwrite the pixel at `(x, y)`. Returns false outside the canvas.
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) -> bool {
        match self.offset(x, y) {
            Some(offset) => {
                self.pixels[offset..offset + CHANNELS].copy_from_slice(&color.0);
                true
            }
            None => false,
        }
    }

    /// Paint each unit as `redundancy` identical pixels, left to right and
    /// top to bottom. Pixels after the last unit stay black.
    pub fn paint(&mut self, units: &[u8], redundancy: u32) -> Result<()> {
        let run = redundancy.max(1) as usize;
        let needed = units.len() as u64 * run as u64;
        let available = u64::from(self.width) * u64::from(self.height);
        if needed > available {
            return Err(EncodeError::PayloadExceedsCanvas {
                width: u64::from(self.width),
                height: needed.div_ceil(u64::from(self.width.max(1))),
                max_width: self.width,
                max_height: self.height,
            });
        }

        let block = run * CHANNELS;
        for (&unit, dst) in units.iter().zip(self.pixels.chunks_exact_mut(block)) {
            let color = to_color(unit);
            for pixel in dst.chunks_exact_mut(CHANNELS) {
                pixel.copy_from_slice(&color.0);
            }
        }
        Ok(())
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|p| Rgb([p[0], p[1], p[2]]))
    }

    /// Raw `RGBRGB...` bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the canvas and return its raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::from_color;

    #[test]
    fn test_new_canvas_is_black() {
        let canvas = PixelCanvas::new(8, 2);
        assert_eq!(canvas.as_raw().len(), 8 * 2 * 3);
        assert!(canvas.pixels().all(|p| p == Rgb::BLACK));
        assert_eq!(canvas.get(8, 0), None);
    }

    #[test]
    fn test_paint_repeats_each_unit() {
        let mut canvas = PixelCanvas::new(8, 2);
        canvas.paint(&[0x3F, 0x01, 0x30], 4).unwrap();

        for x in 0..4 {
            assert_eq!(canvas.get(x, 0), Some(Rgb([255, 255, 255])));
            assert_eq!(canvas.get(x + 4, 0), Some(Rgb([0, 0, 85])));
            assert_eq!(canvas.get(x, 1), Some(Rgb([255, 0, 0])));
            assert_eq!(canvas.get(x + 4, 1), Some(Rgb::BLACK));
        }

        let units: Vec<u8> = canvas.pixels().step_by(4).map(from_color).collect();
        assert_eq!(units, vec![0x3F, 0x01, 0x30, 0x00]);
    }

    #[test]
    fn test_paint_rejects_overflow() {
        let mut canvas = PixelCanvas::new(4, 1);
        let err = canvas.paint(&[1, 2], 4).unwrap_err();
        assert!(matches!(err, EncodeError::PayloadExceedsCanvas { .. }));
    }

    #[test]
    fn test_set_and_get() {
        let mut canvas = PixelCanvas::new(2, 2);
        assert!(canvas.set(1, 1, Rgb([1, 2, 3])));
        assert!(!canvas.set(2, 0, Rgb([1, 2, 3])));
        assert_eq!(canvas.get(1, 1), Some(Rgb([1, 2, 3])));
        assert_eq!(&canvas.into_raw()[9..], &[1, 2, 3]);
    }
}
