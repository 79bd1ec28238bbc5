// render.rs - Refract changed cells into the output pixel buffer
//
// A cell's height displaces where that pixel samples the source texture:
// positive heights pull the sample toward the cell, negative push it out,
// and zero samples the pixel itself. Only RGB move; alpha stays.
//
// Sample coordinates are clamped to the texture for every cell, so extreme
// heights smear the border instead of reading garbage.

use crate::error::RippleError;

pub struct Refractor {
    width: i64,
    height: i64,
    // Immutable snapshot of the source image
    texture: Vec<u8>,
    // Presented every tick, mutated in place, never replaced
    output: Vec<u8>,
}

impl Refractor {
    pub fn new(width: u32, height: u32, texture: Vec<u8>) -> Result<Self, RippleError> {
        if width == 0 || height == 0 {
            return Err(RippleError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if texture.len() != expected {
            return Err(RippleError::BufferSize {
                expected,
                got: texture.len(),
            });
        }
        let output = texture.clone();
        Ok(Self {
            width: width as i64,
            height: height as i64,
            texture,
            output,
        })
    }

    /// Copy the refracted source sample for cell (i, j) with height `value`
    /// into the output pixel (j, i).
    pub fn refract(&mut self, i: usize, j: usize, value: i32, drop_depth: i32) {
        let (w, h) = (self.width, self.height);
        let span = 2 * drop_depth as i64;
        let d = span - value as i64;

        // Division truncates toward zero; i64 keeps the products exact for
        // any i32 height.
        let dx = (j as i64 - w) * d / span + w;
        let dy = (i as i64 - h) * d / span + h;

        let sx = dx.clamp(0, w - 1);
        let sy = dy.clamp(0, h - 1);

        let src = ((sy * w + sx) * 4) as usize;
        let dst = ((i as i64 * w + j as i64) * 4) as usize;

        // RGB only; the output keeps its own alpha
        self.output[dst] = self.texture[src];
        self.output[dst + 1] = self.texture[src + 1];
        self.output[dst + 2] = self.texture[src + 2];
    }

    /// RGBA output buffer
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Texture whose every pixel encodes its own coordinates
    fn coordinate_texture(w: u32, h: u32) -> Vec<u8> {
        let mut texture = Vec::with_capacity((w * h * 4) as usize);
        for y in 0..h {
            for x in 0..w {
                texture.extend_from_slice(&[x as u8, y as u8, 0xAB, 255]);
            }
        }
        texture
    }

    fn pixel(buf: &[u8], w: u32, x: u32, y: u32) -> &[u8] {
        let idx = ((y * w + x) * 4) as usize;
        &buf[idx..idx + 4]
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            Refractor::new(0, 3, vec![]),
            Err(RippleError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn rejects_wrong_buffer_length() {
        assert!(matches!(
            Refractor::new(2, 2, vec![0; 15]),
            Err(RippleError::BufferSize { .. })
        ));
    }

    #[test]
    fn output_starts_as_texture_copy() {
        let texture = coordinate_texture(8, 6);
        let refractor = Refractor::new(8, 6, texture.clone()).unwrap();
        assert_eq!(refractor.output(), &texture[..]);
    }

    #[test]
    fn zero_height_is_the_identity() {
        let mut refractor = Refractor::new(8, 8, coordinate_texture(8, 8)).unwrap();
        refractor.refract(3, 5, 0, 1024);
        // d == span exactly, so the sample lands on (5, 3) itself
        assert_eq!(pixel(refractor.output(), 8, 5, 3), &[5, 3, 0xAB, 255]);
    }

    #[test]
    fn positive_height_displaces_the_sample() {
        let w = 64;
        let mut refractor = Refractor::new(w, w, coordinate_texture(w, w)).unwrap();
        refractor.refract(10, 10, 512, 1024);

        // d = 1536; (10 - 64) * 1536 / 2048 = -40.5, truncated to -40;
        // -40 + 64 = 24
        assert_eq!(pixel(refractor.output(), w, 10, 10), &[24, 24, 0xAB, 255]);
    }

    #[test]
    fn negative_height_displaces_the_other_way() {
        let w = 64;
        let mut refractor = Refractor::new(w, w, coordinate_texture(w, w)).unwrap();
        refractor.refract(10, 10, -512, 1024);

        // d = 2560; (10 - 64) * 2560 / 2048 = -67.5, truncated to -67;
        // -67 + 64 = -3, clamped to 0
        assert_eq!(pixel(refractor.output(), w, 10, 10), &[0, 0, 0xAB, 255]);
    }

    #[test]
    fn extreme_heights_clamp_instead_of_escaping() {
        let mut refractor = Refractor::new(16, 16, coordinate_texture(16, 16)).unwrap();
        refractor.refract(0, 1, i32::MIN, 1024);
        refractor.refract(15, 15, i32::MAX, 1024);
        // d == 0 maps every cell to (w, h); the clamp brings it to (15, 15)
        refractor.refract(8, 8, 2 * 1024, 1024);
        assert_eq!(pixel(refractor.output(), 16, 8, 8), &[15, 15, 0xAB, 255]);
    }

    #[test]
    fn alpha_channel_is_never_copied() {
        let w = 8;
        let mut texture = coordinate_texture(w, w);
        // refract(4, 4, 300, 1024) samples (5, 5); give that source pixel a
        // distinctive alpha that must not leak into the destination
        texture[((5 * w + 5) * 4 + 3) as usize] = 7;
        let mut refractor = Refractor::new(w, w, texture).unwrap();
        refractor.refract(4, 4, 300, 1024);

        let out = pixel(refractor.output(), w, 4, 4);
        assert_eq!(out[..3], [5, 5, 0xAB]);
        assert_eq!(out[3], 255);
    }
}
