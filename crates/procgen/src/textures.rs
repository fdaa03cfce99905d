//! Procedural surface textures for creature skins.
//! The scale pattern is rasterised at runtime; nothing is loaded from disk.

use rand::Rng;

/// RGBA pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque grey of the given brightness (`0..=1`).
    pub fn grey(brightness: f32) -> Self {
        let v = (brightness.clamp(0.0, 1.0) * 255.0) as u8;
        Self::new(v, v, v, 255)
    }

    /// Mean of the colour channels in `0..=1`.
    pub fn luminance(&self) -> f32 {
        (self.r as f32 + self.g as f32 + self.b as f32) / (3.0 * 255.0)
    }

    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// How samplers address texels outside `0..1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    Repeat,
    ClampToEdge,
}

/// Generated texture data
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl TextureData {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::BLACK; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        if let Some(slot) = self.index(x, y).and_then(|i| self.pixels.get_mut(i)) {
            *slot = pixel;
        }
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        self.index(x, y)
            .and_then(|i| self.pixels.get(i))
            .copied()
            .unwrap_or(Pixel::BLACK)
    }

    /// Nearest-texel lookup with the given addressing mode.
    pub fn sample(&self, u: f32, v: f32, wrap: WrapMode) -> Pixel {
        if self.width == 0 || self.height == 0 {
            return Pixel::BLACK;
        }
        let (u, v) = match wrap {
            WrapMode::Repeat => ((u.fract() + 1.0).fract(), (v.fract() + 1.0).fract()),
            WrapMode::ClampToEdge => (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0)),
        };
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.get_pixel(x, y)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.to_bytes());
        }
        bytes
    }
}

/// Configuration for the triangular scale pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePatternConfig {
    /// Width and height of the square raster in pixels.
    pub size: u32,
    /// Edge of one scale cell in pixels.
    pub cell_size: u32,
    /// Tiling repeat applied by the material on both axes.
    pub repeat: f32,
    /// Darkest brightness a cell can get; the brightest is 1.0.
    pub min_brightness: f32,
}

impl Default for ScalePatternConfig {
    fn default() -> Self {
        Self {
            size: 1024,
            cell_size: 16,
            repeat: 4.0,
            min_brightness: 0.7,
        }
    }
}

impl ScalePatternConfig {
    pub fn cells_per_side(&self) -> u32 {
        self.size / self.cell_size.max(2)
    }
}

/// Rasterise rows of triangular scales on black.
///
/// Odd rows are shifted by half a cell. Each cell gets one brightness draw in
/// `[min_brightness, 1.0)`, taken in row-major order, so the same RNG state
/// yields the same raster. Cells overhanging the right edge wrap around, which
/// keeps the pattern tileable under repeat addressing.
pub fn generate_scale_pattern<R: Rng + ?Sized>(config: &ScalePatternConfig, rng: &mut R) -> TextureData {
    let size = config.size;
    let cell = config.cell_size.max(2);
    let half = cell / 2;
    let cells = config.cells_per_side();
    let spread = 1.0 - config.min_brightness;

    let mut texture = TextureData::new(size, size);
    if size == 0 {
        return texture;
    }

    for row in 0..cells {
        for col in 0..cells {
            let x0 = col * cell + (row % 2) * half;
            let y0 = row * cell;
            let brightness = config.min_brightness + rng.gen::<f32>() * spread;
            let pixel = Pixel::grey(brightness);

            // Triangle (x0, y0) -> (x0 + half, y0 + half) -> (x0, y0 + cell),
            // sampled at pixel centres.
            for dy in 0..cell {
                let yc = dy as f32 + 0.5;
                let width = half as f32 - (yc - half as f32).abs();
                for dx in 0..half {
                    if (dx as f32 + 0.5) < width {
                        texture.set_pixel((x0 + dx) % size, y0 + dy, pixel);
                    }
                }
            }
        }
    }

    texture
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small() -> ScalePatternConfig {
        ScalePatternConfig {
            size: 64,
            cell_size: 16,
            ..Default::default()
        }
    }

    #[test]
    fn every_cell_is_lit_within_brightness_range() {
        let config = small();
        let tex = generate_scale_pattern(&config, &mut StdRng::seed_from_u64(7));
        for row in 0..config.cells_per_side() {
            for col in 0..config.cells_per_side() {
                let x = col * 16 + (row % 2) * 8;
                let y = row * 16 + 8;
                let lum = tex.get_pixel(x, y).luminance();
                assert!(lum >= 0.69 && lum <= 1.0, "cell ({row},{col}) luminance {lum}");
            }
        }
    }

    #[test]
    fn gaps_between_scales_stay_black() {
        let tex = generate_scale_pattern(&small(), &mut StdRng::seed_from_u64(7));
        // Right of the first cell's triangle, before the next cell starts.
        assert_eq!(tex.get_pixel(15, 8), Pixel::BLACK);
        // Top row of a cell is below the triangle's half-pixel tip.
        assert_eq!(tex.get_pixel(0, 0), Pixel::BLACK);
    }

    #[test]
    fn odd_rows_are_shifted_by_half_a_cell() {
        let tex = generate_scale_pattern(&small(), &mut StdRng::seed_from_u64(3));
        // Row 1 starts half a cell in, so its left edge is dark and x = 8 is lit.
        assert_eq!(tex.get_pixel(0, 24), Pixel::BLACK);
        assert_ne!(tex.get_pixel(8, 24), Pixel::BLACK);
        // Last cell of row 1 reaches the right edge exactly.
        assert_ne!(tex.get_pixel(56, 24), Pixel::BLACK);
    }

    #[test]
    fn same_seed_same_raster() {
        let a = generate_scale_pattern(&small(), &mut StdRng::seed_from_u64(11));
        let b = generate_scale_pattern(&small(), &mut StdRng::seed_from_u64(11));
        let c = generate_scale_pattern(&small(), &mut StdRng::seed_from_u64(12));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn pixel_index_does_not_wrap_for_large_rasters() {
        // 70000 * 70000 exceeds u32; the index must be computed wide.
        let tex = TextureData {
            width: 70_000,
            height: 70_000,
            pixels: vec![Pixel::grey(1.0); 4],
        };
        assert_eq!(tex.index(69_999, 69_999), Some(69_999 * 70_000 + 69_999));
        assert_eq!(tex.get_pixel(69_999, 69_999), Pixel::BLACK);
        assert_eq!(tex.get_pixel(3, 0), Pixel::grey(1.0));
    }

    #[test]
    fn repeat_sampling_wraps() {
        let tex = generate_scale_pattern(&small(), &mut StdRng::seed_from_u64(1));
        assert_eq!(tex.sample(0.01, 0.13, WrapMode::Repeat), tex.sample(1.01, 2.13, WrapMode::Repeat));
        assert_eq!(tex.to_bytes().len(), 64 * 64 * 4);
    }
}
