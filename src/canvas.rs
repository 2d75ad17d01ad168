use anyhow::Context;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// A frame buffer of packed `0xAARRGGBB` pixels, with the top-left being `(0,0)`.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    buffer: Vec<u32>,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn black() -> Self {
        Self::new(0., 0., 0.)
    }

    pub fn is_black(&self) -> bool {
        self.r == 0. && self.g == 0. && self.b == 0.
    }

    pub fn white() -> Self {
        Self::new(1., 1., 1.)
    }

    pub fn blue() -> Self {
        Self::new(0., 0., 1.)
    }

    /// Parse a `#rrggbb` hex color.
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#').unwrap_or(text);
        if hex.len() != 6 {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        Some(Self::from_argb(value))
    }

    /// Unpack a `0xAARRGGBB` pixel, ignoring alpha.
    pub fn from_argb(value: u32) -> Self {
        let channel = |shift: u32| ((value >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Mix two colors by modulating each channel. The operation is commutative.
    pub fn blend(&self, other: &Color) -> Color {
        Color::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    pub fn to_u8(&self) -> [u8; 3] {
        let convert = |x: f32| (x * 255.0).min(255.0).max(0.0) as u8;
        [convert(self.r), convert(self.g), convert(self.b)]
    }

    /// Pack the color as an opaque `0xAARRGGBB` pixel.
    pub fn argb(&self) -> u32 {
        let [r, g, b] = self.to_u8();
        0xff00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
    }
}

impl std::ops::Mul<f32> for Color {
    type Output = Color;
    fn mul(self, rhs: f32) -> Self::Output {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl std::ops::Mul<Color> for f32 {
    type Output = Color;
    fn mul(self, rhs: Color) -> Self::Output {
        rhs * self
    }
}

impl std::ops::Add for Color {
    type Output = Color;
    fn add(mut self, rhs: Color) -> Self::Output {
        self += rhs;
        self
    }
}

impl std::ops::AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

/// The number of pixels in a `width` by `height` image, computed without overflowing `u32`.
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

impl Canvas {
    /// Construct a new [`Canvas`], filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![Color::black().argb(); pixel_count(width, height)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate the buffer for a new size. No pixels from the old size are kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    fn index(&self, x: usize, y: usize) -> usize {
        (self.width as usize) * y + x
    }

    /// Fetch a pixel in the [`Canvas`].
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.buffer[self.index(x, y)]
    }

    /// Mutate a pixel in the [`Canvas`].
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut u32 {
        let ix = self.index(x, y);
        &mut self.buffer[ix]
    }

    /// The packed pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.buffer
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.buffer
    }

    /// Iterate over the rows of the image, starting at the top.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.buffer.chunks(self.width.max(1) as usize)
    }

    /// Return raw image RGB8 data for the image.
    pub fn data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.buffer.len() * 3);

        for row in self.rows() {
            for pixel in row {
                data.extend_from_slice(&Color::from_argb(*pixel).to_u8())
            }
        }

        data
    }

    /// Write the canvas to an image file; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.data(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )
        .with_context(|| format!("failed to write image `{}`", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_commutes() {
        let a = Color::new(0.2, 0.5, 1.0);
        let b = Color::new(0.9, 0.1, 0.4);
        assert_eq!(a.blend(&b), b.blend(&a));
        assert_eq!(Color::blue(), Color::blue().blend(&Color::white()));
    }

    #[test]
    fn test_argb_packing() {
        assert_eq!(0xff00_00ff, Color::blue().argb());
        assert_eq!(0xffff_ffff, Color::white().argb());
        assert_eq!(0xff00_0000, Color::black().argb());

        // out of range channels saturate
        assert_eq!(0xffff_0000, Color::new(4.0, -1.0, 0.0).argb());
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Some(Color::blue()), Color::from_hex("#0000ff"));
        assert_eq!(Some(Color::white()), Color::from_hex("ffffff"));
        assert_eq!(None, Color::from_hex("#fff"));
        assert_eq!(None, Color::from_hex("#gggggg"));
    }

    #[test]
    fn test_scale_and_add() {
        let c = Color::new(0.5, 0.25, 1.0) * 2.0 + Color::new(0.0, 0.5, 0.0);
        assert_eq!(Color::new(1.0, 1.0, 2.0), c);
        assert_eq!(c, 1.0 * c);
    }

    #[test]
    fn test_canvas_resize() {
        let mut canvas = Canvas::new(4, 3);
        *canvas.get_mut(3, 2) = Color::white().argb();
        assert_eq!(Color::white().argb(), canvas.pixels()[2 * 4 + 3]);

        canvas.resize(2, 2);
        assert_eq!(4, canvas.pixels().len());
        assert!(canvas.pixels().iter().all(|p| *p == Color::black().argb()));
        assert_eq!(12, Canvas::new(2, 2).data().len());
    }

    #[test]
    fn test_pixel_count_beyond_u32() {
        assert_eq!(4_900_000_000, pixel_count(70_000, 70_000));
        assert_eq!(0, pixel_count(0, u32::MAX));
    }
}
