#[derive(Clone, Copy, Debug)]
pub struct RgbaFImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [f32], // row-major interleaved RGBA, 0..=1, len = w*h*4
}

impl<'a> RgbaFImageView<'a> {
    /// Wrap a raw buffer, checking that its length matches the dimensions.
    pub fn new(width: usize, height: usize, data: &'a [f32]) -> Option<Self> {
        (data.len() == width * height * 4).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BgrImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>, // row-major interleaved BGR, len = w*h*3
}

#[derive(Clone, Copy, Debug)]
pub struct BgrImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

impl BgrImage {
    /// Take ownership of a raw buffer, checking that its length matches
    /// the dimensions.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height * 3).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn view(&self) -> BgrImageView<'_> {
        BgrImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl<'a> BgrImageView<'a> {
    /// Wrap a raw buffer, checking that its length matches the dimensions.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Option<Self> {
        (data.len() == width * height * 3).then_some(Self {
            width,
            height,
            data,
        })
    }
}

#[inline]
fn quantize(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Transcode RGBA float pixels into interleaved BGR bytes.
///
/// Components are clamped to 0..=1 and scaled to 0..=255 with rounding;
/// alpha is dropped.
pub fn rgba_f32_to_bgr_u8(src: &RgbaFImageView<'_>) -> BgrImage {
    let mut data = Vec::with_capacity(src.width * src.height * 3);
    for px in src.data.chunks_exact(4) {
        data.push(quantize(px[2]));
        data.push(quantize(px[1]));
        data.push(quantize(px[0]));
    }
    BgrImage {
        width: src.width,
        height: src.height,
        data,
    }
}
