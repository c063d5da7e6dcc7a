//! Conversion from the drawing surface to the presentation format.

/// Channel order of a 4-byte-per-pixel source buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PixelLayout {
    Rgba,
    Bgra,
}

impl PixelLayout {
    fn offsets(self) -> (usize, usize, usize) {
        match self {
            Self::Rgba => (0, 1, 2),
            Self::Bgra => (2, 1, 0),
        }
    }
}

/// Packs premultiplied 4-channel bytes into `0RGB` words, which is what a
/// window presenter expects. Dropping alpha of premultiplied data composites
/// over black.
pub fn convert(src: &[u8], layout: PixelLayout, dst: &mut Vec<u32>) {
    let (r, g, b) = layout.offsets();
    dst.clear();
    dst.extend(src.chunks_exact(4).map(|px| {
        (px[r] as u32) << 16 | (px[g] as u32) << 8 | px[b] as u32
    }));
}
