//! Packed RGBA pixel.

/// Channels per pixel in every layout.
pub const CHANNELS: usize = 4;

/// One 8-bit RGBA pixel, laid out like a packed 4-byte vector.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels in R, G, B, A order.
    pub const fn to_array(self) -> [u8; CHANNELS] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; CHANNELS]> for Rgba {
    fn from([r, g, b, a]: [u8; CHANNELS]) -> Self {
        Self { r, g, b, a }
    }
}

/// Flattens packed pixels into interleaved bytes.
pub fn pixels_to_bytes(pixels: &[Rgba]) -> Vec<u8> {
    pixels.iter().flat_map(|p| p.to_array()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_is_four_bytes() {
        assert_eq!(std::mem::size_of::<Rgba>(), CHANNELS);
        assert_eq!(std::mem::align_of::<Rgba>(), 1);
    }

    #[test]
    fn array_conversion_keeps_channel_order() {
        let px = Rgba::from([1, 2, 3, 4]);
        assert_eq!(px, Rgba::new(1, 2, 3, 4));
        assert_eq!(px.to_array(), [1, 2, 3, 4]);
    }

    #[test]
    fn pixels_to_bytes_interleaves() {
        let bytes = pixels_to_bytes(&[Rgba::new(1, 2, 3, 4), Rgba::new(5, 6, 7, 8)]);
        assert_eq!(bytes, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
