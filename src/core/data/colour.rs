#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Packs the colour as an opaque little-endian RGBA cell (`0xAABBGGRR`),
    /// the layout canvas image data uses.
    #[must_use]
    pub const fn to_rgba(self) -> u32 {
        0xFF00_0000 | ((self.b as u32) << 16) | ((self.g as u32) << 8) | self.r as u32
    }

    #[must_use]
    pub const fn from_rgba(cell: u32) -> Self {
        Self {
            r: (cell & 0xFF) as u8,
            g: ((cell >> 8) & 0xFF) as u8,
            b: ((cell >> 16) & 0xFF) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgba_sets_opaque_alpha() {
        assert_eq!(Colour::BLACK.to_rgba(), 0xFF00_0000);
    }

    #[test]
    fn test_to_rgba_channel_order() {
        let colour = Colour { r: 0x11, g: 0x22, b: 0x33 };

        assert_eq!(colour.to_rgba(), 0xFF33_2211);
        assert_eq!(Colour::from_rgba(colour.to_rgba()), colour);
    }
}
