//! RGB pixel type.

use serde::{Deserialize, Serialize};

/// A 3-channel 8-bit pixel. No alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    pub const WHITE: Pixel = Pixel::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Same value on all three channels.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Mean of the three channels, truncated.
    #[inline]
    pub fn luminance(&self) -> u8 {
        ((self.red as u16 + self.green as u16 + self.blue as u16) / 3) as u8
    }

    #[inline]
    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    #[inline]
    pub fn from_channels([red, green, blue]: [u8; 3]) -> Self {
        Self { red, green, blue }
    }
}
