// The engine colormap: 64 light levels x 256 palette indices, plus the
// fullbright count encoded in the lump itself.

use thiserror::Error;

/// Number of light levels in a colormap lump.
pub const COLORMAP_LEVELS: usize = 64;

const COLORMAP_WIDTH: usize = 256;
const FULLBRIGHT_OFFSET: usize = 8192;

#[derive(Debug, Error)]
pub enum ColormapError {
    #[error("colormap data shorter than {} bytes", COLORMAP_LEVELS * COLORMAP_WIDTH)]
    InvalidLength,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colormap {
    data: Vec<u8>,
}

impl Colormap {
    pub fn from_bytes(data: &[u8]) -> Result<Self, ColormapError> {
        if data.len() < COLORMAP_LEVELS * COLORMAP_WIDTH {
            return Err(ColormapError::InvalidLength);
        }
        Ok(Self {
            data: data[..COLORMAP_LEVELS * COLORMAP_WIDTH].to_vec(),
        })
    }

    /// Colormap that maps every index to itself at every light level.
    pub fn identity() -> Self {
        let mut data = vec![0u8; COLORMAP_LEVELS * COLORMAP_WIDTH];
        for level in 0..COLORMAP_LEVELS {
            for index in 0..COLORMAP_WIDTH {
                data[level * COLORMAP_WIDTH + index] = index as u8;
            }
        }
        Self { data }
    }

    /// Palette index shaded at a light level (0 brightest, 63 darkest).
    pub fn shade(&self, index: u8, level: u8) -> u8 {
        let level = (level as usize).min(COLORMAP_LEVELS - 1);
        self.data[level * COLORMAP_WIDTH + index as usize]
    }

    /// Number of fullbright colors at the top of the palette. The lump stores
    /// the count as a little-endian word at byte 8192, which the engine reads
    /// as `256 - value`.
    pub fn fullbright_count(&self) -> u32 {
        let raw = u32::from_le_bytes(
            self.data[FULLBRIGHT_OFFSET..FULLBRIGHT_OFFSET + 4]
                .try_into()
                .unwrap_or([0; 4]),
        );
        256u32.saturating_sub(raw)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
