// Quake palette loading and the derived color tables the video layer hands
// to the renderer: 8-bit index -> RGBA, 8-bit index -> RGB565, and the
// inverse 15-bit -> nearest-index table.

use thiserror::Error;

/// Palette index the renderer treats as transparent.
pub const TRANSPARENT_INDEX: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("palette data shorter than 256 RGB triples")]
    InvalidLength,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; 256],
}

impl Palette {
    pub fn from_bytes(data: &[u8]) -> Result<Self, PaletteError> {
        if data.len() < 256 * 3 {
            return Err(PaletteError::InvalidLength);
        }
        let mut colors = [Rgb(0, 0, 0); 256];
        for (i, color) in colors.iter_mut().enumerate() {
            let base = i * 3;
            *color = Rgb(data[base], data[base + 1], data[base + 2]);
        }
        Ok(Self { colors })
    }

    /// Fallback ramp used when no palette lump is available.
    pub fn grayscale() -> Self {
        let mut colors = [Rgb(0, 0, 0); 256];
        for (i, color) in colors.iter_mut().enumerate() {
            let level = i as u8;
            *color = Rgb(level, level, level);
        }
        Self { colors }
    }

    pub fn color(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    pub fn colors(&self) -> &[Rgb; 256] {
        &self.colors
    }
}

/// Lookup tables rebuilt whenever the palette is set or shifted.
#[derive(Clone)]
pub struct ColorTables {
    rgba: [u32; 256],
    rgb565: [u16; 256],
    index15: Box<[u8; 1 << 15]>,
}

impl ColorTables {
    pub fn build(palette: &Palette) -> Self {
        let mut rgba = [0u32; 256];
        let mut rgb565 = [0u16; 256];
        for (i, &Rgb(r, g, b)) in palette.colors().iter().enumerate() {
            let (r, g, b) = (u32::from(r), u32::from(g), u32::from(b));
            rgba[i] = (255 << 24) | r | (g << 8) | (b << 16);
            rgb565[i] = (((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3)) as u16;
        }
        // Index 255 stays transparent for alpha-tested surfaces.
        rgba[TRANSPARENT_INDEX as usize] &= 0x00ff_ffff;

        let mut index15 = Box::new([0u8; 1 << 15]);
        for (packed, slot) in index15.iter_mut().enumerate() {
            // Widen each 5-bit channel to 8 bits with a half-step bias.
            let r = (((packed & 0x1f) << 3) + 4) as i32;
            let g = (((packed & 0x03e0) >> 2) + 4) as i32;
            let b = (((packed & 0x7c00) >> 7) + 4) as i32;
            *slot = nearest_index(palette, r, g, b);
        }

        Self {
            rgba,
            rgb565,
            index15,
        }
    }

    /// Little-endian RGBA word for a palette index, alpha 255 except for the
    /// transparent index.
    pub fn rgba(&self, index: u8) -> u32 {
        self.rgba[index as usize]
    }

    pub fn rgba_bytes(&self, index: u8) -> [u8; 4] {
        self.rgba[index as usize].to_le_bytes()
    }

    pub fn rgb565(&self, index: u8) -> u16 {
        self.rgb565[index as usize]
    }

    /// Nearest palette index for a packed 15-bit 0rrrrrgggggbbbbb color.
    pub fn index_for_15bit(&self, color: u16) -> u8 {
        self.index15[(color & 0x7fff) as usize]
    }

    pub fn nearest(&self, Rgb(r, g, b): Rgb) -> u8 {
        let packed = (u16::from(r >> 3)) | (u16::from(g >> 3) << 5) | (u16::from(b >> 3) << 10);
        self.index_for_15bit(packed)
    }
}

fn nearest_index(palette: &Palette, r: i32, g: i32, b: i32) -> u8 {
    let mut best = 0usize;
    let mut best_dist = i32::MAX;
    for (v, &Rgb(pr, pg, pb)) in palette.colors().iter().enumerate() {
        let dr = r - i32::from(pr);
        let dg = g - i32::from(pg);
        let db = b - i32::from(pb);
        let dist = dr * dr + dg * dg + db * db;
        if dist < best_dist {
            best_dist = dist;
            best = v;
        }
    }
    best as u8
}
