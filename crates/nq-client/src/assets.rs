// Palette and colormap lumps loaded through the system file table, with
// built-in fallbacks so the shim runs without game data installed.

use std::path::Path;

use nq_common::{Colormap, Palette};
use nq_sys::{FileTable, SysError};

pub const PALETTE_PATH: &str = "id1/gfx/palette.lmp";
pub const COLORMAP_PATH: &str = "id1/gfx/colormap.lmp";

pub fn load_palette(files: &mut FileTable, basedir: &Path) -> Palette {
    match read_all(files, &basedir.join(PALETTE_PATH)) {
        Ok(data) => match Palette::from_bytes(&data) {
            Ok(palette) => palette,
            Err(err) => {
                tracing::warn!("bad palette lump ({err}), using grayscale ramp");
                Palette::grayscale()
            }
        },
        Err(err) => {
            tracing::info!("no palette lump ({err}), using grayscale ramp");
            Palette::grayscale()
        }
    }
}

pub fn load_colormap(files: &mut FileTable, basedir: &Path) -> Colormap {
    match read_all(files, &basedir.join(COLORMAP_PATH)) {
        Ok(data) => match Colormap::from_bytes(&data) {
            Ok(colormap) => colormap,
            Err(err) => {
                tracing::warn!("bad colormap lump ({err}), using identity shading");
                Colormap::identity()
            }
        },
        Err(err) => {
            tracing::info!("no colormap lump ({err}), using identity shading");
            Colormap::identity()
        }
    }
}

fn read_all(files: &mut FileTable, path: &Path) -> Result<Vec<u8>, SysError> {
    let (handle, len) = files.open_read(path)?;
    let mut data = vec![0u8; len as usize];
    let mut filled = 0;
    while filled < data.len() {
        let count = match files.read(handle, &mut data[filled..]) {
            Ok(0) => break,
            Ok(count) => count,
            Err(err) => {
                // Free the slot but report the read failure, not the close.
                files.close(handle).ok();
                return Err(err);
            }
        };
        filled += count;
    }
    files.close(handle)?;
    data.truncate(filled);
    Ok(data)
}
