mod colormap;
mod host;
mod hunk;
mod keys;
mod palette;

pub use colormap::{COLORMAP_LEVELS, Colormap, ColormapError};
pub use host::{Host, HostError, HostParms};
pub use hunk::{HUNK_ALIGN, Hunk, HunkBlock, HunkError};
pub use keys::Key;
pub use palette::{ColorTables, Palette, PaletteError, Rgb, TRANSPARENT_INDEX};
