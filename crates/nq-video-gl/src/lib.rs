// Video state and double-buffered GL presentation. The presenter owns the
// per-frame GL calls; buffer swaps stay with the window that owns the
// context.

use nq_common::{ColorTables, Colormap, Palette};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("unsupported video mode {0}")]
    UnsupportedMode(u32),
}

#[derive(Debug, Clone, Copy)]
pub struct VideoConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// The video state the engine core reads each frame, one owned struct in
/// place of the original's globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoState {
    pub width: u32,
    pub height: u32,
    pub con_width: u32,
    pub con_height: u32,
    pub num_pages: u32,
    pub fullbright: u32,
    pub recalc_refdef: bool,
}

pub struct Video {
    state: VideoState,
    tables: ColorTables,
}

impl Video {
    pub fn new(config: VideoConfig, palette: &Palette, colormap: &Colormap) -> Self {
        let state = VideoState {
            width: config.width,
            height: config.height,
            con_width: config.width,
            con_height: config.height,
            num_pages: 1,
            fullbright: colormap.fullbright_count(),
            recalc_refdef: true,
        };
        tracing::info!(
            width = state.width,
            height = state.height,
            fullbright = state.fullbright,
            "video initialized"
        );
        Self {
            state,
            tables: ColorTables::build(palette),
        }
    }

    pub fn state(&self) -> &VideoState {
        &self.state
    }

    pub fn tables(&self) -> &ColorTables {
        &self.tables
    }

    /// Rebuild the color tables from a new palette.
    pub fn set_palette(&mut self, palette: &Palette) {
        self.tables = ColorTables::build(palette);
    }

    /// Palette shifts (damage flashes, item pickups) rebuild the same tables.
    pub fn shift_palette(&mut self, palette: &Palette) {
        self.set_palette(palette);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.width = width.max(1);
        self.state.height = height.max(1);
        self.state.con_width = self.state.width;
        self.state.con_height = self.state.height;
        self.state.recalc_refdef = true;
    }

    /// Only the single windowed mode exists.
    pub fn set_mode(&mut self, mode: u32) -> Result<(), VideoError> {
        if mode != 0 {
            return Err(VideoError::UnsupportedMode(mode));
        }
        Ok(())
    }

    /// Consume the refdef-recalculation flag.
    pub fn take_recalc_refdef(&mut self) -> bool {
        std::mem::replace(&mut self.state.recalc_refdef, false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Driver strings captured at context creation, logged once at startup.
#[derive(Debug, Clone, Default)]
pub struct GlInfo {
    pub vendor: String,
    pub renderer: String,
    pub version: String,
}

#[cfg(feature = "glow")]
mod gl;
#[cfg(feature = "glow")]
pub use gl::GlPresenter;

#[cfg(not(feature = "glow"))]
mod stub;
#[cfg(not(feature = "glow"))]
pub use stub::GlPresenter;

#[cfg(test)]
mod tests {
    use super::*;
    use nq_common::TRANSPARENT_INDEX;

    fn test_video() -> Video {
        Video::new(
            VideoConfig::default(),
            &Palette::grayscale(),
            &Colormap::identity(),
        )
    }

    #[test]
    fn init_raises_recalc_refdef() {
        let mut video = test_video();
        assert!(video.take_recalc_refdef());
        assert!(!video.take_recalc_refdef());
    }

    #[test]
    fn resize_updates_state_and_refdef() {
        let mut video = test_video();
        video.take_recalc_refdef();
        video.resize(800, 600);
        assert_eq!(video.state().width, 800);
        assert_eq!(video.state().con_height, 600);
        assert!(video.take_recalc_refdef());
    }

    #[test]
    fn single_page_single_mode() {
        let mut video = test_video();
        assert_eq!(video.state().num_pages, 1);
        assert!(video.set_mode(0).is_ok());
        assert!(matches!(
            video.set_mode(3),
            Err(VideoError::UnsupportedMode(3))
        ));
    }

    #[test]
    fn set_palette_rebuilds_tables() {
        let mut video = test_video();
        let mut bytes = vec![0u8; 256 * 3];
        bytes[0] = 255;
        let red = Palette::from_bytes(&bytes).unwrap();
        video.set_palette(&red);
        assert_eq!(video.tables().rgba_bytes(0), [255, 0, 0, 255]);
        assert_eq!(video.tables().rgba_bytes(TRANSPARENT_INDEX)[3], 0);
    }

    #[cfg(not(feature = "glow"))]
    #[test]
    fn stub_presenter_tracks_frames() {
        let mut presenter = unsafe { GlPresenter::from_loader(|_| std::ptr::null()) };
        let rect = presenter.begin_frame(640, 480);
        presenter.end_frame();
        assert_eq!(
            rect,
            ViewRect {
                x: 0,
                y: 0,
                width: 640,
                height: 480
            }
        );
        assert_eq!(presenter.frame_count(), 1);
    }

    #[cfg(not(feature = "glow"))]
    #[test]
    fn stub_presenter_resize_moves_the_viewport() {
        let mut presenter = unsafe { GlPresenter::from_loader(|_| std::ptr::null()) };
        presenter.resize(800, 600);
        assert_eq!(
            presenter.last_viewport(),
            Some(ViewRect {
                x: 0,
                y: 0,
                width: 800,
                height: 600
            })
        );
    }
}
